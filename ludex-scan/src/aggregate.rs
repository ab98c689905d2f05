//! Phases 2 and 3: metadata lookups and the deterministic merge.
//!
//! Phase 2 runs the general catalogs concurrently, feeding them the hash
//! phase's output where a provider supports id-based lookup. The merge
//! then applies descriptive fields in ascending precedence and resolves
//! each identifier through its own fallback chain, so an absent lookup
//! can never null an id the record already holds. Phase 3 (cover art)
//! only runs for records that phase 2 identified.

use ludex_core::{FsRom, Platform, Rom, fsname};
use ludex_meta::{
    GAME_MERGE_ORDER, GameMeta, MetadataSource, PlatformRef, ProviderError,
};

use crate::Scanner;
use crate::error::ScanError;
use crate::hash_stage::HashPhase;
use crate::policy::{ScanPolicy, ScanType};

/// Joined results of the metadata-lookup phase, one slot per catalog.
#[derive(Debug, Clone, Default)]
pub struct LookupPhase {
    pub igdb: GameMeta,
    pub moby: GameMeta,
    pub ss: GameMeta,
    pub ra: GameMeta,
    pub launchbox: GameMeta,
    pub hasheous: GameMeta,
}

impl LookupPhase {
    /// The slot for a source, if that source participates in this phase.
    pub fn by_source(&self, source: MetadataSource) -> Option<&GameMeta> {
        match source {
            MetadataSource::Igdb => Some(&self.igdb),
            MetadataSource::Moby => Some(&self.moby),
            MetadataSource::Ss => Some(&self.ss),
            MetadataSource::Ra => Some(&self.ra),
            MetadataSource::Launchbox => Some(&self.launchbox),
            MetadataSource::Hasheous => Some(&self.hasheous),
            MetadataSource::Tgdb | MetadataSource::Sgdb => None,
        }
    }

    /// True when at least one catalog identified the game.
    pub fn any_found(&self) -> bool {
        self.igdb.found()
            || self.moby.found()
            || self.ss.found()
            || self.ra.found()
            || self.launchbox.found()
            || self.hasheous.found()
    }

    pub(crate) async fn run(
        scanner: &Scanner,
        policy: &ScanPolicy,
        platform: &Platform,
        prior: Option<&Rom>,
        fs_rom: &FsRom,
        hashes: &HashPhase,
    ) -> Self {
        let igdb = async {
            if !policy.should_query(MetadataSource::Igdb, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(provider) = &scanner.providers.igdb else {
                return GameMeta::not_found();
            };
            // Hash-resolved ids short-circuit the name search: the hash
            // database's cross-reference wins, then the community match.
            if let Some(id) = hashes.hasheous.igdb_id {
                log::debug!("{} matched by hash database as igdb {}", fs_rom.fs_name, id);
                return degraded(MetadataSource::Igdb, &fs_rom.fs_name, provider.game_by_id(id).await);
            }
            if let Some(id) = hashes.playmatch.igdb_id {
                log::debug!(
                    "{} matched by community matcher as igdb {}",
                    fs_rom.fs_name,
                    id
                );
                return degraded(MetadataSource::Igdb, &fs_rom.fs_name, provider.game_by_id(id).await);
            }
            let platform_igdb_id = scanner
                .main_platform_igdb_id(platform)
                .await
                .or(platform.igdb_id);
            let result = provider
                .game_by_name(
                    &fs_rom.fs_name,
                    PlatformRef {
                        slug: &platform.slug,
                        provider_platform_id: platform_igdb_id,
                    },
                )
                .await;
            degraded(MetadataSource::Igdb, &fs_rom.fs_name, result)
        };

        let moby = async {
            if !policy.should_query(MetadataSource::Moby, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(provider) = &scanner.providers.moby else {
                return GameMeta::not_found();
            };
            let result = provider
                .game_by_name(
                    &fs_rom.fs_name,
                    PlatformRef {
                        slug: &platform.slug,
                        provider_platform_id: platform.moby_id,
                    },
                )
                .await;
            degraded(MetadataSource::Moby, &fs_rom.fs_name, result)
        };

        let ss = async {
            if !policy.should_query(MetadataSource::Ss, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(provider) = &scanner.providers.ss else {
                return GameMeta::not_found();
            };
            let result = provider
                .game_by_name(
                    &fs_rom.fs_name,
                    PlatformRef {
                        slug: &platform.slug,
                        provider_platform_id: platform.ss_id,
                    },
                )
                .await;
            degraded(MetadataSource::Ss, &fs_rom.fs_name, result)
        };

        let ra = async {
            if !policy.should_query(MetadataSource::Ra, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(provider) = &scanner.providers.ra else {
                return GameMeta::not_found();
            };
            if let Some(id) = hashes.hasheous.ra_id {
                log::debug!("{} matched by hash database as ra {}", fs_rom.fs_name, id);
                return degraded(MetadataSource::Ra, &fs_rom.fs_name, provider.game_by_id(id).await);
            }
            match &fs_rom.ra_hash {
                Some(hash) => {
                    degraded(MetadataSource::Ra, &fs_rom.fs_name, provider.game_by_hash(hash).await)
                }
                None => GameMeta::not_found(),
            }
        };

        let launchbox = async {
            if !policy.should_query(MetadataSource::Launchbox, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(provider) = &scanner.providers.launchbox else {
                return GameMeta::not_found();
            };
            let result = provider
                .game_by_name(
                    &fs_rom.fs_name,
                    PlatformRef {
                        slug: &platform.slug,
                        provider_platform_id: platform.launchbox_id,
                    },
                )
                .await;
            degraded(MetadataSource::Launchbox, &fs_rom.fs_name, result)
        };

        let hasheous = async {
            if !policy.should_query(MetadataSource::Hasheous, platform, prior) {
                return GameMeta::not_found();
            }
            let Some(db) = &scanner.providers.hasheous else {
                return GameMeta::not_found();
            };
            if !hashes.hasheous.found() {
                return GameMeta::not_found();
            }
            // Dereference the cross-referenced records into descriptive
            // data; the igdb record wins over the ra one on conflicts.
            let (igdb_game, ra_game) =
                futures::join!(db.igdb_game(&hashes.hasheous), db.ra_game(&hashes.hasheous));
            let mut meta = GameMeta {
                provider_id: hashes.hasheous.hasheous_id,
                ..Default::default()
            };
            meta.overlay(&degraded(
                MetadataSource::Hasheous,
                &fs_rom.fs_name,
                ra_game,
            ));
            meta.overlay(&degraded(
                MetadataSource::Hasheous,
                &fs_rom.fs_name,
                igdb_game,
            ));
            meta
        };

        let (igdb, moby, ss, ra, launchbox, hasheous) =
            futures::join!(igdb, moby, ss, ra, launchbox, hasheous);
        Self {
            igdb,
            moby,
            ss,
            ra,
            launchbox,
            hasheous,
        }
    }
}

/// Collapse a provider error into the not-found sentinel.
fn degraded(
    source: MetadataSource,
    fs_name: &str,
    result: Result<GameMeta, ProviderError>,
) -> GameMeta {
    match result {
        Ok(meta) => meta,
        Err(e) => {
            log::warn!("{} lookup failed for {}: {}", source, fs_name, e);
            GameMeta::not_found()
        }
    }
}

impl Scanner {
    /// Resolve one game against the enabled providers and merge the
    /// results into a canonical record.
    ///
    /// `prior` is the stored record from an earlier pass, absent on
    /// first discovery. The prior record's persistence id and
    /// filesystem-derived fields always survive; identity and
    /// descriptive fields survive according to the scan mode.
    pub async fn scan_rom(
        &self,
        scan_type: ScanType,
        platform: &Platform,
        prior: Option<&Rom>,
        fs_rom: &FsRom,
    ) -> Result<Rom, ScanError> {
        if self.config.sources.is_empty() {
            log::error!("no metadata sources configured");
            return Err(ScanError::NoMetadataSourcesConfigured);
        }
        let policy = ScanPolicy::new(scan_type, self.config.sources.clone());
        let mut rom = base_rom(platform, prior, fs_rom, scan_type);

        self.check_cancelled()?;
        let hashes = HashPhase::run(self, &policy, platform, prior, fs_rom).await;

        self.check_cancelled()?;
        let lookups = LookupPhase::run(self, &policy, platform, prior, fs_rom, &hashes).await;

        merge_game(&mut rom, prior, scan_type, &hashes, &lookups);

        if !lookups.any_found() {
            log::warn!("{} not identified", rom.fs_name);
            return Ok(rom);
        }

        self.check_cancelled()?;
        let artwork = self.artwork_lookup(&policy, prior, &rom, &lookups).await;
        if artwork.found() {
            rom.sgdb_id = artwork.provider_id;
            if artwork.url_cover.is_some() {
                rom.url_cover = artwork.url_cover.clone();
            }
        }

        log::info!("{} identified as {}", rom.fs_name, rom.name);
        if rom.multi {
            for file in &fs_rom.files {
                log::info!("  · {}", file.file_name);
            }
        }

        Ok(rom)
    }

    /// Phase 3: cover-art lookup using the best available display name.
    async fn artwork_lookup(
        &self,
        policy: &ScanPolicy,
        prior: Option<&Rom>,
        rom: &Rom,
        lookups: &LookupPhase,
    ) -> GameMeta {
        if !policy.should_query_artwork(prior) {
            return GameMeta::not_found();
        }
        let Some(provider) = &self.providers.sgdb else {
            return GameMeta::not_found();
        };
        let names = artwork_names(lookups, &rom.fs_name_no_tags);
        if names.is_empty() {
            return GameMeta::not_found();
        }
        match provider.game_by_names(&names).await {
            Ok(meta) => meta,
            Err(e) => {
                log::warn!("sgdb lookup failed for {}: {}", rom.fs_name, e);
                GameMeta::not_found()
            }
        }
    }

    /// Resolve the platform id to scope igdb name searches by.
    ///
    /// A variant platform (from the version table) searches under its
    /// parent: the stored parent's igdb id, else a fresh igdb platform
    /// lookup, else the scanned platform's own id.
    pub(crate) async fn main_platform_igdb_id(&self, platform: &Platform) -> Option<i64> {
        let parent_slug = self.config.platform_versions.get(&platform.fs_slug)?;
        match self.store.platform_by_fs_slug(parent_slug).await {
            Some(parent) => parent.igdb_id,
            None => {
                let provider = self.providers.igdb.as_ref()?;
                match provider.platform_by_slug(parent_slug).await {
                    Ok(meta) => meta.provider_id.or(platform.igdb_id),
                    Err(e) => {
                        log::warn!("igdb platform lookup failed for {}: {}", parent_slug, e);
                        platform.igdb_id
                    }
                }
            }
        }
    }
}

/// Build the record's filesystem-derived baseline, carrying prior state
/// according to the scan mode.
fn base_rom(platform: &Platform, prior: Option<&Rom>, fs_rom: &FsRom, scan_type: ScanType) -> Rom {
    let parsed = fsname::parse_fs_name(&fs_rom.fs_name);
    let mut rom = Rom {
        platform_id: platform.id,
        name: fs_rom.fs_name.clone(),
        fs_name: fs_rom.fs_name.clone(),
        fs_name_no_tags: parsed.no_tags,
        fs_name_no_ext: parsed.no_ext,
        fs_extension: parsed.extension,
        fs_path: fs_rom.fs_path.clone(),
        fs_size_bytes: fs_rom.total_size(),
        multi: fs_rom.multi,
        crc_hash: fs_rom.crc_hash.clone(),
        md5_hash: fs_rom.md5_hash.clone(),
        sha1_hash: fs_rom.sha1_hash.clone(),
        ra_hash: fs_rom.ra_hash.clone(),
        regions: parsed.regions,
        languages: parsed.languages,
        revision: parsed.revision,
        tags: parsed.tags,
        ..Default::default()
    };

    if let Some(prior) = prior {
        // Filesystem-derived fields are preserved across passes.
        rom.id = prior.id;
        rom.fs_path = prior.fs_path.clone();
        rom.fs_name_no_tags = prior.fs_name_no_tags.clone();
        rom.fs_name_no_ext = prior.fs_name_no_ext.clone();
        rom.fs_extension = prior.fs_extension.clone();
        rom.regions = prior.regions.clone();
        rom.languages = prior.languages.clone();
        rom.revision = prior.revision.clone();
        rom.tags = prior.tags.clone();

        // Stored identity and descriptive data survive everything short
        // of a full rescan.
        if scan_type != ScanType::Complete {
            rom.igdb_id = prior.igdb_id;
            rom.sgdb_id = prior.sgdb_id;
            rom.moby_id = prior.moby_id;
            rom.ss_id = prior.ss_id;
            rom.ra_id = prior.ra_id;
            rom.launchbox_id = prior.launchbox_id;
            rom.hasheous_id = prior.hasheous_id;
            rom.tgdb_id = prior.tgdb_id;
            rom.name = prior.name.clone();
            rom.slug = prior.slug.clone();
            rom.summary = prior.summary.clone();
            rom.url_cover = prior.url_cover.clone();
            rom.url_manual = prior.url_manual.clone();
            rom.url_screenshots = prior.url_screenshots.clone();
        }
    }

    rom
}

/// Merge the joined lookup results into the record.
pub(crate) fn merge_game(
    rom: &mut Rom,
    prior: Option<&Rom>,
    scan_type: ScanType,
    hashes: &HashPhase,
    lookups: &LookupPhase,
) {
    // Descriptive fields: ascending precedence, found results only.
    for source in GAME_MERGE_ORDER {
        let Some(meta) = lookups.by_source(*source) else {
            continue;
        };
        if meta.found() {
            apply_descriptive(rom, meta);
        }
    }

    // Identifier chains: a freshly resolved id wins, then the hash
    // database's cross-reference, then whatever the record already
    // holds. An absent lookup never nulls a known id.
    rom.igdb_id = lookups
        .igdb
        .provider_id
        .or(hashes.hasheous.igdb_id)
        .or(rom.igdb_id);
    rom.ss_id = lookups.ss.provider_id.or(rom.ss_id);
    rom.moby_id = lookups.moby.provider_id.or(rom.moby_id);
    rom.ra_id = lookups
        .ra
        .provider_id
        .or(hashes.hasheous.ra_id)
        .or(rom.ra_id);
    rom.launchbox_id = lookups.launchbox.provider_id.or(rom.launchbox_id);
    rom.hasheous_id = lookups.hasheous.provider_id.or(rom.hasheous_id);
    rom.tgdb_id = hashes.hasheous.tgdb_id.or(rom.tgdb_id);

    // Partial scans only fill gaps: stored descriptive content wins over
    // anything just fetched.
    if let Some(prior) = prior {
        if scan_type == ScanType::Partial {
            if !prior.name.is_empty() {
                rom.name = prior.name.clone();
            }
            if prior.summary.is_some() {
                rom.summary = prior.summary.clone();
            }
            if prior.url_cover.is_some() {
                rom.url_cover = prior.url_cover.clone();
            }
            if prior.url_manual.is_some() {
                rom.url_manual = prior.url_manual.clone();
            }
            if !prior.url_screenshots.is_empty() {
                rom.url_screenshots = prior.url_screenshots.clone();
            }
        }
    }
}

fn apply_descriptive(rom: &mut Rom, meta: &GameMeta) {
    if let Some(name) = &meta.name {
        if !name.is_empty() {
            rom.name = name.clone();
        }
    }
    if meta.slug.is_some() {
        rom.slug = meta.slug.clone();
    }
    if meta.summary.is_some() {
        rom.summary = meta.summary.clone();
    }
    if meta.url_cover.is_some() {
        rom.url_cover = meta.url_cover.clone();
    }
    if meta.url_manual.is_some() {
        rom.url_manual = meta.url_manual.clone();
    }
    if !meta.url_screenshots.is_empty() {
        rom.url_screenshots = meta.url_screenshots.clone();
    }
}

/// Candidate display names for the cover-art search, best first.
fn artwork_names(lookups: &LookupPhase, fs_name_no_tags: &str) -> Vec<String> {
    const NAME_PRIORITY: &[MetadataSource] = &[
        MetadataSource::Igdb,
        MetadataSource::Hasheous,
        MetadataSource::Ss,
        MetadataSource::Moby,
        MetadataSource::Launchbox,
    ];

    let mut names = Vec::new();
    for source in NAME_PRIORITY {
        let Some(meta) = lookups.by_source(*source) else {
            continue;
        };
        if !meta.found() {
            continue;
        }
        if let Some(name) = &meta.name {
            if !name.is_empty() {
                names.push(name.clone());
            }
        }
    }
    if !fs_name_no_tags.is_empty() {
        names.push(fs_name_no_tags.to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(source_id: i64, name: &str) -> GameMeta {
        GameMeta {
            provider_id: Some(source_id),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_artwork_names_priority() {
        let lookups = LookupPhase {
            moby: found(1, "Moby Name"),
            ss: found(2, "SS Name"),
            ..Default::default()
        };
        let names = artwork_names(&lookups, "Fs Name");
        assert_eq!(names, vec!["SS Name", "Moby Name", "Fs Name"]);
    }

    #[test]
    fn test_artwork_names_falls_back_to_fs_name() {
        let names = artwork_names(&LookupPhase::default(), "Fs Name");
        assert_eq!(names, vec!["Fs Name"]);
    }

    #[test]
    fn test_artwork_names_ignores_unfound_results() {
        let lookups = LookupPhase {
            igdb: GameMeta {
                name: Some("Ghost".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let names = artwork_names(&lookups, "Fs Name");
        assert_eq!(names, vec!["Fs Name"]);
    }

    #[test]
    fn test_merge_single_provider_round_trip() {
        let igdb = GameMeta {
            provider_id: Some(42),
            name: Some("Chrono Trigger".to_string()),
            slug: Some("chrono-trigger".to_string()),
            summary: Some("A time-travel RPG.".to_string()),
            url_cover: Some("https://img/cover.png".to_string()),
            url_manual: Some("https://img/manual.pdf".to_string()),
            url_screenshots: vec!["https://img/1.png".to_string()],
        };
        let lookups = LookupPhase {
            igdb: igdb.clone(),
            ..Default::default()
        };
        let mut rom = Rom {
            fs_name: "Chrono Trigger (USA).sfc".to_string(),
            name: "Chrono Trigger (USA).sfc".to_string(),
            ..Default::default()
        };
        merge_game(
            &mut rom,
            None,
            ScanType::Complete,
            &HashPhase::default(),
            &lookups,
        );

        assert_eq!(rom.igdb_id, Some(42));
        assert_eq!(rom.name, "Chrono Trigger");
        assert_eq!(rom.slug.as_deref(), Some("chrono-trigger"));
        assert_eq!(rom.summary.as_deref(), Some("A time-travel RPG."));
        assert_eq!(rom.url_cover.as_deref(), Some("https://img/cover.png"));
        assert_eq!(rom.url_manual.as_deref(), Some("https://img/manual.pdf"));
        assert_eq!(rom.url_screenshots, vec!["https://img/1.png".to_string()]);
        assert!(rom.moby_id.is_none());
    }

    #[test]
    fn test_merge_precedence_igdb_wins_descriptive() {
        let lookups = LookupPhase {
            launchbox: found(1, "LaunchBox Name"),
            igdb: found(2, "IGDB Name"),
            ..Default::default()
        };
        let mut rom = Rom::default();
        merge_game(
            &mut rom,
            None,
            ScanType::Complete,
            &HashPhase::default(),
            &lookups,
        );
        assert_eq!(rom.name, "IGDB Name");
        assert_eq!(rom.launchbox_id, Some(1));
        assert_eq!(rom.igdb_id, Some(2));
    }

    #[test]
    fn test_merge_does_not_null_prior_ids() {
        let prior = Rom {
            moby_id: Some(7),
            ..Default::default()
        };
        // A quick pass carried the prior id into the baseline; every
        // lookup came back not-found.
        let mut rom = prior.clone();
        merge_game(
            &mut rom,
            Some(&prior),
            ScanType::Quick,
            &HashPhase::default(),
            &LookupPhase::default(),
        );
        assert_eq!(rom.moby_id, Some(7));
    }

    #[test]
    fn test_merge_hash_database_ids_fill_gaps() {
        let hashes = HashPhase {
            hasheous: ludex_meta::HashMatch {
                hasheous_id: Some(1),
                igdb_id: Some(2),
                tgdb_id: Some(3),
                ra_id: Some(4),
            },
            ..Default::default()
        };
        let mut rom = Rom::default();
        merge_game(
            &mut rom,
            None,
            ScanType::Complete,
            &hashes,
            &LookupPhase::default(),
        );
        assert_eq!(rom.igdb_id, Some(2));
        assert_eq!(rom.tgdb_id, Some(3));
        assert_eq!(rom.ra_id, Some(4));
        // The hash database's own id only lands through a found
        // enrichment result.
        assert_eq!(rom.hasheous_id, None);
    }

    #[test]
    fn test_partial_restore_keeps_stored_descriptive_fields() {
        let prior = Rom {
            igdb_id: None,
            name: "Stored Name".to_string(),
            summary: Some("Stored summary".to_string()),
            url_cover: Some("stored-cover".to_string()),
            ..Default::default()
        };
        let mut rom = prior.clone();
        let lookups = LookupPhase {
            igdb: GameMeta {
                provider_id: Some(9),
                name: Some("Fetched Name".to_string()),
                summary: Some("Fetched summary".to_string()),
                url_cover: Some("fetched-cover".to_string()),
                url_manual: Some("fetched-manual".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        merge_game(
            &mut rom,
            Some(&prior),
            ScanType::Partial,
            &HashPhase::default(),
            &lookups,
        );
        // Identifier gap filled, stored descriptive content kept, and a
        // previously empty field may be filled.
        assert_eq!(rom.igdb_id, Some(9));
        assert_eq!(rom.name, "Stored Name");
        assert_eq!(rom.summary.as_deref(), Some("Stored summary"));
        assert_eq!(rom.url_cover.as_deref(), Some("stored-cover"));
        assert_eq!(rom.url_manual.as_deref(), Some("fetched-manual"));
    }
}
