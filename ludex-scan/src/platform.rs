//! Platform resolution.
//!
//! Resolves a platform folder to a canonical platform record: recovers
//! renamed folders through the alias and version tables, queries every
//! platform-capable provider concurrently for the resolved slug, and
//! merges the answers under fixed precedence. These are name/slug
//! lookups only; nothing here is hash-gated.

use std::collections::HashMap;

use ludex_core::{Platform, util};
use ludex_meta::{MetadataSource, PLATFORM_MERGE_ORDER, PlatformMeta, ProviderError};

use crate::Scanner;
use crate::error::ScanError;

/// Joined platform lookups, one slot per provider.
#[derive(Debug, Clone, Default)]
pub struct PlatformLookups {
    pub igdb: PlatformMeta,
    pub moby: PlatformMeta,
    pub ss: PlatformMeta,
    pub ra: PlatformMeta,
    pub launchbox: PlatformMeta,
    pub hasheous: PlatformMeta,
    pub tgdb: PlatformMeta,
}

impl PlatformLookups {
    pub fn by_source(&self, source: MetadataSource) -> Option<&PlatformMeta> {
        match source {
            MetadataSource::Igdb => Some(&self.igdb),
            MetadataSource::Moby => Some(&self.moby),
            MetadataSource::Ss => Some(&self.ss),
            MetadataSource::Ra => Some(&self.ra),
            MetadataSource::Launchbox => Some(&self.launchbox),
            MetadataSource::Hasheous => Some(&self.hasheous),
            MetadataSource::Tgdb => Some(&self.tgdb),
            MetadataSource::Sgdb => None,
        }
    }
}

impl Scanner {
    /// Resolve a platform folder into a canonical platform record.
    ///
    /// `fs_platforms` is the set of folder slugs currently observed on
    /// disk; a folder absent from it was renamed or removed since the
    /// last scan, and recovery through the mapping tables is attempted
    /// before resolution.
    pub async fn scan_platform(
        &self,
        fs_slug: &str,
        fs_platforms: &[String],
    ) -> Result<Platform, ScanError> {
        self.check_cancelled()?;

        let mut resolved_fs_slug = fs_slug.to_string();
        if !fs_platforms.iter().any(|s| s == fs_slug) {
            log::warn!(
                "{} not found in the file system, trying to match via config",
                fs_slug
            );
            if let Some(recovered) = self.recover_fs_slug(fs_slug).await {
                resolved_fs_slug = recovered;
            }
        }

        // Alias table first, then version table, then the folder name
        // itself.
        let slug = self
            .config
            .platform_aliases
            .get(fs_slug)
            .or_else(|| self.config.platform_versions.get(fs_slug))
            .cloned()
            .unwrap_or_else(|| fs_slug.to_string());

        self.check_cancelled()?;
        let lookups = self.platform_lookups(&slug).await;
        let platform = merge_platform(&slug, &resolved_fs_slug, &lookups);

        if platform.is_identified() || platform.tgdb_id.is_some() {
            log::info!(
                "Folder {} [{}] identified as {}",
                platform.slug,
                platform.fs_slug,
                platform.name
            );
        } else {
            log::warn!("Platform {} not identified", platform.slug);
        }

        Ok(platform)
    }

    /// Recover the folder name for a renamed/removed platform folder by
    /// reverse-looking-up the mapping tables against the stored
    /// platform. The alias table takes priority over the version table.
    async fn recover_fs_slug(&self, fs_slug: &str) -> Option<String> {
        let aliased_folders: HashMap<&str, &str> = self
            .config
            .platform_aliases
            .iter()
            .map(|(folder, canonical)| (canonical.as_str(), folder.as_str()))
            .collect();
        let version_folders: HashMap<&str, &str> = self
            .config
            .platform_versions
            .iter()
            .map(|(variant, parent)| (parent.as_str(), variant.as_str()))
            .collect();

        if aliased_folders.contains_key(fs_slug) {
            let stored = self.store.platform_by_fs_slug(fs_slug).await?;
            aliased_folders
                .get(stored.slug.as_str())
                .map(|s| s.to_string())
        } else if version_folders.contains_key(fs_slug) {
            let stored = self.store.platform_by_fs_slug(fs_slug).await?;
            version_folders
                .get(stored.slug.as_str())
                .map(|s| s.to_string())
        } else {
            None
        }
    }

    /// Query all platform-capable providers concurrently for a slug.
    async fn platform_lookups(&self, slug: &str) -> PlatformLookups {
        let catalog = |source: MetadataSource| async move {
            if !self.config.sources.contains(source) {
                return PlatformMeta::not_found();
            }
            let Some(provider) = self.providers.catalog(source) else {
                return PlatformMeta::not_found();
            };
            degraded(source, slug, provider.platform_by_slug(slug).await)
        };

        let hasheous = async {
            if !self.config.sources.contains(MetadataSource::Hasheous) {
                return PlatformMeta::not_found();
            }
            let Some(db) = &self.providers.hasheous else {
                return PlatformMeta::not_found();
            };
            degraded(
                MetadataSource::Hasheous,
                slug,
                db.platform_by_slug(slug).await,
            )
        };

        let (igdb, moby, ss, ra, launchbox, tgdb, hasheous) = futures::join!(
            catalog(MetadataSource::Igdb),
            catalog(MetadataSource::Moby),
            catalog(MetadataSource::Ss),
            catalog(MetadataSource::Ra),
            catalog(MetadataSource::Launchbox),
            catalog(MetadataSource::Tgdb),
            hasheous,
        );

        PlatformLookups {
            igdb,
            moby,
            ss,
            ra,
            launchbox,
            hasheous,
            tgdb,
        }
    }
}

fn degraded(
    source: MetadataSource,
    slug: &str,
    result: Result<PlatformMeta, ProviderError>,
) -> PlatformMeta {
    match result {
        Ok(meta) => meta,
        Err(e) => {
            log::warn!("{} platform lookup failed for {}: {}", source, slug, e);
            PlatformMeta::not_found()
        }
    }
}

static NO_CROSS: PlatformMeta = PlatformMeta {
    provider_id: None,
    name: None,
    category: None,
    generation: None,
    family_name: None,
    family_slug: None,
    url: None,
    url_logo: None,
    igdb_id: None,
    ra_id: None,
    tgdb_id: None,
};

/// Merge the joined platform lookups into a canonical record.
pub(crate) fn merge_platform(slug: &str, fs_slug: &str, lookups: &PlatformLookups) -> Platform {
    let mut platform = Platform {
        slug: slug.to_string(),
        fs_slug: fs_slug.to_string(),
        ..Default::default()
    };

    // Descriptive fields: ascending precedence, found results only.
    for source in PLATFORM_MERGE_ORDER {
        let Some(meta) = lookups.by_source(*source) else {
            continue;
        };
        if meta.found() {
            apply_descriptive(&mut platform, meta);
        }
    }

    // Identifier chains: the hash database's cross-references back the
    // providers that share an identifier space with it. A not-found
    // result contributes no cross-references either.
    let cross = if lookups.hasheous.found() {
        &lookups.hasheous
    } else {
        &NO_CROSS
    };
    platform.igdb_id = lookups.igdb.provider_id.or(cross.igdb_id);
    platform.moby_id = lookups.moby.provider_id;
    platform.ss_id = lookups.ss.provider_id;
    platform.ra_id = lookups.ra.provider_id.or(cross.ra_id);
    platform.launchbox_id = lookups.launchbox.provider_id;
    platform.hasheous_id = lookups.hasheous.provider_id;
    platform.tgdb_id = lookups.tgdb.provider_id.or(cross.tgdb_id);

    // Display name: first provider with an answer, else the slug
    // humanized.
    platform.name = [
        &lookups.igdb,
        &lookups.ss,
        &lookups.moby,
        &lookups.ra,
        &lookups.launchbox,
        &lookups.hasheous,
        &lookups.tgdb,
    ]
    .into_iter()
    .filter(|meta| meta.found())
    .find_map(|meta| meta.name.clone().filter(|n| !n.is_empty()))
    .unwrap_or_else(|| util::humanize_slug(slug));

    platform.url_logo = [&lookups.igdb, &lookups.tgdb]
        .into_iter()
        .filter(|meta| meta.found())
        .find_map(|meta| meta.url_logo.clone());

    platform.missing_from_fs = false;
    platform
}

fn apply_descriptive(platform: &mut Platform, meta: &PlatformMeta) {
    if meta.category.is_some() {
        platform.category = meta.category.clone();
    }
    if meta.generation.is_some() {
        platform.generation = meta.generation;
    }
    if meta.family_name.is_some() {
        platform.family_name = meta.family_name.clone();
    }
    if meta.family_slug.is_some() {
        platform.family_slug = meta.family_slug.clone();
    }
    if meta.url.is_some() {
        platform.url = meta.url.clone();
    }
}
