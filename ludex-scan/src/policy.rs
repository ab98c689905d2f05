//! Per-provider, per-mode query gating.
//!
//! Before any lookup is issued, the policy decides whether a provider
//! must be consulted for this record under the current scan mode. The
//! decision never touches the network; failure or absence of a provider
//! is represented downstream as a not-found result, so the policy layer
//! can never abort a scan.

use serde::{Deserialize, Serialize};

use ludex_core::{Platform, Rom};
use ludex_meta::{MetadataSource, SourceSet};

/// The kind of scan pass being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanType {
    /// Register newly discovered platform folders only.
    NewPlatforms,
    /// Pick up new files; known records keep their stored data.
    Quick,
    /// Re-query only records that no provider has identified yet.
    Unidentified,
    /// Fill identifier gaps without revising stored descriptive data.
    Partial,
    /// Full rescan: every eligible provider, prior state notwithstanding.
    Complete,
    /// Refresh hash-to-id mappings for the achievement provider.
    Hashes,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewPlatforms => "new_platforms",
            Self::Quick => "quick",
            Self::Unidentified => "unidentified",
            Self::Partial => "partial",
            Self::Complete => "complete",
            Self::Hashes => "hashes",
        }
    }
}

impl std::fmt::Display for ScanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which providers to consult for one record.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    scan_type: ScanType,
    sources: SourceSet,
}

impl ScanPolicy {
    pub fn new(scan_type: ScanType, sources: SourceSet) -> Self {
        Self { scan_type, sources }
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    /// Should this metadata source be queried for a game?
    ///
    /// `prior` is the stored record, absent for first-time discovery.
    /// Most sources also require the owning platform to hold that
    /// source's platform id; LaunchBox has no such prerequisite. The
    /// achievement provider additionally queries on `Hashes` scans to
    /// refresh its hash-to-id mapping.
    pub fn should_query(
        &self,
        source: MetadataSource,
        platform: &Platform,
        prior: Option<&Rom>,
    ) -> bool {
        if !self.sources.contains(source) {
            return false;
        }

        // Artwork gating is a separate decision (see should_query_artwork).
        if source == MetadataSource::Sgdb {
            return false;
        }

        let platform_ok = match source {
            MetadataSource::Launchbox => true,
            other => other.platform_id(platform).is_some(),
        };
        if !platform_ok {
            return false;
        }

        let Some(prior) = prior else {
            return true;
        };

        match self.scan_type {
            ScanType::Complete => true,
            ScanType::Partial => source.rom_id(prior).is_none(),
            ScanType::Unidentified => prior.is_unidentified(),
            ScanType::Hashes => source == MetadataSource::Ra,
            ScanType::NewPlatforms | ScanType::Quick => false,
        }
    }

    /// Should the cover-art provider be queried for a game?
    ///
    /// Strictly `enabled AND (policy condition)`: a `Complete` scan with
    /// the provider disabled never triggers a lookup. The caller applies
    /// the additional rule that an item unidentified after the metadata
    /// phase is never sent to cover-art lookup.
    pub fn should_query_artwork(&self, prior: Option<&Rom>) -> bool {
        if !self.sources.contains(MetadataSource::Sgdb) {
            return false;
        }

        let Some(prior) = prior else {
            return true;
        };

        match self.scan_type {
            ScanType::Complete => true,
            ScanType::Partial => prior.sgdb_id.is_none(),
            ScanType::Unidentified => prior.is_unidentified(),
            ScanType::NewPlatforms | ScanType::Quick | ScanType::Hashes => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform_with_all_ids() -> Platform {
        Platform {
            igdb_id: Some(1),
            moby_id: Some(2),
            ss_id: Some(3),
            ra_id: Some(4),
            launchbox_id: Some(5),
            hasheous_id: Some(6),
            tgdb_id: Some(7),
            slug: "n64".to_string(),
            ..Default::default()
        }
    }

    fn identified_rom() -> Rom {
        Rom {
            igdb_id: Some(100),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_record_always_queries() {
        let policy = ScanPolicy::new(ScanType::Quick, SourceSet::all());
        assert!(policy.should_query(MetadataSource::Igdb, &platform_with_all_ids(), None));
    }

    #[test]
    fn test_disabled_source_never_queries() {
        let sources: SourceSet = [MetadataSource::Moby].as_slice().into();
        let policy = ScanPolicy::new(ScanType::Complete, sources);
        assert!(!policy.should_query(MetadataSource::Igdb, &platform_with_all_ids(), None));
    }

    #[test]
    fn test_platform_prerequisite_blocks_query() {
        let policy = ScanPolicy::new(ScanType::Complete, SourceSet::all());
        let platform = Platform::default();
        assert!(!policy.should_query(MetadataSource::Igdb, &platform, None));
        // LaunchBox has no platform prerequisite.
        assert!(policy.should_query(MetadataSource::Launchbox, &platform, None));
    }

    #[test]
    fn test_complete_requeries_identified_records() {
        let policy = ScanPolicy::new(ScanType::Complete, SourceSet::all());
        let prior = identified_rom();
        assert!(policy.should_query(MetadataSource::Igdb, &platform_with_all_ids(), Some(&prior)));
    }

    #[test]
    fn test_partial_skips_sources_with_ids() {
        let policy = ScanPolicy::new(ScanType::Partial, SourceSet::all());
        let prior = identified_rom();
        let platform = platform_with_all_ids();
        assert!(!policy.should_query(MetadataSource::Igdb, &platform, Some(&prior)));
        assert!(policy.should_query(MetadataSource::Moby, &platform, Some(&prior)));
    }

    #[test]
    fn test_unidentified_skips_identified_records() {
        let policy = ScanPolicy::new(ScanType::Unidentified, SourceSet::all());
        let platform = platform_with_all_ids();
        let prior = identified_rom();
        assert!(!policy.should_query(MetadataSource::Moby, &platform, Some(&prior)));

        let unidentified = Rom::default();
        assert!(policy.should_query(MetadataSource::Moby, &platform, Some(&unidentified)));
    }

    #[test]
    fn test_hashes_only_requeries_achievement_provider() {
        let policy = ScanPolicy::new(ScanType::Hashes, SourceSet::all());
        let platform = platform_with_all_ids();
        let prior = identified_rom();
        assert!(policy.should_query(MetadataSource::Ra, &platform, Some(&prior)));
        assert!(!policy.should_query(MetadataSource::Igdb, &platform, Some(&prior)));
        assert!(!policy.should_query(MetadataSource::Ss, &platform, Some(&prior)));
    }

    #[test]
    fn test_quick_skips_known_records() {
        let policy = ScanPolicy::new(ScanType::Quick, SourceSet::all());
        let prior = Rom::default();
        assert!(!policy.should_query(MetadataSource::Igdb, &platform_with_all_ids(), Some(&prior)));
    }

    #[test]
    fn test_artwork_disabled_overrides_complete() {
        let sources: SourceSet = [MetadataSource::Igdb].as_slice().into();
        let policy = ScanPolicy::new(ScanType::Complete, sources);
        assert!(!policy.should_query_artwork(None));
    }

    #[test]
    fn test_artwork_partial_fills_gap_only() {
        let policy = ScanPolicy::new(ScanType::Partial, SourceSet::all());
        let mut prior = identified_rom();
        assert!(policy.should_query_artwork(Some(&prior)));
        prior.sgdb_id = Some(50);
        assert!(!policy.should_query_artwork(Some(&prior)));
    }
}
