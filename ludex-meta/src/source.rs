use serde::{Deserialize, Serialize};

use ludex_core::{Platform, Rom};

/// External metadata catalogs the scanner can consult.
///
/// This enum centralizes provider identity — short names, display names,
/// merge precedence, and which record field holds each provider's id — in
/// one place, so adding a provider means editing the tables here rather
/// than every merge expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataSource {
    /// IGDB, the primary catalog.
    Igdb,
    /// MobyGames.
    Moby,
    /// ScreenScraper.
    Ss,
    /// RetroAchievements.
    Ra,
    /// LaunchBox Games Database.
    Launchbox,
    /// Hasheous hash database (also carries igdb/tgdb/ra cross-references).
    Hasheous,
    /// TheGamesDB.
    Tgdb,
    /// SteamGridDB, artwork only.
    Sgdb,
}

/// All sources in declaration order.
pub const ALL_SOURCES: &[MetadataSource] = &[
    MetadataSource::Igdb,
    MetadataSource::Moby,
    MetadataSource::Ss,
    MetadataSource::Ra,
    MetadataSource::Launchbox,
    MetadataSource::Hasheous,
    MetadataSource::Tgdb,
    MetadataSource::Sgdb,
];

/// Game merge order, ascending precedence: each later source's non-empty
/// descriptive fields overwrite earlier ones.
pub const GAME_MERGE_ORDER: &[MetadataSource] = &[
    MetadataSource::Launchbox,
    MetadataSource::Hasheous,
    MetadataSource::Ra,
    MetadataSource::Moby,
    MetadataSource::Ss,
    MetadataSource::Igdb,
];

/// Platform merge order, ascending precedence.
pub const PLATFORM_MERGE_ORDER: &[MetadataSource] = &[
    MetadataSource::Hasheous,
    MetadataSource::Tgdb,
    MetadataSource::Launchbox,
    MetadataSource::Ra,
    MetadataSource::Moby,
    MetadataSource::Ss,
    MetadataSource::Igdb,
];

impl MetadataSource {
    /// Canonical short name, matching the config file and id field names.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Igdb => "igdb",
            Self::Moby => "moby",
            Self::Ss => "ss",
            Self::Ra => "ra",
            Self::Launchbox => "launchbox",
            Self::Hasheous => "hasheous",
            Self::Tgdb => "tgdb",
            Self::Sgdb => "sgdb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Igdb => "IGDB",
            Self::Moby => "MobyGames",
            Self::Ss => "ScreenScraper",
            Self::Ra => "RetroAchievements",
            Self::Launchbox => "LaunchBox",
            Self::Hasheous => "Hasheous",
            Self::Tgdb => "TheGamesDB",
            Self::Sgdb => "SteamGridDB",
        }
    }

    /// This source's id on a platform record.
    pub fn platform_id(&self, platform: &Platform) -> Option<i64> {
        match self {
            Self::Igdb => platform.igdb_id,
            Self::Moby => platform.moby_id,
            Self::Ss => platform.ss_id,
            Self::Ra => platform.ra_id,
            Self::Launchbox => platform.launchbox_id,
            Self::Hasheous => platform.hasheous_id,
            Self::Tgdb => platform.tgdb_id,
            Self::Sgdb => platform.sgdb_id,
        }
    }

    /// This source's id on a game record.
    pub fn rom_id(&self, rom: &Rom) -> Option<i64> {
        match self {
            Self::Igdb => rom.igdb_id,
            Self::Moby => rom.moby_id,
            Self::Ss => rom.ss_id,
            Self::Ra => rom.ra_id,
            Self::Launchbox => rom.launchbox_id,
            Self::Hasheous => rom.hasheous_id,
            Self::Tgdb => rom.tgdb_id,
            Self::Sgdb => rom.sgdb_id,
        }
    }
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The set of providers enabled for a scan.
///
/// Membership here means "permitted to be queried at all"; per-record
/// gating on top of it is the scan policy's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSet(Vec<MetadataSource>);

impl SourceSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A set with every known source enabled.
    pub fn all() -> Self {
        ALL_SOURCES.iter().copied().collect()
    }

    pub fn contains(&self, source: MetadataSource) -> bool {
        self.0.contains(&source)
    }

    pub fn insert(&mut self, source: MetadataSource) {
        if !self.0.contains(&source) {
            self.0.push(source);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = MetadataSource> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MetadataSource> for SourceSet {
    fn from_iter<I: IntoIterator<Item = MetadataSource>>(iter: I) -> Self {
        let mut set = Self::default();
        for source in iter {
            set.insert(source);
        }
        set
    }
}

impl From<&[MetadataSource]> for SourceSet {
    fn from(sources: &[MetadataSource]) -> Self {
        sources.iter().copied().collect()
    }
}
