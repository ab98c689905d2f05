use serde::{Deserialize, Serialize};

/// A canonical game record for one file (or one multi-file group) on disk.
///
/// Filesystem-derived fields (`fs_*`, hashes, name-derived tags) come from
/// the scan itself; identity and descriptive fields are reconciled from the
/// metadata providers. The persistence `id` and filesystem-derived fields
/// survive rescans; identity fields are only ever replaced by a non-null
/// value, never cleared by an absent lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rom {
    /// Persistence id, absent until the record has been stored.
    pub id: Option<i64>,
    pub platform_id: Option<i64>,

    pub igdb_id: Option<i64>,
    pub sgdb_id: Option<i64>,
    pub moby_id: Option<i64>,
    pub ss_id: Option<i64>,
    pub ra_id: Option<i64>,
    pub launchbox_id: Option<i64>,
    pub hasheous_id: Option<i64>,
    pub tgdb_id: Option<i64>,

    /// Group-level content hashes, precomputed by the filesystem walker.
    pub crc_hash: Option<String>,
    pub md5_hash: Option<String>,
    pub sha1_hash: Option<String>,
    /// RetroAchievements-specific hash, when the platform supports one.
    pub ra_hash: Option<String>,

    /// File or directory name as seen on disk, with extension and tags.
    pub fs_name: String,
    /// `fs_name` without extension or release tags.
    pub fs_name_no_tags: String,
    /// `fs_name` without the extension.
    pub fs_name_no_ext: String,
    pub fs_extension: String,
    pub fs_path: String,
    pub fs_size_bytes: u64,
    /// True for multi-file games (disc sets, split ROMs).
    pub multi: bool,

    /// Display name; defaults to `fs_name` until a provider names it.
    pub name: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub url_cover: Option<String>,
    pub url_manual: Option<String>,
    pub url_screenshots: Vec<String>,

    /// Region tags parsed from the filename (e.g. "USA", "Japan").
    pub regions: Vec<String>,
    /// Language codes parsed from the filename (e.g. "En", "Fr").
    pub languages: Vec<String>,
    /// Revision string parsed from the filename (e.g. "Rev A").
    pub revision: Option<String>,
    /// Remaining parenthesized/bracketed tags (e.g. "Proto", "Beta").
    pub tags: Vec<String>,

    pub missing_from_fs: bool,
}

impl Rom {
    /// True when no identity-bearing provider matched this game.
    ///
    /// tgdb and sgdb ids are not identity-bearing for this check: tgdb
    /// ids only arrive as cross-references and sgdb supplies artwork, not
    /// identity.
    pub fn is_unidentified(&self) -> bool {
        self.igdb_id.is_none()
            && self.moby_id.is_none()
            && self.ss_id.is_none()
            && self.ra_id.is_none()
            && self.launchbox_id.is_none()
            && self.hasheous_id.is_none()
    }

    pub fn is_identified(&self) -> bool {
        !self.is_unidentified()
    }
}
