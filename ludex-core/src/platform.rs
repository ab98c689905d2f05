use serde::{Deserialize, Serialize};

/// A canonical platform record, one per console folder in the library.
///
/// Each provider that can identify a platform gets its own optional id
/// field. A platform is created or updated once per scan pass over its
/// folder and is never deleted automatically, only flagged
/// `missing_from_fs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Persistence id, absent until the record has been stored.
    pub id: Option<i64>,

    pub igdb_id: Option<i64>,
    pub sgdb_id: Option<i64>,
    pub moby_id: Option<i64>,
    pub ss_id: Option<i64>,
    pub ra_id: Option<i64>,
    pub launchbox_id: Option<i64>,
    pub hasheous_id: Option<i64>,
    pub tgdb_id: Option<i64>,

    /// Canonical slug after alias/version resolution (e.g. "n64").
    pub slug: String,
    /// Folder name as seen on disk, before any alias mapping.
    pub fs_slug: String,
    /// Display name, resolved from providers or humanized from the slug.
    pub name: String,

    pub category: Option<String>,
    pub generation: Option<i32>,
    pub family_name: Option<String>,
    pub family_slug: Option<String>,
    pub url: Option<String>,
    pub url_logo: Option<String>,

    /// Set when the folder disappeared from the filesystem between scans.
    pub missing_from_fs: bool,
}

impl Platform {
    /// True when no identity-bearing provider matched this platform.
    ///
    /// tgdb and sgdb ids are not identity-bearing for this check.
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
