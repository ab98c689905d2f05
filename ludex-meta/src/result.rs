//! Sparse partial records returned by provider lookups.
//!
//! Every lookup result carries an explicit `provider_id`; when it is
//! `None` the result is the not-found sentinel and the merge must ignore
//! every other field. This replaces loose key-by-key record merging with
//! typed optionals, so an absent field can never void a previously
//! resolved value.

use serde::{Deserialize, Serialize};

/// Partial platform record from one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformMeta {
    /// The platform's id in this provider's own identifier space.
    pub provider_id: Option<i64>,

    pub name: Option<String>,
    pub category: Option<String>,
    pub generation: Option<i32>,
    pub family_name: Option<String>,
    pub family_slug: Option<String>,
    pub url: Option<String>,
    pub url_logo: Option<String>,

    /// Cross-reference ids, populated by the hash database only.
    pub igdb_id: Option<i64>,
    pub ra_id: Option<i64>,
    pub tgdb_id: Option<i64>,
}

impl PlatformMeta {
    /// The sentinel for "this provider had no answer".
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(&self) -> bool {
        self.provider_id.is_some()
    }
}

/// Partial game record from one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMeta {
    /// The game's id in this provider's own identifier space.
    pub provider_id: Option<i64>,

    pub name: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub url_cover: Option<String>,
    pub url_manual: Option<String>,
    pub url_screenshots: Vec<String>,
}

impl GameMeta {
    /// The sentinel for "this provider had no answer".
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(&self) -> bool {
        self.provider_id.is_some()
    }

    /// Copy the other result's non-empty descriptive fields over this
    /// one's. Provider ids are left untouched; a not-found result
    /// contributes nothing.
    pub fn overlay(&mut self, other: &GameMeta) {
        if !other.found() {
            return;
        }
        if let Some(name) = &other.name {
            if !name.is_empty() {
                self.name = Some(name.clone());
            }
        }
        if other.slug.is_some() {
            self.slug = other.slug.clone();
        }
        if other.summary.is_some() {
            self.summary = other.summary.clone();
        }
        if other.url_cover.is_some() {
            self.url_cover = other.url_cover.clone();
        }
        if other.url_manual.is_some() {
            self.url_manual = other.url_manual.clone();
        }
        if !other.url_screenshots.is_empty() {
            self.url_screenshots = other.url_screenshots.clone();
        }
    }
}

/// Identifiers resolved by a hash matcher from file content hashes.
///
/// Hash matchers are authoritative for identifiers only; they never
/// produce descriptive fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashMatch {
    pub hasheous_id: Option<i64>,
    pub igdb_id: Option<i64>,
    pub tgdb_id: Option<i64>,
    pub ra_id: Option<i64>,
}

impl HashMatch {
    /// The sentinel for "no hash matched".
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(&self) -> bool {
        self.hasheous_id.is_some()
            || self.igdb_id.is_some()
            || self.tgdb_id.is_some()
            || self.ra_id.is_some()
    }
}
