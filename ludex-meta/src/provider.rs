//! Async collaborator traits the scanner orchestrates.
//!
//! One trait per capability shape: name/id lookups for the general
//! catalogs, hash matching for the two hash services, artwork search for
//! SteamGridDB, plus the read-only platform store and filesystem facts.
//! All methods degrade to not-found sentinels inside adapters wherever a
//! catalog has no answer; errors are reserved for transport failure.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use ludex_core::{FileHashes, Platform, RomFile};

use crate::error::ProviderError;
use crate::result::{GameMeta, HashMatch, PlatformMeta};
use crate::source::MetadataSource;

/// Platform context handed to name-based game lookups: the resolved
/// platform slug plus the platform's id in the provider's own space.
#[derive(Debug, Clone, Copy)]
pub struct PlatformRef<'a> {
    pub slug: &'a str,
    pub provider_platform_id: Option<i64>,
}

/// A general metadata catalog (IGDB, MobyGames, ScreenScraper,
/// RetroAchievements, LaunchBox, TheGamesDB).
///
/// Capabilities a catalog does not support keep the default
/// implementation and report not-found.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn source(&self) -> MetadataSource;

    /// Resolve a platform by its canonical slug.
    async fn platform_by_slug(&self, slug: &str) -> Result<PlatformMeta, ProviderError>;

    /// Search for a game by filesystem name, scoped to a platform.
    async fn game_by_name(
        &self,
        _name: &str,
        _platform: PlatformRef<'_>,
    ) -> Result<GameMeta, ProviderError> {
        Ok(GameMeta::not_found())
    }

    /// Fetch a game by its id in this provider's identifier space.
    async fn game_by_id(&self, _id: i64) -> Result<GameMeta, ProviderError> {
        Ok(GameMeta::not_found())
    }

    /// Fetch a game by a provider-specific content hash.
    async fn game_by_hash(&self, _hash: &str) -> Result<GameMeta, ProviderError> {
        Ok(GameMeta::not_found())
    }
}

/// A service that maps file content hashes straight to an identifier
/// (the community matcher feeding the primary catalog).
#[async_trait]
pub trait HashMatcher: Send + Sync {
    async fn match_files(&self, files: &[RomFile]) -> Result<HashMatch, ProviderError>;
}

/// The hash database (Hasheous): hash matching plus dereferencing of the
/// cross-referenced igdb/ra records it discovers.
#[async_trait]
pub trait HashDatabase: Send + Sync {
    async fn platform_by_slug(&self, slug: &str) -> Result<PlatformMeta, ProviderError>;

    async fn match_files(
        &self,
        platform_slug: &str,
        files: &[RomFile],
    ) -> Result<HashMatch, ProviderError>;

    /// Dereference the match's igdb cross-reference into a full record.
    async fn igdb_game(&self, matched: &HashMatch) -> Result<GameMeta, ProviderError>;

    /// Dereference the match's ra cross-reference into a full record.
    async fn ra_game(&self, matched: &HashMatch) -> Result<GameMeta, ProviderError>;
}

/// The cover-art catalog (SteamGridDB): tries candidate display names in
/// order and returns artwork for the first hit.
#[async_trait]
pub trait ArtworkProvider: Send + Sync {
    async fn game_by_names(&self, names: &[String]) -> Result<GameMeta, ProviderError>;
}

/// Read-only access to previously stored platforms, used for renamed
/// folder recovery and parent-platform resolution. Owned by the
/// persistence layer; the scanner never writes through it.
#[async_trait]
pub trait PlatformStore: Send + Sync {
    async fn platform_by_fs_slug(&self, fs_slug: &str) -> Option<Platform>;
}

/// Read-only filesystem facts for firmware and asset scanning.
#[async_trait]
pub trait FilesystemFacts: Send + Sync {
    async fn file_size(&self, path: &Path) -> io::Result<u64>;

    async fn file_hashes(&self, path: &Path) -> io::Result<FileHashes>;
}

/// The configured provider adapters, one optional slot per service.
///
/// An empty slot means the provider is unconfigured; the scanner treats
/// it exactly like a not-found answer.
#[derive(Clone, Default)]
pub struct ProviderHub {
    pub igdb: Option<Arc<dyn MetadataProvider>>,
    pub moby: Option<Arc<dyn MetadataProvider>>,
    pub ss: Option<Arc<dyn MetadataProvider>>,
    pub ra: Option<Arc<dyn MetadataProvider>>,
    pub launchbox: Option<Arc<dyn MetadataProvider>>,
    pub tgdb: Option<Arc<dyn MetadataProvider>>,
    pub hasheous: Option<Arc<dyn HashDatabase>>,
    pub playmatch: Option<Arc<dyn HashMatcher>>,
    pub sgdb: Option<Arc<dyn ArtworkProvider>>,
}

impl ProviderHub {
    /// The general-catalog slot for a source, if that source is one.
    pub fn catalog(&self, source: MetadataSource) -> Option<&Arc<dyn MetadataProvider>> {
        match source {
            MetadataSource::Igdb => self.igdb.as_ref(),
            MetadataSource::Moby => self.moby.as_ref(),
            MetadataSource::Ss => self.ss.as_ref(),
            MetadataSource::Ra => self.ra.as_ref(),
            MetadataSource::Launchbox => self.launchbox.as_ref(),
            MetadataSource::Tgdb => self.tgdb.as_ref(),
            MetadataSource::Hasheous | MetadataSource::Sgdb => None,
        }
    }
}

impl std::fmt::Debug for ProviderHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = |present: bool| if present { "configured" } else { "-" };
        f.debug_struct("ProviderHub")
            .field("igdb", &slot(self.igdb.is_some()))
            .field("moby", &slot(self.moby.is_some()))
            .field("ss", &slot(self.ss.is_some()))
            .field("ra", &slot(self.ra.is_some()))
            .field("launchbox", &slot(self.launchbox.is_some()))
            .field("tgdb", &slot(self.tgdb.is_some()))
            .field("hasheous", &slot(self.hasheous.is_some()))
            .field("playmatch", &slot(self.playmatch.is_some()))
            .field("sgdb", &slot(self.sgdb.is_some()))
            .finish()
    }
}
