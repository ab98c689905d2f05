//! Provider seam for the ludex scanner.
//!
//! The scanner consumes external metadata catalogs (IGDB, MobyGames,
//! ScreenScraper, RetroAchievements, LaunchBox, Hasheous, TheGamesDB,
//! SteamGridDB) through the async traits defined here; the HTTP adapters
//! implementing them live outside this workspace. Every lookup returns a
//! sparse partial record with an explicit provider id — a result whose id
//! is absent is a not-found sentinel and contributes nothing to any merge.

pub mod error;
pub mod provider;
pub mod result;
pub mod source;

pub use error::ProviderError;
pub use provider::{
    ArtworkProvider, FilesystemFacts, HashDatabase, HashMatcher, MetadataProvider, PlatformRef,
    PlatformStore, ProviderHub,
};
pub use result::{GameMeta, HashMatch, PlatformMeta};
pub use source::{
    ALL_SOURCES, GAME_MERGE_ORDER, MetadataSource, PLATFORM_MERGE_ORDER, SourceSet,
};
