//! Mock collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use ludex_core::{FileHashes, FsRom, Platform, RomFile};
use ludex_meta::{
    ArtworkProvider, FilesystemFacts, GameMeta, HashDatabase, HashMatch, HashMatcher,
    MetadataProvider, MetadataSource, PlatformMeta, PlatformRef, PlatformStore, ProviderError,
};

/// A scriptable catalog that records every call made to it.
pub struct MockCatalog {
    source: MetadataSource,
    platform: PlatformMeta,
    game: GameMeta,
    fail: bool,
    calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn not_found(source: MetadataSource) -> Self {
        Self::new(source, GameMeta::not_found())
    }

    pub fn new(source: MetadataSource, game: GameMeta) -> Self {
        Self {
            source,
            platform: PlatformMeta::not_found(),
            game,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A catalog whose every call fails at the transport level.
    pub fn failing(source: MetadataSource) -> Self {
        Self {
            fail: true,
            ..Self::not_found(source)
        }
    }

    pub fn with_platform(mut self, platform: PlatformMeta) -> Self {
        self.platform = platform;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn result<T: Clone>(&self, value: &T) -> Result<T, ProviderError> {
        if self.fail {
            Err(ProviderError::Unavailable("mock transport failure".into()))
        } else {
            Ok(value.clone())
        }
    }
}

#[async_trait]
impl MetadataProvider for MockCatalog {
    fn source(&self) -> MetadataSource {
        self.source
    }

    async fn platform_by_slug(&self, slug: &str) -> Result<PlatformMeta, ProviderError> {
        self.record(format!("platform:{slug}"));
        self.result(&self.platform)
    }

    async fn game_by_name(
        &self,
        name: &str,
        platform: PlatformRef<'_>,
    ) -> Result<GameMeta, ProviderError> {
        self.record(format!(
            "by_name:{}:{}",
            name,
            platform
                .provider_platform_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string())
        ));
        self.result(&self.game)
    }

    async fn game_by_id(&self, id: i64) -> Result<GameMeta, ProviderError> {
        self.record(format!("by_id:{id}"));
        self.result(&self.game)
    }

    async fn game_by_hash(&self, hash: &str) -> Result<GameMeta, ProviderError> {
        self.record(format!("by_hash:{hash}"));
        self.result(&self.game)
    }
}

/// A scriptable hash database.
pub struct MockHashDb {
    platform: PlatformMeta,
    matched: HashMatch,
    igdb_game: GameMeta,
    ra_game: GameMeta,
    calls: Mutex<Vec<String>>,
}

impl MockHashDb {
    pub fn not_found() -> Self {
        Self::new(HashMatch::not_found())
    }

    pub fn new(matched: HashMatch) -> Self {
        Self {
            platform: PlatformMeta::not_found(),
            matched,
            igdb_game: GameMeta::not_found(),
            ra_game: GameMeta::not_found(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_platform(mut self, platform: PlatformMeta) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_igdb_game(mut self, game: GameMeta) -> Self {
        self.igdb_game = game;
        self
    }

    pub fn with_ra_game(mut self, game: GameMeta) -> Self {
        self.ra_game = game;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HashDatabase for MockHashDb {
    async fn platform_by_slug(&self, slug: &str) -> Result<PlatformMeta, ProviderError> {
        self.record(format!("platform:{slug}"));
        Ok(self.platform.clone())
    }

    async fn match_files(
        &self,
        platform_slug: &str,
        files: &[RomFile],
    ) -> Result<HashMatch, ProviderError> {
        self.record(format!("match:{}:{}", platform_slug, files.len()));
        Ok(self.matched)
    }

    async fn igdb_game(&self, _matched: &HashMatch) -> Result<GameMeta, ProviderError> {
        self.record("igdb_game".to_string());
        Ok(self.igdb_game.clone())
    }

    async fn ra_game(&self, _matched: &HashMatch) -> Result<GameMeta, ProviderError> {
        self.record("ra_game".to_string());
        Ok(self.ra_game.clone())
    }
}

/// A scriptable community hash matcher.
pub struct MockMatcher {
    matched: HashMatch,
    calls: Mutex<usize>,
}

impl MockMatcher {
    pub fn not_found() -> Self {
        Self::new(HashMatch::not_found())
    }

    pub fn new(matched: HashMatch) -> Self {
        Self {
            matched,
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl HashMatcher for MockMatcher {
    async fn match_files(&self, _files: &[RomFile]) -> Result<HashMatch, ProviderError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.matched)
    }
}

/// A scriptable cover-art provider that records the name lists it sees.
pub struct MockArtwork {
    game: GameMeta,
    name_calls: Mutex<Vec<Vec<String>>>,
}

impl MockArtwork {
    pub fn not_found() -> Self {
        Self::new(GameMeta::not_found())
    }

    pub fn new(game: GameMeta) -> Self {
        Self {
            game,
            name_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn name_calls(&self) -> Vec<Vec<String>> {
        self.name_calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.name_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ArtworkProvider for MockArtwork {
    async fn game_by_names(&self, names: &[String]) -> Result<GameMeta, ProviderError> {
        self.name_calls.lock().unwrap().push(names.to_vec());
        Ok(self.game.clone())
    }
}

/// An in-memory platform store keyed by fs slug.
#[derive(Default)]
pub struct MemoryStore {
    platforms: HashMap<String, Platform>,
}

impl MemoryStore {
    pub fn with(mut self, platform: Platform) -> Self {
        self.platforms.insert(platform.fs_slug.clone(), platform);
        self
    }
}

#[async_trait]
impl PlatformStore for MemoryStore {
    async fn platform_by_fs_slug(&self, fs_slug: &str) -> Option<Platform> {
        self.platforms.get(fs_slug).cloned()
    }
}

/// Filesystem facts with fixed answers, no disk access.
pub struct MockFs {
    pub size: u64,
    pub hashes: FileHashes,
}

#[async_trait]
impl FilesystemFacts for MockFs {
    async fn file_size(&self, _path: &Path) -> io::Result<u64> {
        Ok(self.size)
    }

    async fn file_hashes(&self, _path: &Path) -> io::Result<FileHashes> {
        Ok(self.hashes.clone())
    }
}

/// A platform every provider has an id for.
pub fn platform_with_ids() -> Platform {
    Platform {
        id: Some(1),
        igdb_id: Some(10),
        moby_id: Some(20),
        ss_id: Some(30),
        ra_id: Some(40),
        launchbox_id: Some(50),
        hasheous_id: Some(60),
        tgdb_id: Some(70),
        slug: "snes".to_string(),
        fs_slug: "snes".to_string(),
        name: "Super Nintendo Entertainment System".to_string(),
        ..Default::default()
    }
}

/// Filesystem facts for a single-file game.
pub fn fs_rom(fs_name: &str) -> FsRom {
    FsRom {
        fs_name: fs_name.to_string(),
        fs_path: "snes/roms".to_string(),
        multi: false,
        files: vec![RomFile {
            file_name: fs_name.to_string(),
            file_size_bytes: 4096,
            crc_hash: Some("deadbeef".to_string()),
            md5_hash: Some("0123456789abcdef0123456789abcdef".to_string()),
            sha1_hash: Some("da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string()),
        }],
        crc_hash: Some("deadbeef".to_string()),
        md5_hash: Some("0123456789abcdef0123456789abcdef".to_string()),
        sha1_hash: Some("da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string()),
        ra_hash: Some("ra-hash-value".to_string()),
    }
}

/// A found game result with the given id and name.
pub fn game(provider_id: i64, name: &str) -> GameMeta {
    GameMeta {
        provider_id: Some(provider_id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// A found platform result with the given id and name.
pub fn platform_meta(provider_id: i64, name: &str) -> PlatformMeta {
    PlatformMeta {
        provider_id: Some(provider_id),
        name: Some(name.to_string()),
        ..Default::default()
    }
}
