//! Phase 1: hash-based matchers.
//!
//! The two hash services run concurrently once gated by policy: the
//! community matcher resolves a primary-catalog id from content hashes,
//! the hash database resolves its own id plus igdb/tgdb/ra
//! cross-references. Their output seeds the later lookup phase and never
//! becomes the final record by itself.

use ludex_core::{FsRom, Platform, Rom};
use ludex_meta::{HashMatch, MetadataSource};

use crate::Scanner;
use crate::policy::ScanPolicy;

/// Joined results of the hash-matcher phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashPhase {
    /// Community matcher result (igdb id at most).
    pub playmatch: HashMatch,
    /// Hash database result (hasheous/igdb/tgdb/ra ids at most).
    pub hasheous: HashMatch,
}

impl HashPhase {
    pub(crate) async fn run(
        scanner: &Scanner,
        policy: &ScanPolicy,
        platform: &Platform,
        prior: Option<&Rom>,
        fs_rom: &FsRom,
    ) -> Self {
        let playmatch = async {
            // The community matcher feeds the primary catalog, so it is
            // gated exactly like an igdb lookup.
            if !policy.should_query(MetadataSource::Igdb, platform, prior) {
                return HashMatch::not_found();
            }
            let Some(matcher) = &scanner.providers.playmatch else {
                return HashMatch::not_found();
            };
            match matcher.match_files(&fs_rom.files).await {
                Ok(matched) => matched,
                Err(e) => {
                    log::warn!("community hash match failed for {}: {}", fs_rom.fs_name, e);
                    HashMatch::not_found()
                }
            }
        };

        let hasheous = async {
            if !policy.should_query(MetadataSource::Hasheous, platform, prior) {
                return HashMatch::not_found();
            }
            let Some(db) = &scanner.providers.hasheous else {
                return HashMatch::not_found();
            };
            match db.match_files(&platform.slug, &fs_rom.files).await {
                Ok(matched) => matched,
                Err(e) => {
                    log::warn!("hash database match failed for {}: {}", fs_rom.fs_name, e);
                    HashMatch::not_found()
                }
            }
        };

        let (playmatch, hasheous) = futures::join!(playmatch, hasheous);
        Self {
            playmatch,
            hasheous,
        }
    }
}
