//! Identification and metadata-reconciliation engine.
//!
//! Given filesystem-derived platform and game facts, the scanner decides
//! which external catalogs to consult (per scan mode and per record),
//! queries them in dependency order — hash matchers first, then the
//! general catalogs, then cover art — and merges their partial,
//! possibly-conflicting answers into one canonical record under fixed
//! precedence rules.
//!
//! The engine owns no network clients and no storage: providers, the
//! platform store and filesystem facts are collaborator traits from
//! `ludex-meta`. Every phase joins all of its lookups before the next
//! phase starts, so merge order is fixed by the precedence tables, never
//! by completion order, and a `Scanner` holds no per-scan mutable state,
//! so independent entities may be scanned concurrently.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ludex_meta::{FilesystemFacts, PlatformStore, ProviderHub};

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fs_scan;
pub mod hash_stage;
pub mod log;
pub mod platform;
pub mod policy;

pub use aggregate::LookupPhase;
pub use config::ScanConfig;
pub use error::ScanError;
pub use fs_scan::LocalFilesystem;
pub use hash_stage::HashPhase;
pub use log::{ScanLog, ScanLogEntry, ScanSummary};
pub use platform::PlatformLookups;
pub use policy::{ScanPolicy, ScanType};

/// The scanning engine, wired to its collaborators.
///
/// All scan methods take `&self` and keep their working state on the
/// stack; one `Scanner` may drive any number of concurrent scans.
pub struct Scanner {
    pub(crate) providers: Arc<ProviderHub>,
    pub(crate) store: Arc<dyn PlatformStore>,
    pub(crate) fs: Arc<dyn FilesystemFacts>,
    pub(crate) config: ScanConfig,
    cancel: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(
        providers: Arc<ProviderHub>,
        store: Arc<dyn PlatformStore>,
        config: ScanConfig,
    ) -> Self {
        Self {
            providers,
            store,
            fs: Arc::new(LocalFilesystem),
            config,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replace the default filesystem facts implementation.
    pub fn with_filesystem(mut self, fs: Arc<dyn FilesystemFacts>) -> Self {
        self.fs = fs;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Flag the coordinator can set to cancel in-flight scans. A
    /// cancelled entity errors out between phases before any merge, so no
    /// partial record is ever produced.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), ScanError> {
        if self.cancel.load(Ordering::Relaxed) {
            Err(ScanError::Cancelled)
        } else {
            Ok(())
        }
    }
}
