use thiserror::Error;

/// Errors that abort scanning an entity.
///
/// Provider failures never appear here: each lookup degrades to a
/// not-found sentinel so one unreachable catalog cannot sink the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Aggregation was invoked with an empty enabled-provider set.
    #[error("no metadata sources configured")]
    NoMetadataSourcesConfigured,

    /// The scan was cancelled; the entity's partial results are dropped.
    #[error("scan cancelled")]
    Cancelled,

    /// I/O error while reading filesystem facts.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
