/// Errors a provider adapter can surface to the scanner.
///
/// Adapters return these only for transport-level failure; "no match" is
/// expressed through the not-found sentinel on the result type, never as
/// an error. The scanner treats every variant the same way: log, degrade
/// to not-found, keep scanning.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited")]
    RateLimit,

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
