//! Typed failure conditions for fetching content from a location.

/// Errors produced while fetching or probing a location.
///
/// Filesystem errors pass through unmodified so callers can still match on
/// `std::io::ErrorKind` (not found, permission denied and friends).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The location matched neither the local nor the remote heuristics.
    #[error("unresolved protocol for location: {0}")]
    UnresolvedProtocol(String),

    /// The HTTP request failed below the status-code level
    /// (connection, TLS, timeout). Single attempt, no retry.
    #[error("transport error fetching {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP status {status} fetching {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Local filesystem error, passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
