//! Stop finder error types.

/// Errors that can occur when looking up stops.
///
/// Every variant is a lookup failure from the caller's point of view; the
/// controller renders all of them the same way.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Mock data could not be loaded or was scripted to fail
    #[error("mock stop finder: {message}")]
    Mock { message: String },
}
