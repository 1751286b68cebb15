//! Admin client error types.

use thiserror::Error;

/// Result type alias for admin API operations.
pub type AdminResult<T> = Result<T, AdminError>;

/// Admin client error type.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the administrative call.
    ///
    /// The response body is carried verbatim for diagnosis; calls are
    /// never retried.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Admin login failed.
    #[error("authentication error: {0}")]
    Auth(String),
}
