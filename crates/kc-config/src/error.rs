//! Configuration error types.

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A property exists but does not have the requested shape.
    #[error("property '{path}' must be of type {expected}")]
    TypeMismatch {
        /// The property path that was requested.
        path: String,
        /// The shape the caller asked for.
        expected: &'static str,
    },

    /// The configuration file could not be read.
    #[error("unable to read configuration file '{path}': {source}")]
    Io {
        /// The file that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid JSON.
    #[error("unable to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration document's root is not a JSON object.
    #[error("configuration root must be a JSON object")]
    RootNotObject,

    /// An encoded string value could not be decoded.
    #[error("unable to decode obfuscated value: {0}")]
    Decode(String),
}

impl ConfigError {
    pub(crate) fn type_mismatch(path: &str, expected: &'static str) -> Self {
        Self::TypeMismatch {
            path: path.to_string(),
            expected,
        }
    }
}
