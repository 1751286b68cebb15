//! Provisioning error types.

use kc_admin_client::AdminError;
use kc_config::ConfigError;
use thiserror::Error;

/// Result type alias for provisioning operations.
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Provisioning error type.
///
/// Any of these aborts the run; the tool is designed for supervised,
/// re-runnable invocation rather than autonomous recovery, so there is no
/// retry or backoff anywhere.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The configuration document could not be read as requested.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The administrative call failed or was rejected by the server.
    #[error(transparent)]
    Admin(#[from] AdminError),

    /// A create was accepted by the transport but the entity could not be
    /// found by name afterwards.
    #[error("unable to create {kind} '{name}': not found after creation")]
    CreationFailed {
        /// Entity kind, e.g. `client scope`.
        kind: &'static str,
        /// The name or alias the entity was created under.
        name: String,
    },

    /// A property required for creation is missing from the document.
    #[error("property '{path}' is required for '{name}'")]
    MissingProperty {
        /// The missing property's relative path.
        path: &'static str,
        /// The entity the property belongs to.
        name: String,
    },

    /// The identity-provider redirector execution, which the server
    /// creates as part of its default flows, is absent from the flow.
    #[error("identity provider redirector does not exist in flow '{flow}'")]
    RedirectorNotFound {
        /// Alias of the flow that was scanned.
        flow: String,
    },
}
