//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A required connection setting is missing from the document.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration document could not be loaded.
    #[error(transparent)]
    Load(#[from] kc_config::ConfigError),

    /// Admin login or an administrative call failed.
    #[error(transparent)]
    Admin(#[from] kc_admin_client::AdminError),

    /// Reconciliation failed.
    #[error(transparent)]
    Provision(#[from] kc_provision::ProvisionError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
