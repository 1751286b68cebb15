//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Applies a configuration document to a Keycloak server.
///
/// The document declares realms, clients, client scopes, identity
/// providers, authentication flows, groups, and users; every run converges
/// the live server to that state and can be repeated safely.
#[derive(Debug, Parser)]
#[command(name = "kc-provision", version)]
pub struct Cli {
    /// Path to the JSON configuration document.
    #[arg(long = "config-file", value_name = "PATH")]
    pub config_file: PathBuf,

    /// Server URL, overriding the document's `keycloak|serverUrl`.
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}
