//! Keycloak provisioner CLI.
//!
//! Reads a JSON configuration document and converges the target server to
//! the state it declares. Safe to re-run; exits 1 on the first fatal
//! error with a single diagnostic line.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use kc_admin_client::AdminClient;
use kc_cli::output::{error, info, success};
use kc_cli::{Cli, CliError, CliResult};
use kc_config::KeycloakConfig;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Client id used for admin login when the document does not name one.
const DEFAULT_ADMIN_CLIENT_ID: &str = "admin-cli";

fn main() {
    let cli = Cli::parse();

    let filter_layer = if cli.debug {
        EnvFilter::new("kc_provision=debug,kc_admin_client=debug,kc_config=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("kc_provision=info,kc_admin_client=warn"))
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        error(&e.to_string());
        std::process::exit(1);
    }
    success("Reconciliation complete!");
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = KeycloakConfig::from_file(&cli.config_file)?;

    let server_url = match &cli.server {
        Some(server) => server.clone(),
        None => config
            .server_url()?
            .ok_or_else(|| CliError::Config("keycloak|serverUrl is required".to_string()))?,
    };
    let admin_user = config
        .admin_user()?
        .ok_or_else(|| CliError::Config("keycloak|adminUser is required".to_string()))?;
    let admin_password = config
        .admin_password()?
        .ok_or_else(|| CliError::Config("keycloak|adminPassword is required".to_string()))?;
    let admin_client_id = config
        .admin_client_id()?
        .unwrap_or_else(|| DEFAULT_ADMIN_CLIENT_ID.to_string());

    info(&format!(
        "Applying '{}' to {}...",
        cli.config_file.display(),
        server_url
    ));

    let admin = AdminClient::login(&server_url, &admin_user, &admin_password, &admin_client_id)?;
    kc_provision::apply(&admin, &config)?;
    Ok(())
}
