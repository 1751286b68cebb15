//! # kc-cli
//!
//! Command-line shell for the Keycloak provisioner: argument parsing,
//! logging setup, configuration loading, admin login, and the driver
//! invocation.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
