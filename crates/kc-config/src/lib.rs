//! # kc-config
//!
//! Hierarchical, path-addressed access to the provisioner's JSON
//! configuration document.
//!
//! The document is loaded once into an immutable [`KeycloakConfig`] value
//! and read through [`PropertyGroup`] views using `|`-separated property
//! paths (e.g. `keycloak|realms|tenant1|clients`). String values carrying
//! the `{xor}` prefix are decoded transparently by every string-returning
//! accessor.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod load;
pub mod property;
pub mod secret;

pub use error::{ConfigError, ConfigResult};
pub use load::KeycloakConfig;
pub use property::PropertyGroup;
