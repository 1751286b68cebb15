//! # kc-admin-client
//!
//! Client for the Keycloak Admin REST API.
//!
//! The API surface consumed by the provisioner is expressed as one
//! capability trait per entity kind (realms, client scopes, clients,
//! identity providers, authentication flows, groups, users) so that the
//! reconciliation engine stays independent of the transport.
//! [`AdminClient`] is the HTTP implementation; tests substitute in-memory
//! fakes.
//!
//! All operations are blocking: a provisioning run is single-threaded and
//! strictly ordered, so one long-lived authenticated session is reused for
//! every call.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod error;
pub mod rest;
pub mod types;

pub use api::{
    AdminApi, AuthFlowApi, ClientApi, ClientScopeApi, GroupApi, IdentityProviderApi, RealmApi,
    UserApi,
};
pub use error::{AdminError, AdminResult};
pub use rest::AdminClient;
