//! # kc-provision
//!
//! Reconciliation engine that converges a Keycloak server to the state
//! declared in a configuration document.
//!
//! Each entity kind follows the same state machine: look the entity up by
//! name in a full listing, create a minimal representation and re-fetch it
//! if absent (a create that cannot be found again is fatal), apply the
//! full set of declared fields, then recurse into children. Set-valued
//! relationships converge through a single add/remove diff primitive, and
//! authentication flows through a recursive tree builder.
//!
//! Reconciliation is additive and updating only: entities that exist
//! remotely but are not declared in the document are never deleted.
//! A run is strictly sequential and must not execute concurrently with
//! another run against the same realm.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod sets;

mod attrs;
mod client;
mod client_scope;
mod flow;
mod group;
mod identity_provider;
mod realm;
mod user;

use kc_admin_client::AdminApi;
use kc_config::KeycloakConfig;

pub use error::{ProvisionError, ProvisionResult};

/// Converges the server to the state declared in `config`.
///
/// Walks the document's `keycloak|realms` section in document order and
/// reconciles each realm. A missing realms section means there is nothing
/// to do.
///
/// # Errors
///
/// Returns the first [`ProvisionError`] encountered; the run stops there
/// and is expected to be re-invoked after the cause is addressed.
pub fn apply<C: AdminApi>(admin: &C, config: &KeycloakConfig) -> ProvisionResult<()> {
    let Some(realms) = config.realms()? else {
        return Ok(());
    };
    for (realm_name, _) in realms.entries() {
        let Some(realm_pg) = realms.get_group(realm_name)? else {
            continue;
        };
        realm::reconcile_realm(admin, realm_name, &realm_pg)?;
    }
    Ok(())
}

/// Linear-scan lookup over a full listing.
///
/// The Admin API offers no indexed lookup by name, so every get-or-create
/// step lists all entities of a kind and scans for a match. Kept as an
/// explicit helper so a collaborator with indexed lookup could replace the
/// call sites without touching reconciler logic.
pub(crate) fn find_by_name<T>(items: Vec<T>, matches: impl Fn(&T) -> bool) -> Option<T> {
    items.into_iter().find(|item| matches(item))
}
