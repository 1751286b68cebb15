//! Reconciliation of many-to-many assignment sets.
//!
//! The same primitive converges every set-valued relationship the
//! document declares: realm-level default/optional client scopes,
//! per-client default/optional client scopes, realm default groups, and
//! user group memberships.

use std::collections::HashMap;

use tracing::warn;

/// Converges a live assignment set to the desired name list.
///
/// Desired names are resolved to ids through `name_to_id`; names with no
/// live counterpart are reported with a warning and skipped, never
/// silently dropped. Removals are applied before additions so servers
/// that reject duplicate membership never see a transient duplicate.
///
/// `live` holds the `(id, name)` pairs currently attached to the parent.
///
/// # Errors
///
/// Propagates the first error returned by `remove` or `add`.
pub fn reconcile_assignments<E, R, A>(
    kind: &str,
    desired_names: &[String],
    name_to_id: &HashMap<String, String>,
    live: &[(String, String)],
    mut remove: R,
    mut add: A,
) -> Result<(), E>
where
    R: FnMut(&str) -> Result<(), E>,
    A: FnMut(&str) -> Result<(), E>,
{
    let mut desired_ids: Vec<String> = Vec::with_capacity(desired_names.len());
    for name in desired_names {
        match name_to_id.get(name) {
            Some(id) => desired_ids.push(id.clone()),
            None => {
                warn!(kind, name = %name, "skipping assignment; no id found for this name");
            }
        }
    }

    for (id, _) in live {
        if let Some(position) = desired_ids.iter().position(|desired| desired == id) {
            // Already attached; nothing to add later.
            desired_ids.remove(position);
        } else {
            remove(id)?;
        }
    }

    for id in &desired_ids {
        add(id)?;
    }

    Ok(())
}
