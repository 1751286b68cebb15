//! Realm reconciliation.
//!
//! A realm is converged in dependency order: client scopes first (ids are
//! needed for scope assignments), then clients, authentication flows,
//! identity providers, groups, users, and finally the realm-level
//! settings themselves in a single update.

use kc_admin_client::types::RealmRepresentation;
use kc_admin_client::{AdminApi, RealmApi};
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{client, client_scope, find_by_name, flow, group, identity_provider, sets, user};

/// Converges one realm and everything it contains.
pub(crate) fn reconcile_realm<C: AdminApi>(
    admin: &C,
    realm_name: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm = realm_name, "reconciling realm");

    let realm = match lookup_realm(admin, realm_name)? {
        Some(realm) => realm,
        None => {
            let realm = RealmRepresentation {
                realm: Some(realm_name.to_string()),
                ..Default::default()
            };
            admin.create_realm(&realm)?;
            lookup_realm(admin, realm_name)?.ok_or_else(|| ProvisionError::CreationFailed {
                kind: "realm",
                name: realm_name.to_string(),
            })?
        }
    };

    // Client scopes come first; everything else references their ids.
    if let Some(scopes) = pg.get_group("clientScopes")? {
        for (scope_name, _) in scopes.entries() {
            let Some(scope_pg) = scopes.get_group(scope_name)? else {
                continue;
            };
            client_scope::reconcile_client_scope(admin, realm_name, scope_name, &scope_pg)?;
        }
    }

    // Realm-level default assigned client scopes.
    if let Some(desired) = pg.get_string_list("defaultDefaultClientScopes")? {
        let scope_ids = client_scope::scope_name_to_id(admin, realm_name)?;
        let live: Vec<(String, String)> = admin
            .default_default_client_scopes(realm_name)?
            .into_iter()
            .filter_map(|s| Some((s.id?, s.name?)))
            .collect();
        sets::reconcile_assignments(
            "client scope",
            &desired,
            &scope_ids,
            &live,
            |id| admin.remove_default_default_client_scope(realm_name, id),
            |id| admin.add_default_default_client_scope(realm_name, id),
        )?;
    }

    // Realm-level optional assigned client scopes.
    if let Some(desired) = pg.get_string_list("defaultOptionalClientScopes")? {
        let scope_ids = client_scope::scope_name_to_id(admin, realm_name)?;
        let live: Vec<(String, String)> = admin
            .default_optional_client_scopes(realm_name)?
            .into_iter()
            .filter_map(|s| Some((s.id?, s.name?)))
            .collect();
        sets::reconcile_assignments(
            "client scope",
            &desired,
            &scope_ids,
            &live,
            |id| admin.remove_default_optional_client_scope(realm_name, id),
            |id| admin.add_default_optional_client_scope(realm_name, id),
        )?;
    }

    // Clients.
    if let Some(clients) = pg.get_group("clients")? {
        let scope_ids = client_scope::scope_name_to_id(admin, realm_name)?;
        for (client_id, _) in clients.entries() {
            let Some(client_pg) = clients.get_group(client_id)? else {
                continue;
            };
            client::reconcile_client(admin, realm_name, client_id, &client_pg, &scope_ids)?;
        }
    }

    // Authentication flows, before identity providers so that broker
    // login flow aliases refer to flows that exist.
    if let Some(flows) = pg.get_group("authenticationFlows")? {
        for (alias, _) in flows.entries() {
            let Some(flow_pg) = flows.get_group(alias)? else {
                continue;
            };
            flow::reconcile_flow(admin, realm_name, alias, &flow_pg)?;
        }
    }

    // Identity providers.
    if let Some(providers) = pg.get_group("identityProviders")? {
        for (alias, _) in providers.entries() {
            let Some(provider_pg) = providers.get_group(alias)? else {
                continue;
            };
            identity_provider::reconcile_identity_provider(
                admin, realm_name, alias, &provider_pg,
            )?;
        }
    }

    // Groups.
    if let Some(groups) = pg.get_group("groups")? {
        for (group_name, _) in groups.entries() {
            let Some(group_pg) = groups.get_group(group_name)? else {
                continue;
            };
            group::reconcile_group(admin, realm_name, group_name, &group_pg)?;
        }
    }

    // Realm default groups.
    if let Some(desired) = pg.get_string_list("defaultGroups")? {
        let group_ids = group::group_name_to_id(admin, realm_name)?;
        let live: Vec<(String, String)> = admin
            .default_groups(realm_name)?
            .into_iter()
            .filter_map(|g| Some((g.id?, g.name?)))
            .collect();
        sets::reconcile_assignments(
            "group",
            &desired,
            &group_ids,
            &live,
            |id| admin.remove_default_group(realm_name, id),
            |id| admin.add_default_group(realm_name, id),
        )?;
    }

    // Users.
    if let Some(users) = pg.get_group("users")? {
        for (username, _) in users.entries() {
            let Some(user_pg) = users.get_group(username)? else {
                continue;
            };
            user::reconcile_user(admin, realm_name, username, &user_pg)?;
        }
    }

    // Realm-level settings are applied last, in one update on the
    // snapshot fetched above.
    let mut realm = realm;
    if let Some(events) = pg.get_group("eventsConfig")? {
        apply_events_settings(&mut realm, &events)?;
    }
    if let Some(browser_flow) = pg.get_string("browserFlow")? {
        realm.browser_flow = Some(browser_flow);
    }
    realm.enabled = Some(pg.get_bool_or("enabled", true)?);
    admin.update_realm(realm_name, &realm)?;

    Ok(())
}

/// Applies the events section onto the realm representation.
fn apply_events_settings(
    realm: &mut RealmRepresentation,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!("applying events settings");

    if let Some(save_login_events) = pg.get_bool("saveLoginEvents")? {
        realm.events_enabled = Some(save_login_events);
    }
    if let Some(expiration) = pg.get_i64("expiration")? {
        realm.events_expiration = Some(expiration);
    }
    if let Some(types) = pg.get_string_list("types")? {
        realm.enabled_event_types = Some(types);
    }
    if let Some(save_admin_events) = pg.get_bool("saveAdminEvents")? {
        realm.admin_events_enabled = Some(save_admin_events);
    }
    Ok(())
}

fn lookup_realm<C: RealmApi>(
    admin: &C,
    realm_name: &str,
) -> ProvisionResult<Option<RealmRepresentation>> {
    Ok(find_by_name(admin.list_realms()?, |r| {
        r.realm.as_deref() == Some(realm_name)
    }))
}
