//! Client reconciliation, including scope assignments.

use std::collections::HashMap;

use kc_admin_client::types::ClientRepresentation;
use kc_admin_client::ClientApi;
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name, sets};

/// Converges one client and its default/optional scope assignments.
///
/// `scope_ids` maps every known client-scope name to its server id and is
/// computed once per realm by the caller.
pub(crate) fn reconcile_client<C: ClientApi>(
    client: &C,
    realm: &str,
    client_id: &str,
    pg: &PropertyGroup<'_>,
    scope_ids: &HashMap<String, String>,
) -> ProvisionResult<()> {
    info!(realm, client = client_id, "reconciling client");

    let representation = match lookup_client(client, realm, client_id)? {
        Some(representation) => representation,
        None => {
            let representation = ClientRepresentation {
                client_id: Some(client_id.to_string()),
                ..Default::default()
            };
            client.create_client(realm, &representation)?;
            lookup_client(client, realm, client_id)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "client",
                    name: client_id.to_string(),
                }
            })?
        }
    };

    let mut representation = representation;
    representation.name = pg.get_string("name")?;
    representation.description = pg.get_string("description")?;
    representation.consent_required = Some(pg.get_bool_or("consentRequired", false)?);
    representation.standard_flow_enabled = Some(pg.get_bool_or("standardFlowEnabled", true)?);
    representation.service_accounts_enabled =
        Some(pg.get_bool_or("serviceAccountsEnabled", false)?);
    representation.direct_access_grants_enabled =
        Some(pg.get_bool_or("enableDirectAccess", false)?);
    representation.bearer_only = Some(pg.get_bool_or("bearerOnly", false)?);

    let public_client = pg.get_bool_or("publicClient", false)?;
    representation.public_client = Some(public_client);
    if !public_client {
        // Only confidential clients carry an authenticator.
        representation.client_authenticator_type = pg.get_string("clientAuthenticatorType")?;
    }

    if let Some(attributes) = pg.get_group("attributes")? {
        representation.attributes =
            Some(attrs::merge_single_valued(representation.attributes.take(), &attributes)?);
    }

    representation.root_url = pg.get_string("rootURL")?;
    representation.redirect_uris = pg.get_string_list("redirectURIs")?;
    representation.admin_url = pg.get_string("adminURL")?;
    representation.web_origins = pg.get_string_list("webOrigins")?;

    let id = representation
        .id
        .clone()
        .ok_or_else(|| ProvisionError::CreationFailed {
            kind: "client",
            name: client_id.to_string(),
        })?;
    client.update_client(realm, &id, &representation)?;

    // Default assigned client scopes.
    if let Some(desired) = pg.get_string_list("defaultClientScopes")? {
        let live: Vec<(String, String)> = client
            .default_client_scopes(realm, &id)?
            .into_iter()
            .filter_map(|s| Some((s.id?, s.name?)))
            .collect();
        sets::reconcile_assignments(
            "client scope",
            &desired,
            scope_ids,
            &live,
            |scope_id| client.remove_default_client_scope(realm, &id, scope_id),
            |scope_id| client.add_default_client_scope(realm, &id, scope_id),
        )?;
    }

    // Optional assigned client scopes.
    if let Some(desired) = pg.get_string_list("optionalClientScopes")? {
        let live: Vec<(String, String)> = client
            .optional_client_scopes(realm, &id)?
            .into_iter()
            .filter_map(|s| Some((s.id?, s.name?)))
            .collect();
        sets::reconcile_assignments(
            "client scope",
            &desired,
            scope_ids,
            &live,
            |scope_id| client.remove_optional_client_scope(realm, &id, scope_id),
            |scope_id| client.add_optional_client_scope(realm, &id, scope_id),
        )?;
    }

    Ok(())
}

fn lookup_client<C: ClientApi>(
    client: &C,
    realm: &str,
    client_id: &str,
) -> ProvisionResult<Option<ClientRepresentation>> {
    Ok(find_by_name(client.list_clients(realm)?, |c| {
        c.client_id.as_deref() == Some(client_id)
    }))
}
