//! Identity-provider reconciliation, including mappers.

use std::collections::HashMap;

use kc_admin_client::types::{
    IdentityProviderMapperRepresentation, IdentityProviderRepresentation,
};
use kc_admin_client::IdentityProviderApi;
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name};

/// Config key holding the broker client secret. The live value is masked
/// by the server and must never be written back from a fetched snapshot;
/// it is only set when the document itself declares it.
const CLIENT_SECRET_KEY: &str = "clientSecret";

/// Converges one identity provider and its mappers.
pub(crate) fn reconcile_identity_provider<C: IdentityProviderApi>(
    client: &C,
    realm: &str,
    alias: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, provider = alias, "reconciling identity provider");

    let provider = match lookup_provider(client, realm, alias)? {
        Some(provider) => provider,
        None => {
            let mut provider = IdentityProviderRepresentation {
                alias: Some(alias.to_string()),
                provider_id: pg.get_string("providerId")?,
                ..Default::default()
            };
            if let Some(config) = pg.get_group("config")? {
                provider.config = Some(merged_config(provider.config.take(), &config)?);
            }
            client.create_identity_provider(realm, &provider)?;
            lookup_provider(client, realm, alias)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "identity provider",
                    name: alias.to_string(),
                }
            })?
        }
    };

    let mut provider = provider;
    provider.provider_id = pg.get_string("providerId")?;
    provider.display_name = pg.get_string("displayName")?;
    provider.enabled = Some(pg.get_bool_or("enabled", true)?);
    provider.first_broker_login_flow_alias = pg.get_string("firstBrokerLoginFlowAlias")?;
    provider.post_broker_login_flow_alias = pg.get_string("postBrokerLoginFlowAlias")?;
    if let Some(config) = pg.get_group("config")? {
        provider.config = Some(merged_config(provider.config.take(), &config)?);
    }
    client.update_identity_provider(realm, alias, &provider)?;

    if let Some(mappers) = pg.get_group("mappers")? {
        for (mapper_name, _) in mappers.entries() {
            let Some(mapper_pg) = mappers.get_group(mapper_name)? else {
                continue;
            };
            reconcile_mapper(client, realm, alias, mapper_name, &mapper_pg)?;
        }
    }

    Ok(())
}

/// Converges one identity-provider mapper.
pub(crate) fn reconcile_mapper<C: IdentityProviderApi>(
    client: &C,
    realm: &str,
    alias: &str,
    name: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, mapper = name, "reconciling identity provider mapper");

    let mapper = match lookup_mapper(client, realm, alias, name)? {
        Some(mapper) => mapper,
        None => {
            let mut mapper = IdentityProviderMapperRepresentation {
                name: Some(name.to_string()),
                identity_provider_alias: Some(alias.to_string()),
                identity_provider_mapper: pg.get_string("identityProviderMapper")?,
                ..Default::default()
            };
            if let Some(config) = pg.get_group("config")? {
                mapper.config = Some(attrs::merge_single_valued(mapper.config.take(), &config)?);
            }
            client.create_identity_provider_mapper(realm, alias, &mapper)?;
            lookup_mapper(client, realm, alias, name)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "identity provider mapper",
                    name: name.to_string(),
                }
            })?
        }
    };

    let mut mapper = mapper;
    mapper.identity_provider_alias = Some(alias.to_string());
    mapper.identity_provider_mapper = pg.get_string("identityProviderMapper")?;
    if let Some(config) = pg.get_group("config")? {
        mapper.config = Some(attrs::merge_single_valued(mapper.config.take(), &config)?);
    }
    let mapper_id = mapper.id.clone().ok_or_else(|| ProvisionError::CreationFailed {
        kind: "identity provider mapper",
        name: name.to_string(),
    })?;
    client.update_identity_provider_mapper(realm, alias, &mapper_id, &mapper)?;

    Ok(())
}

/// Merges declared config keys over the live snapshot, with the client
/// secret stripped first so re-applying the document never clobbers a
/// live secret with a masked placeholder.
fn merged_config(
    existing: Option<HashMap<String, String>>,
    declared: &PropertyGroup<'_>,
) -> ProvisionResult<HashMap<String, String>> {
    let mut snapshot = existing.unwrap_or_default();
    snapshot.remove(CLIENT_SECRET_KEY);
    attrs::merge_single_valued(Some(snapshot), declared)
}

fn lookup_provider<C: IdentityProviderApi>(
    client: &C,
    realm: &str,
    alias: &str,
) -> ProvisionResult<Option<IdentityProviderRepresentation>> {
    Ok(find_by_name(client.list_identity_providers(realm)?, |p| {
        p.alias.as_deref() == Some(alias)
    }))
}

fn lookup_mapper<C: IdentityProviderApi>(
    client: &C,
    realm: &str,
    alias: &str,
    name: &str,
) -> ProvisionResult<Option<IdentityProviderMapperRepresentation>> {
    Ok(find_by_name(
        client.list_identity_provider_mappers(realm, alias)?,
        |m| m.name.as_deref() == Some(name),
    ))
}
