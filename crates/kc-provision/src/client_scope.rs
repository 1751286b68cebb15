//! Client-scope reconciliation, including protocol mappers.

use std::collections::HashMap;

use kc_admin_client::types::{ClientScopeRepresentation, ProtocolMapperRepresentation};
use kc_admin_client::ClientScopeApi;
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name};

/// Converges one client scope and its protocol mappers.
pub(crate) fn reconcile_client_scope<C: ClientScopeApi>(
    client: &C,
    realm: &str,
    name: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, scope = name, "reconciling client scope");

    let scope = match lookup_scope(client, realm, name)? {
        Some(scope) => scope,
        None => {
            let scope = ClientScopeRepresentation {
                name: Some(name.to_string()),
                ..Default::default()
            };
            client.create_client_scope(realm, &scope)?;
            lookup_scope(client, realm, name)?.ok_or_else(|| ProvisionError::CreationFailed {
                kind: "client scope",
                name: name.to_string(),
            })?
        }
    };

    let mut scope = scope;
    scope.description = pg.get_string("description")?;
    scope.protocol = pg.get_string("protocol")?;
    if let Some(attributes) = pg.get_group("attributes")? {
        scope.attributes = Some(attrs::merge_single_valued(scope.attributes.take(), &attributes)?);
    }
    let scope_id = scope.id.clone().ok_or_else(|| ProvisionError::CreationFailed {
        kind: "client scope",
        name: name.to_string(),
    })?;
    client.update_client_scope(realm, &scope_id, &scope)?;

    if let Some(mappers) = pg.get_group("mappers")? {
        for (mapper_name, _) in mappers.entries() {
            let Some(mapper_pg) = mappers.get_group(mapper_name)? else {
                continue;
            };
            reconcile_protocol_mapper(client, realm, &scope_id, mapper_name, &mapper_pg)?;
        }
    }

    Ok(())
}

/// Converges one protocol mapper under a client scope.
pub(crate) fn reconcile_protocol_mapper<C: ClientScopeApi>(
    client: &C,
    realm: &str,
    scope_id: &str,
    name: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, mapper = name, "reconciling protocol mapper");

    let mapper = match lookup_mapper(client, realm, scope_id, name)? {
        Some(mapper) => mapper,
        None => {
            let mapper = ProtocolMapperRepresentation {
                name: Some(name.to_string()),
                protocol: pg.get_string("protocol")?,
                protocol_mapper: pg.get_string("protocolmapper")?,
                ..Default::default()
            };
            client.create_protocol_mapper(realm, scope_id, &mapper)?;
            lookup_mapper(client, realm, scope_id, name)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "protocol mapper",
                    name: name.to_string(),
                }
            })?
        }
    };

    let mut mapper = mapper;
    mapper.protocol = pg.get_string("protocol")?;
    mapper.protocol_mapper = pg.get_string("protocolmapper")?;
    if let Some(config) = pg.get_group("config")? {
        mapper.config = Some(attrs::merge_single_valued(mapper.config.take(), &config)?);
    }
    let mapper_id = mapper.id.clone().ok_or_else(|| ProvisionError::CreationFailed {
        kind: "protocol mapper",
        name: name.to_string(),
    })?;
    client.update_protocol_mapper(realm, scope_id, &mapper_id, &mapper)?;

    Ok(())
}

/// Maps every client scope's name to its server id.
pub(crate) fn scope_name_to_id<C: ClientScopeApi>(
    client: &C,
    realm: &str,
) -> ProvisionResult<HashMap<String, String>> {
    let mut map = HashMap::new();
    for scope in client.list_client_scopes(realm)? {
        if let (Some(name), Some(id)) = (scope.name, scope.id) {
            map.insert(name, id);
        }
    }
    Ok(map)
}

fn lookup_scope<C: ClientScopeApi>(
    client: &C,
    realm: &str,
    name: &str,
) -> ProvisionResult<Option<ClientScopeRepresentation>> {
    Ok(find_by_name(client.list_client_scopes(realm)?, |s| {
        s.name.as_deref() == Some(name)
    }))
}

fn lookup_mapper<C: ClientScopeApi>(
    client: &C,
    realm: &str,
    scope_id: &str,
    name: &str,
) -> ProvisionResult<Option<ProtocolMapperRepresentation>> {
    Ok(find_by_name(
        client.list_protocol_mappers(realm, scope_id)?,
        |m| m.name.as_deref() == Some(name),
    ))
}
