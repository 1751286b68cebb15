//! Group reconciliation.

use std::collections::HashMap;

use kc_admin_client::types::GroupRepresentation;
use kc_admin_client::GroupApi;
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name};

/// Converges one group.
pub(crate) fn reconcile_group<C: GroupApi>(
    client: &C,
    realm: &str,
    name: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, group = name, "reconciling group");

    let group = match lookup_group(client, realm, name)? {
        Some(group) => group,
        None => {
            let group = GroupRepresentation {
                name: Some(name.to_string()),
                ..Default::default()
            };
            client.create_group(realm, &group)?;
            lookup_group(client, realm, name)?.ok_or_else(|| ProvisionError::CreationFailed {
                kind: "group",
                name: name.to_string(),
            })?
        }
    };

    let mut group = group;
    if let Some(attributes) = pg.get_group("attributes")? {
        group.attributes = Some(attrs::merge_multi_valued(group.attributes.take(), &attributes)?);
    }
    let group_id = group.id.clone().ok_or_else(|| ProvisionError::CreationFailed {
        kind: "group",
        name: name.to_string(),
    })?;
    client.update_group(realm, &group_id, &group)?;

    Ok(())
}

/// Maps every group's name to its server id.
pub(crate) fn group_name_to_id<C: GroupApi>(
    client: &C,
    realm: &str,
) -> ProvisionResult<HashMap<String, String>> {
    let mut map = HashMap::new();
    for group in client.list_groups(realm)? {
        if let (Some(name), Some(id)) = (group.name, group.id) {
            map.insert(name, id);
        }
    }
    Ok(map)
}

fn lookup_group<C: GroupApi>(
    client: &C,
    realm: &str,
    name: &str,
) -> ProvisionResult<Option<GroupRepresentation>> {
    Ok(find_by_name(client.list_groups(realm)?, |g| {
        g.name.as_deref() == Some(name)
    }))
}
