//! User reconciliation, including credentials and group memberships.

use kc_admin_client::types::{CredentialRepresentation, UserRepresentation};
use kc_admin_client::{GroupApi, UserApi};
use kc_config::PropertyGroup;
use tracing::info;

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name, group, sets};

/// Credential type for passwords.
const PASSWORD_CREDENTIAL_TYPE: &str = "password";

/// Converges one user.
///
/// The credential is always rewritten rather than diffed: the server
/// never returns stored secrets, so there is nothing to compare against.
pub(crate) fn reconcile_user<C: UserApi + GroupApi>(
    client: &C,
    realm: &str,
    username: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, user = username, "reconciling user");

    let user = match lookup_user(client, realm, username)? {
        Some(user) => user,
        None => {
            let user = UserRepresentation {
                username: Some(username.to_string()),
                ..Default::default()
            };
            client.create_user(realm, &user)?;
            lookup_user(client, realm, username)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "user",
                    name: username.to_string(),
                }
            })?
        }
    };

    let mut user = user;
    user.enabled = Some(pg.get_bool_or("enabled", true)?);
    if let Some(attributes) = pg.get_group("attributes")? {
        user.attributes = Some(attrs::merge_multi_valued(user.attributes.take(), &attributes)?);
    }
    user.credentials = Some(vec![CredentialRepresentation {
        credential_type: Some(PASSWORD_CREDENTIAL_TYPE.to_string()),
        value: pg.get_string("password")?,
        temporary: Some(pg.get_bool_or("passwordTemporary", false)?),
    }]);
    let user_id = user.id.clone().ok_or_else(|| ProvisionError::CreationFailed {
        kind: "user",
        name: username.to_string(),
    })?;
    client.update_user(realm, &user_id, &user)?;

    // Group memberships.
    if let Some(desired) = pg.get_string_list("groups")? {
        let group_ids = group::group_name_to_id(client, realm)?;
        let live: Vec<(String, String)> = client
            .user_groups(realm, &user_id)?
            .into_iter()
            .filter_map(|g| Some((g.id?, g.name?)))
            .collect();
        sets::reconcile_assignments(
            "group",
            &desired,
            &group_ids,
            &live,
            |group_id| client.leave_group(realm, &user_id, group_id),
            |group_id| client.join_group(realm, &user_id, group_id),
        )?;
    }

    Ok(())
}

fn lookup_user<C: UserApi>(
    client: &C,
    realm: &str,
    username: &str,
) -> ProvisionResult<Option<UserRepresentation>> {
    Ok(find_by_name(client.list_users(realm)?, |u| {
        u.username.as_deref() == Some(username)
    }))
}
