//! Authentication-flow tree reconciliation.
//!
//! A flow is an ordered tree of executions: leaf authenticators and
//! nested sub-flows, each with its own ordered children. The Admin API
//! only supports appending an execution to a named flow and reading
//! executions back indexed by *display name*, which for a sub-flow does
//! not reliably match the alias used to create it. The builder therefore
//! works get-or-create by display name within the immediate parent, never
//! by position, and patches the alias and requirement of a sub-flow right
//! after creation (the create call cannot set either).
//!
//! Declared children are walked in document order on every run; the tree
//! is rebuilt idempotently with no persisted marker. Executions that
//! exist remotely but are no longer declared are left alone.

use kc_admin_client::types::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigRepresentation, NewFlowExecution,
};
use kc_admin_client::AuthFlowApi;
use kc_config::PropertyGroup;
use tracing::{debug, info, warn};

use crate::error::{ProvisionError, ProvisionResult};
use crate::{attrs, find_by_name};

/// Provider id of the redirector execution the server creates in its own
/// default browser flow. This tool updates it but never creates it.
const IDENTITY_PROVIDER_REDIRECTOR: &str = "identity-provider-redirector";

/// Flow implementation used for sub-flows when the document does not name
/// one.
const BASIC_FLOW: &str = "basic-flow";

/// Converges one top-level authentication flow and its execution tree.
pub(crate) fn reconcile_flow<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    alias: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    info!(realm, flow = alias, "reconciling authentication flow");

    if lookup_flow(client, realm, alias)?.is_none() {
        let flow = AuthenticationFlowRepresentation {
            alias: Some(alias.to_string()),
            description: pg.get_string("description")?,
            provider_id: pg.get_string("providerId")?,
            top_level: Some(true),
            built_in: Some(pg.get_bool_or("builtIn", false)?),
            ..Default::default()
        };
        let created_id = client.create_flow(realm, &flow)?;
        debug!(realm, flow = alias, id = ?created_id, "created flow");
        if lookup_flow(client, realm, alias)?.is_none() {
            return Err(ProvisionError::CreationFailed {
                kind: "authentication flow",
                name: alias.to_string(),
            });
        }
    }

    // Creation and update share the same recursive builder.
    if let Some(executions) = pg.get_group("authenticationExecutions")? {
        build_executions(client, realm, alias, &executions)?;
    }

    if let Some(redirector) = pg.get_group("identityProviderRedirector")? {
        reconcile_redirector(client, realm, alias, &redirector)?;
    }

    Ok(())
}

/// Walks the declared children of `parent_alias` in document order,
/// converging each leaf or sub-flow and recursing into sub-flow children.
fn build_executions<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    parent_alias: &str,
    executions: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    for (name, _) in executions.entries() {
        let Some(entry) = executions.get_group(name)? else {
            continue;
        };
        if entry.get_bool_or("authenticatorFlow", false)? {
            reconcile_subflow(client, realm, parent_alias, name, &entry)?;
        } else {
            reconcile_authenticator(client, realm, parent_alias, name, &entry)?;
        }
    }
    Ok(())
}

/// Converges a nested sub-flow within `parent_alias`, then recurses into
/// its declared children.
fn reconcile_subflow<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    parent_alias: &str,
    name: &str,
    entry: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    debug!(realm, parent = parent_alias, subflow = name, "reconciling sub-flow");

    let mut execution = match lookup_execution(client, realm, parent_alias, name)? {
        Some(execution) => execution,
        None => {
            let params = NewFlowExecution {
                alias: Some(name.to_string()),
                flow_type: Some(
                    entry
                        .get_string("providerId")?
                        .unwrap_or_else(|| BASIC_FLOW.to_string()),
                ),
                provider: None,
                description: entry.get_string("description")?,
            };
            let created_id = client.add_execution_flow(realm, parent_alias, &params)?;
            locate_appended_subflow(client, realm, parent_alias, name, created_id)?
        }
    };

    // The create call stores the alias as the display name and accepts no
    // requirement; both must be patched through an execution update.
    execution.alias = Some(name.to_string());
    execution.requirement = entry.get_string("requirement")?;
    client.update_execution(realm, parent_alias, &execution)?;

    // The sub-flow's own children hang off the alias we just patched in.
    if let Some(children) = entry.get_group("authenticationExecutions")? {
        build_executions(client, realm, name, &children)?;
    }

    Ok(())
}

/// Finds the execution created by an `add_execution_flow` call.
///
/// Preferred: match the flow id returned by the transport. Next: match
/// the declared name against display names. Last resort: take the final
/// entry of the listing, relying on list order being append order — an
/// undocumented behavior of the server, kept only as a fallback.
fn locate_appended_subflow<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    parent_alias: &str,
    name: &str,
    created_id: Option<String>,
) -> ProvisionResult<AuthenticationExecutionInfoRepresentation> {
    let executions = client.list_executions(realm, parent_alias)?;

    if let Some(id) = created_id {
        if let Some(execution) = executions
            .iter()
            .find(|e| e.flow_id.as_deref() == Some(id.as_str()))
        {
            return Ok(execution.clone());
        }
    }

    if let Some(execution) = executions
        .iter()
        .find(|e| e.display_name.as_deref() == Some(name))
    {
        return Ok(execution.clone());
    }

    warn!(
        realm,
        parent = parent_alias,
        subflow = name,
        "created sub-flow not found by id or display name; assuming the last listed execution is the one just appended"
    );
    executions
        .into_iter()
        .last()
        .ok_or_else(|| ProvisionError::CreationFailed {
            kind: "sub-flow execution",
            name: name.to_string(),
        })
}

/// Converges a leaf authenticator execution within `parent_alias`.
fn reconcile_authenticator<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    parent_alias: &str,
    name: &str,
    entry: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    debug!(realm, parent = parent_alias, execution = name, "reconciling execution");

    let provider =
        entry
            .get_string("authenticator")?
            .ok_or_else(|| ProvisionError::MissingProperty {
                path: "authenticator",
                name: name.to_string(),
            })?;

    let mut execution = match lookup_execution(client, realm, parent_alias, name)? {
        Some(execution) => execution,
        None => {
            client.add_execution(realm, parent_alias, &provider)?;
            lookup_execution(client, realm, parent_alias, name)?.ok_or_else(|| {
                ProvisionError::CreationFailed {
                    kind: "execution",
                    name: name.to_string(),
                }
            })?
        }
    };

    if let Some(config) = entry.get_group("config")? {
        let config_alias = entry.get_string("configAlias")?;
        let config_id = apply_execution_config(
            client,
            realm,
            parent_alias,
            &execution,
            config_alias.as_deref(),
            &config,
        )?;
        execution.authentication_config = Some(config_id);
    }

    execution.requirement = entry.get_string("requirement")?;
    client.update_execution(realm, parent_alias, &execution)?;

    Ok(())
}

/// Resolves or creates the named authenticator config of an execution and
/// overwrites its config map. Returns the config id.
///
/// Resolution goes through the execution's existing config reference; a
/// fresh config captures its id from the create response, falling back to
/// re-reading the execution when the transport exposes no id.
fn apply_execution_config<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    parent_alias: &str,
    execution: &AuthenticationExecutionInfoRepresentation,
    config_alias: Option<&str>,
    config: &PropertyGroup<'_>,
) -> ProvisionResult<String> {
    let display_name = execution.display_name.clone().unwrap_or_default();

    let mut representation = match execution.authentication_config.as_deref() {
        Some(config_id) => client.get_authenticator_config(realm, config_id)?,
        None => {
            let execution_id =
                execution
                    .id
                    .as_deref()
                    .ok_or_else(|| ProvisionError::CreationFailed {
                        kind: "authenticator config",
                        name: display_name.clone(),
                    })?;
            let mut fresh = AuthenticatorConfigRepresentation {
                alias: config_alias.map(str::to_string),
                ..Default::default()
            };
            match client.create_execution_config(realm, execution_id, &fresh)? {
                Some(id) => {
                    debug!(realm, config = ?config_alias, %id, "created authenticator config");
                    fresh.id = Some(id);
                    fresh
                }
                None => {
                    // No id in the create response; the execution now
                    // carries the reference, so read it back.
                    let refreshed =
                        lookup_execution(client, realm, parent_alias, &display_name)?
                            .and_then(|e| e.authentication_config);
                    let config_id =
                        refreshed.ok_or_else(|| ProvisionError::CreationFailed {
                            kind: "authenticator config",
                            name: display_name.clone(),
                        })?;
                    client.get_authenticator_config(realm, &config_id)?
                }
            }
        }
    };

    if let Some(alias) = config_alias {
        representation.alias = Some(alias.to_string());
    }
    representation.config = Some(attrs::config_map(config)?);

    let config_id = representation
        .id
        .clone()
        .ok_or_else(|| ProvisionError::CreationFailed {
            kind: "authenticator config",
            name: display_name,
        })?;
    client.update_authenticator_config(realm, &config_id, &representation)?;
    Ok(config_id)
}

/// Converges the identity-provider redirector of a flow: updates its
/// requirement and resolves-or-creates its authenticator config.
fn reconcile_redirector<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    flow_alias: &str,
    pg: &PropertyGroup<'_>,
) -> ProvisionResult<()> {
    let config_alias = pg.get_string("alias")?;
    info!(realm, flow = flow_alias, redirector = ?config_alias, "reconciling identity provider redirector");

    let mut redirector = lookup_redirector(client, realm, flow_alias)?;
    redirector.requirement = pg.get_string("requirement")?;
    client.update_execution(realm, flow_alias, &redirector)?;

    // Re-read so a config created below attaches to fresh state.
    let redirector = lookup_redirector(client, realm, flow_alias)?;
    if let Some(config) = pg.get_group("config")? {
        apply_execution_config(
            client,
            realm,
            flow_alias,
            &redirector,
            config_alias.as_deref(),
            &config,
        )?;
    }

    Ok(())
}

fn lookup_flow<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    alias: &str,
) -> ProvisionResult<Option<AuthenticationFlowRepresentation>> {
    Ok(find_by_name(client.list_flows(realm)?, |f| {
        f.alias.as_deref() == Some(alias)
    }))
}

/// Looks up an execution by display name within the listing of
/// `flow_alias`. Matching is never positional.
fn lookup_execution<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    flow_alias: &str,
    display_name: &str,
) -> ProvisionResult<Option<AuthenticationExecutionInfoRepresentation>> {
    Ok(find_by_name(client.list_executions(realm, flow_alias)?, |e| {
        e.display_name.as_deref() == Some(display_name)
    }))
}

fn lookup_redirector<C: AuthFlowApi>(
    client: &C,
    realm: &str,
    flow_alias: &str,
) -> ProvisionResult<AuthenticationExecutionInfoRepresentation> {
    find_by_name(client.list_executions(realm, flow_alias)?, |e| {
        e.provider_id.as_deref() == Some(IDENTITY_PROVIDER_REDIRECTOR)
    })
    .ok_or_else(|| ProvisionError::RedirectorNotFound {
        flow: flow_alias.to_string(),
    })
}
