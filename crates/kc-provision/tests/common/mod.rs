//! In-memory fake of the Admin API capability traits.
//!
//! The fake reproduces the server behaviors the reconciler has to work
//! around: executions are listed flattened in append order and indexed by
//! display name, a created sub-flow stores its alias as the display name
//! and ignores requirement, and created resources expose their ids the
//! way a Location header would (switchable off to exercise the fallback
//! lookup paths).

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use kc_admin_client::types::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigRepresentation, ClientRepresentation, ClientScopeRepresentation,
    GroupRepresentation, IdentityProviderMapperRepresentation, IdentityProviderRepresentation,
    NewFlowExecution, ProtocolMapperRepresentation, RealmRepresentation, UserRepresentation,
};
use kc_admin_client::{
    AdminError, AdminResult, AuthFlowApi, ClientApi, ClientScopeApi, GroupApi,
    IdentityProviderApi, RealmApi, UserApi,
};

#[derive(Default)]
struct RealmState {
    representation: RealmRepresentation,
    scopes: Vec<ClientScopeRepresentation>,
    scope_mappers: BTreeMap<String, Vec<ProtocolMapperRepresentation>>,
    clients: Vec<ClientRepresentation>,
    client_default_scopes: BTreeMap<String, Vec<String>>,
    client_optional_scopes: BTreeMap<String, Vec<String>>,
    realm_default_scopes: Vec<String>,
    realm_optional_scopes: Vec<String>,
    providers: Vec<IdentityProviderRepresentation>,
    provider_mappers: BTreeMap<String, Vec<IdentityProviderMapperRepresentation>>,
    flows: Vec<AuthenticationFlowRepresentation>,
    /// Direct children per flow id, in append order.
    executions: BTreeMap<String, Vec<AuthenticationExecutionInfoRepresentation>>,
    configs: BTreeMap<String, AuthenticatorConfigRepresentation>,
    groups: Vec<GroupRepresentation>,
    default_groups: Vec<String>,
    users: Vec<UserRepresentation>,
    memberships: BTreeMap<String, Vec<String>>,
}

/// In-memory Admin API double.
pub struct FakeAdmin {
    realms: RefCell<BTreeMap<String, RealmState>>,
    next_id: Cell<u64>,
    /// When false, create calls stop reporting ids, the way a transport
    /// without Location headers would.
    location_ids: Cell<bool>,
}

impl Default for FakeAdmin {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeAdmin {
    pub fn new() -> Self {
        Self {
            realms: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
            location_ids: Cell::new(true),
        }
    }

    /// Disables id reporting on create calls.
    pub fn without_location_ids(self) -> Self {
        self.location_ids.set(false);
        self
    }

    fn next_id(&self, prefix: &str) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("{prefix}-{n}")
    }

    fn maybe_id(&self, id: &str) -> Option<String> {
        if self.location_ids.get() {
            Some(id.to_string())
        } else {
            None
        }
    }

    fn with_realm<T>(
        &self,
        realm: &str,
        f: impl FnOnce(&mut RealmState) -> AdminResult<T>,
    ) -> AdminResult<T> {
        let mut realms = self.realms.borrow_mut();
        let state = realms.get_mut(realm).ok_or_else(|| AdminError::Api {
            status: 404,
            message: format!("Realm not found: {realm}"),
        })?;
        f(state)
    }

    /// Seeds a pre-existing flow containing the server-created
    /// identity-provider redirector execution.
    pub fn seed_flow_with_redirector(&self, realm: &str, alias: &str) {
        let flow_id = self.next_id("flow");
        let execution_id = self.next_id("execution");
        let mut realms = self.realms.borrow_mut();
        let state = realms.entry(realm.to_string()).or_insert_with(|| {
            let mut state = RealmState::default();
            state.representation = RealmRepresentation {
                id: Some(format!("realm-{realm}")),
                realm: Some(realm.to_string()),
                ..Default::default()
            };
            state
        });
        state.flows.push(AuthenticationFlowRepresentation {
            id: Some(flow_id.clone()),
            alias: Some(alias.to_string()),
            provider_id: Some("basic-flow".to_string()),
            top_level: Some(true),
            built_in: Some(true),
            ..Default::default()
        });
        state.executions.insert(
            flow_id,
            vec![AuthenticationExecutionInfoRepresentation {
                id: Some(execution_id),
                display_name: Some("Identity Provider Redirector".to_string()),
                provider_id: Some("identity-provider-redirector".to_string()),
                requirement: Some("DISABLED".to_string()),
                configurable: Some(true),
                authentication_flow: Some(false),
                ..Default::default()
            }],
        );
    }

    /// Writes one live identity-provider config value, the way the server
    /// would hold state this tool did not put there.
    pub fn set_identity_provider_config(&self, realm: &str, alias: &str, key: &str, value: &str) {
        let mut realms = self.realms.borrow_mut();
        let state = realms.get_mut(realm).expect("realm must exist");
        let provider = state
            .providers
            .iter_mut()
            .find(|p| p.alias.as_deref() == Some(alias))
            .expect("provider must exist");
        provider
            .config
            .get_or_insert_with(Default::default)
            .insert(key.to_string(), value.to_string());
    }

    /// Returns all authenticator configs of a realm.
    pub fn authenticator_configs(&self, realm: &str) -> Vec<AuthenticatorConfigRepresentation> {
        self.realms.borrow()[realm].configs.values().cloned().collect()
    }

    /// Returns the identity-provider config map of a provider.
    pub fn identity_provider_config(
        &self,
        realm: &str,
        alias: &str,
    ) -> BTreeMap<String, String> {
        self.realms.borrow()[realm]
            .providers
            .iter()
            .find(|p| p.alias.as_deref() == Some(alias))
            .and_then(|p| p.config.clone())
            .map(|config| config.into_iter().collect())
            .unwrap_or_default()
    }

    /// Returns the stored realm representation.
    pub fn realm_representation(&self, realm: &str) -> RealmRepresentation {
        self.realms.borrow()[realm].representation.clone()
    }

    /// Returns the stored user representation.
    pub fn user(&self, realm: &str, username: &str) -> UserRepresentation {
        self.realms.borrow()[realm]
            .users
            .iter()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned()
            .expect("user must exist")
    }

    fn flow_id_by_alias(state: &RealmState, alias: &str) -> AdminResult<String> {
        state
            .flows
            .iter()
            .find(|f| f.alias.as_deref() == Some(alias))
            .and_then(|f| f.id.clone())
            .ok_or_else(|| AdminError::Api {
                status: 404,
                message: format!("Flow not found: {alias}"),
            })
    }

    fn flatten_executions(
        state: &RealmState,
        flow_id: &str,
        level: i32,
        out: &mut Vec<AuthenticationExecutionInfoRepresentation>,
    ) {
        if let Some(children) = state.executions.get(flow_id) {
            for (index, child) in children.iter().enumerate() {
                let mut child = child.clone();
                child.level = Some(level);
                child.index = Some(index as i32);
                let nested = child.flow_id.clone();
                out.push(child);
                if let Some(nested_id) = nested {
                    Self::flatten_executions(state, &nested_id, level + 1, out);
                }
            }
        }
    }

    fn find_execution_mut<'a>(
        state: &'a mut RealmState,
        execution_id: &str,
    ) -> Option<&'a mut AuthenticationExecutionInfoRepresentation> {
        state
            .executions
            .values_mut()
            .flat_map(|children| children.iter_mut())
            .find(|e| e.id.as_deref() == Some(execution_id))
    }
}

impl RealmApi for FakeAdmin {
    fn list_realms(&self) -> AdminResult<Vec<RealmRepresentation>> {
        Ok(self
            .realms
            .borrow()
            .values()
            .map(|state| state.representation.clone())
            .collect())
    }

    fn create_realm(&self, realm: &RealmRepresentation) -> AdminResult<()> {
        let name = realm.realm.clone().ok_or_else(|| AdminError::Api {
            status: 400,
            message: "realm name is required".to_string(),
        })?;
        let mut representation = realm.clone();
        representation.id = Some(self.next_id("realm"));
        let mut state = RealmState::default();
        state.representation = representation;
        self.realms.borrow_mut().insert(name, state);
        Ok(())
    }

    fn update_realm(&self, realm_name: &str, realm: &RealmRepresentation) -> AdminResult<()> {
        self.with_realm(realm_name, |state| {
            state.representation = realm.clone();
            Ok(())
        })
    }

    fn default_default_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state.realm_default_scopes.clone();
            Ok(state
                .scopes
                .iter()
                .filter(|s| s.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn add_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            if state.realm_default_scopes.iter().any(|id| id == scope_id) {
                return Err(AdminError::Api {
                    status: 409,
                    message: "scope already assigned".to_string(),
                });
            }
            state.realm_default_scopes.push(scope_id.to_string());
            Ok(())
        })
    }

    fn remove_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state.realm_default_scopes.retain(|id| id != scope_id);
            Ok(())
        })
    }

    fn default_optional_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state.realm_optional_scopes.clone();
            Ok(state
                .scopes
                .iter()
                .filter(|s| s.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn add_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state.realm_optional_scopes.push(scope_id.to_string());
            Ok(())
        })
    }

    fn remove_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state.realm_optional_scopes.retain(|id| id != scope_id);
            Ok(())
        })
    }

    fn default_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state.default_groups.clone();
            Ok(state
                .groups
                .iter()
                .filter(|g| g.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn add_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state.default_groups.push(group_id.to_string());
            Ok(())
        })
    }

    fn remove_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state.default_groups.retain(|id| id != group_id);
            Ok(())
        })
    }
}

impl ClientScopeApi for FakeAdmin {
    fn list_client_scopes(&self, realm: &str) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.with_realm(realm, |state| Ok(state.scopes.clone()))
    }

    fn create_client_scope(
        &self,
        realm: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()> {
        let id = self.next_id("scope");
        self.with_realm(realm, |state| {
            let mut scope = scope.clone();
            scope.id = Some(id);
            state.scopes.push(scope);
            Ok(())
        })
    }

    fn update_client_scope(
        &self,
        realm: &str,
        scope_id: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let existing = state
                .scopes
                .iter_mut()
                .find(|s| s.id.as_deref() == Some(scope_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "scope not found".to_string(),
                })?;
            *existing = scope.clone();
            Ok(())
        })
    }

    fn list_protocol_mappers(
        &self,
        realm: &str,
        scope_id: &str,
    ) -> AdminResult<Vec<ProtocolMapperRepresentation>> {
        self.with_realm(realm, |state| {
            Ok(state.scope_mappers.get(scope_id).cloned().unwrap_or_default())
        })
    }

    fn create_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()> {
        let id = self.next_id("mapper");
        self.with_realm(realm, |state| {
            let mut mapper = mapper.clone();
            mapper.id = Some(id);
            state
                .scope_mappers
                .entry(scope_id.to_string())
                .or_default()
                .push(mapper);
            Ok(())
        })
    }

    fn update_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let mappers = state.scope_mappers.entry(scope_id.to_string()).or_default();
            let existing = mappers
                .iter_mut()
                .find(|m| m.id.as_deref() == Some(mapper_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "mapper not found".to_string(),
                })?;
            *existing = mapper.clone();
            Ok(())
        })
    }
}

impl ClientApi for FakeAdmin {
    fn list_clients(&self, realm: &str) -> AdminResult<Vec<ClientRepresentation>> {
        self.with_realm(realm, |state| Ok(state.clients.clone()))
    }

    fn create_client(&self, realm: &str, client: &ClientRepresentation) -> AdminResult<()> {
        let id = self.next_id("client");
        self.with_realm(realm, |state| {
            let mut client = client.clone();
            client.id = Some(id);
            state.clients.push(client);
            Ok(())
        })
    }

    fn update_client(
        &self,
        realm: &str,
        client_id: &str,
        client: &ClientRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let existing = state
                .clients
                .iter_mut()
                .find(|c| c.id.as_deref() == Some(client_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "client not found".to_string(),
                })?;
            *existing = client.clone();
            Ok(())
        })
    }

    fn default_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state
                .client_default_scopes
                .get(client_id)
                .cloned()
                .unwrap_or_default();
            Ok(state
                .scopes
                .iter()
                .filter(|s| s.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn add_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state
                .client_default_scopes
                .entry(client_id.to_string())
                .or_default()
                .push(scope_id.to_string());
            Ok(())
        })
    }

    fn remove_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state
                .client_default_scopes
                .entry(client_id.to_string())
                .or_default()
                .retain(|id| id != scope_id);
            Ok(())
        })
    }

    fn optional_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state
                .client_optional_scopes
                .get(client_id)
                .cloned()
                .unwrap_or_default();
            Ok(state
                .scopes
                .iter()
                .filter(|s| s.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn add_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state
                .client_optional_scopes
                .entry(client_id.to_string())
                .or_default()
                .push(scope_id.to_string());
            Ok(())
        })
    }

    fn remove_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state
                .client_optional_scopes
                .entry(client_id.to_string())
                .or_default()
                .retain(|id| id != scope_id);
            Ok(())
        })
    }
}

impl IdentityProviderApi for FakeAdmin {
    fn list_identity_providers(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<IdentityProviderRepresentation>> {
        self.with_realm(realm, |state| Ok(state.providers.clone()))
    }

    fn create_identity_provider(
        &self,
        realm: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()> {
        let id = self.next_id("idp");
        self.with_realm(realm, |state| {
            let mut provider = provider.clone();
            provider.internal_id = Some(id);
            state.providers.push(provider);
            Ok(())
        })
    }

    fn update_identity_provider(
        &self,
        realm: &str,
        alias: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let existing = state
                .providers
                .iter_mut()
                .find(|p| p.alias.as_deref() == Some(alias))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "identity provider not found".to_string(),
                })?;
            let mut incoming = provider.clone();
            // The server keeps the stored secret when an update omits it.
            let stored_secret = existing
                .config
                .as_ref()
                .and_then(|config| config.get("clientSecret"))
                .cloned();
            if let Some(secret) = stored_secret {
                incoming
                    .config
                    .get_or_insert_with(Default::default)
                    .entry("clientSecret".to_string())
                    .or_insert(secret);
            }
            *existing = incoming;
            Ok(())
        })
    }

    fn list_identity_provider_mappers(
        &self,
        realm: &str,
        alias: &str,
    ) -> AdminResult<Vec<IdentityProviderMapperRepresentation>> {
        self.with_realm(realm, |state| {
            Ok(state.provider_mappers.get(alias).cloned().unwrap_or_default())
        })
    }

    fn create_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()> {
        let id = self.next_id("idp-mapper");
        self.with_realm(realm, |state| {
            let mut mapper = mapper.clone();
            mapper.id = Some(id);
            state
                .provider_mappers
                .entry(alias.to_string())
                .or_default()
                .push(mapper);
            Ok(())
        })
    }

    fn update_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper_id: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let mappers = state.provider_mappers.entry(alias.to_string()).or_default();
            let existing = mappers
                .iter_mut()
                .find(|m| m.id.as_deref() == Some(mapper_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "identity provider mapper not found".to_string(),
                })?;
            *existing = mapper.clone();
            Ok(())
        })
    }
}

impl AuthFlowApi for FakeAdmin {
    fn list_flows(&self, realm: &str) -> AdminResult<Vec<AuthenticationFlowRepresentation>> {
        self.with_realm(realm, |state| Ok(state.flows.clone()))
    }

    fn create_flow(
        &self,
        realm: &str,
        flow: &AuthenticationFlowRepresentation,
    ) -> AdminResult<Option<String>> {
        let id = self.next_id("flow");
        self.with_realm(realm, |state| {
            let mut flow = flow.clone();
            flow.id = Some(id.clone());
            state.flows.push(flow);
            state.executions.insert(id.clone(), Vec::new());
            Ok(())
        })?;
        Ok(self.maybe_id(&id))
    }

    fn list_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> AdminResult<Vec<AuthenticationExecutionInfoRepresentation>> {
        self.with_realm(realm, |state| {
            let flow_id = Self::flow_id_by_alias(state, flow_alias)?;
            let mut out = Vec::new();
            Self::flatten_executions(state, &flow_id, 0, &mut out);
            Ok(out)
        })
    }

    fn add_execution(&self, realm: &str, flow_alias: &str, provider: &str) -> AdminResult<()> {
        let id = self.next_id("execution");
        self.with_realm(realm, |state| {
            let flow_id = Self::flow_id_by_alias(state, flow_alias)?;
            state
                .executions
                .entry(flow_id)
                .or_default()
                .push(AuthenticationExecutionInfoRepresentation {
                    id: Some(id),
                    // The server derives the display name from the
                    // authenticator; the fake uses the provider id itself.
                    display_name: Some(provider.to_string()),
                    provider_id: Some(provider.to_string()),
                    requirement: Some("DISABLED".to_string()),
                    configurable: Some(true),
                    authentication_flow: Some(false),
                    ..Default::default()
                });
            Ok(())
        })
    }

    fn add_execution_flow(
        &self,
        realm: &str,
        flow_alias: &str,
        params: &NewFlowExecution,
    ) -> AdminResult<Option<String>> {
        let nested_flow_id = self.next_id("flow");
        let execution_id = self.next_id("execution");
        self.with_realm(realm, |state| {
            let parent_id = Self::flow_id_by_alias(state, flow_alias)?;
            state.flows.push(AuthenticationFlowRepresentation {
                id: Some(nested_flow_id.clone()),
                alias: params.alias.clone(),
                description: params.description.clone(),
                provider_id: params.flow_type.clone(),
                top_level: Some(false),
                built_in: Some(false),
                ..Default::default()
            });
            state.executions.insert(nested_flow_id.clone(), Vec::new());
            state
                .executions
                .entry(parent_id)
                .or_default()
                .push(AuthenticationExecutionInfoRepresentation {
                    id: Some(execution_id),
                    // The alias lands in the display name; the execution's
                    // own alias field stays unset until patched.
                    display_name: params.alias.clone(),
                    alias: None,
                    requirement: Some("DISABLED".to_string()),
                    authentication_flow: Some(true),
                    flow_id: Some(nested_flow_id.clone()),
                    ..Default::default()
                });
            Ok(())
        })?;
        Ok(self.maybe_id(&nested_flow_id))
    }

    fn update_execution(
        &self,
        realm: &str,
        _flow_alias: &str,
        execution: &AuthenticationExecutionInfoRepresentation,
    ) -> AdminResult<()> {
        let execution_id = execution.id.clone().ok_or_else(|| AdminError::Api {
            status: 400,
            message: "execution id is required".to_string(),
        })?;
        self.with_realm(realm, |state| {
            let existing =
                Self::find_execution_mut(state, &execution_id).ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "execution not found".to_string(),
                })?;
            existing.requirement = execution.requirement.clone();
            existing.alias = execution.alias.clone();
            if execution.authentication_config.is_some() {
                existing.authentication_config = execution.authentication_config.clone();
            }
            Ok(())
        })
    }

    fn create_execution_config(
        &self,
        realm: &str,
        execution_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<Option<String>> {
        let id = self.next_id("config");
        self.with_realm(realm, |state| {
            let execution =
                Self::find_execution_mut(state, execution_id).ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "execution not found".to_string(),
                })?;
            execution.authentication_config = Some(id.clone());
            let mut config = config.clone();
            config.id = Some(id.clone());
            state.configs.insert(id.clone(), config);
            Ok(())
        })?;
        Ok(self.maybe_id(&id))
    }

    fn get_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
    ) -> AdminResult<AuthenticatorConfigRepresentation> {
        self.with_realm(realm, |state| {
            state.configs.get(config_id).cloned().ok_or_else(|| AdminError::Api {
                status: 404,
                message: "authenticator config not found".to_string(),
            })
        })
    }

    fn update_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            if !state.configs.contains_key(config_id) {
                return Err(AdminError::Api {
                    status: 404,
                    message: "authenticator config not found".to_string(),
                });
            }
            let mut config = config.clone();
            config.id = Some(config_id.to_string());
            state.configs.insert(config_id.to_string(), config);
            Ok(())
        })
    }
}

impl GroupApi for FakeAdmin {
    fn list_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.with_realm(realm, |state| Ok(state.groups.clone()))
    }

    fn create_group(&self, realm: &str, group: &GroupRepresentation) -> AdminResult<()> {
        let id = self.next_id("group");
        self.with_realm(realm, |state| {
            let mut group = group.clone();
            group.path = group.name.as_ref().map(|name| format!("/{name}"));
            group.id = Some(id);
            state.groups.push(group);
            Ok(())
        })
    }

    fn update_group(
        &self,
        realm: &str,
        group_id: &str,
        group: &GroupRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let existing = state
                .groups
                .iter_mut()
                .find(|g| g.id.as_deref() == Some(group_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "group not found".to_string(),
                })?;
            *existing = group.clone();
            Ok(())
        })
    }
}

impl UserApi for FakeAdmin {
    fn list_users(&self, realm: &str) -> AdminResult<Vec<UserRepresentation>> {
        self.with_realm(realm, |state| Ok(state.users.clone()))
    }

    fn create_user(&self, realm: &str, user: &UserRepresentation) -> AdminResult<()> {
        let id = self.next_id("user");
        self.with_realm(realm, |state| {
            let mut user = user.clone();
            user.id = Some(id);
            state.users.push(user);
            Ok(())
        })
    }

    fn update_user(
        &self,
        realm: &str,
        user_id: &str,
        user: &UserRepresentation,
    ) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let existing = state
                .users
                .iter_mut()
                .find(|u| u.id.as_deref() == Some(user_id))
                .ok_or_else(|| AdminError::Api {
                    status: 404,
                    message: "user not found".to_string(),
                })?;
            *existing = user.clone();
            Ok(())
        })
    }

    fn user_groups(&self, realm: &str, user_id: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.with_realm(realm, |state| {
            let ids = state.memberships.get(user_id).cloned().unwrap_or_default();
            Ok(state
                .groups
                .iter()
                .filter(|g| g.id.as_ref().is_some_and(|id| ids.contains(id)))
                .cloned()
                .collect())
        })
    }

    fn join_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            let memberships = state.memberships.entry(user_id.to_string()).or_default();
            if !memberships.iter().any(|id| id == group_id) {
                memberships.push(group_id.to_string());
            }
            Ok(())
        })
    }

    fn leave_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.with_realm(realm, |state| {
            state
                .memberships
                .entry(user_id.to_string())
                .or_default()
                .retain(|id| id != group_id);
            Ok(())
        })
    }
}
