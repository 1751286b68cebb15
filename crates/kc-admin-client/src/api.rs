//! Capability traits consumed by the reconciliation engine.
//!
//! One trait per entity kind, mirroring the Admin REST API's resource
//! grouping. Lookup by name is deliberately *not* part of these traits:
//! the server offers no indexed lookup, so the reconcilers list all
//! entities and scan — keeping that explicit lets a future transport with
//! indexed lookup slot in without touching reconciler logic.

use crate::error::AdminResult;
use crate::types::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigRepresentation, ClientRepresentation, ClientScopeRepresentation,
    GroupRepresentation, IdentityProviderMapperRepresentation, IdentityProviderRepresentation,
    NewFlowExecution, ProtocolMapperRepresentation, RealmRepresentation, UserRepresentation,
};

/// Realm-level operations, including the realm's default client-scope and
/// default-group assignments.
pub trait RealmApi {
    /// Lists all realms.
    fn list_realms(&self) -> AdminResult<Vec<RealmRepresentation>>;

    /// Creates a realm.
    fn create_realm(&self, realm: &RealmRepresentation) -> AdminResult<()>;

    /// Updates a realm by name.
    fn update_realm(&self, realm_name: &str, realm: &RealmRepresentation) -> AdminResult<()>;

    /// Lists the realm's default default client scopes.
    fn default_default_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>>;

    /// Adds a scope to the realm's default default client scopes.
    fn add_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()>;

    /// Removes a scope from the realm's default default client scopes.
    fn remove_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()>;

    /// Lists the realm's default optional client scopes.
    fn default_optional_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>>;

    /// Adds a scope to the realm's default optional client scopes.
    fn add_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()>;

    /// Removes a scope from the realm's default optional client scopes.
    fn remove_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()>;

    /// Lists the realm's default groups.
    fn default_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>>;

    /// Adds a group to the realm's default groups.
    fn add_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()>;

    /// Removes a group from the realm's default groups.
    fn remove_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()>;
}

/// Client-scope operations, including each scope's protocol mappers.
pub trait ClientScopeApi {
    /// Lists all client scopes in a realm.
    fn list_client_scopes(&self, realm: &str) -> AdminResult<Vec<ClientScopeRepresentation>>;

    /// Creates a client scope.
    fn create_client_scope(
        &self,
        realm: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()>;

    /// Updates a client scope by id.
    fn update_client_scope(
        &self,
        realm: &str,
        scope_id: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()>;

    /// Lists the protocol mappers of a client scope.
    fn list_protocol_mappers(
        &self,
        realm: &str,
        scope_id: &str,
    ) -> AdminResult<Vec<ProtocolMapperRepresentation>>;

    /// Creates a protocol mapper under a client scope.
    fn create_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()>;

    /// Updates a protocol mapper by id.
    fn update_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()>;
}

/// Client operations, including per-client scope assignments.
pub trait ClientApi {
    /// Lists all clients in a realm.
    fn list_clients(&self, realm: &str) -> AdminResult<Vec<ClientRepresentation>>;

    /// Creates a client.
    fn create_client(&self, realm: &str, client: &ClientRepresentation) -> AdminResult<()>;

    /// Updates a client by id.
    fn update_client(
        &self,
        realm: &str,
        client_id: &str,
        client: &ClientRepresentation,
    ) -> AdminResult<()>;

    /// Lists a client's default client scopes.
    fn default_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>>;

    /// Attaches a default client scope to a client.
    fn add_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()>;

    /// Detaches a default client scope from a client.
    fn remove_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()>;

    /// Lists a client's optional client scopes.
    fn optional_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>>;

    /// Attaches an optional client scope to a client.
    fn add_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()>;

    /// Detaches an optional client scope from a client.
    fn remove_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()>;
}

/// Identity-provider operations, including each provider's mappers.
pub trait IdentityProviderApi {
    /// Lists all identity providers in a realm.
    fn list_identity_providers(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<IdentityProviderRepresentation>>;

    /// Creates an identity provider.
    fn create_identity_provider(
        &self,
        realm: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()>;

    /// Updates an identity provider by alias.
    fn update_identity_provider(
        &self,
        realm: &str,
        alias: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()>;

    /// Lists the mappers of an identity provider.
    fn list_identity_provider_mappers(
        &self,
        realm: &str,
        alias: &str,
    ) -> AdminResult<Vec<IdentityProviderMapperRepresentation>>;

    /// Creates a mapper under an identity provider.
    fn create_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()>;

    /// Updates an identity-provider mapper by id.
    fn update_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper_id: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()>;
}

/// Authentication-flow operations.
pub trait AuthFlowApi {
    /// Lists all flows in a realm.
    fn list_flows(&self, realm: &str) -> AdminResult<Vec<AuthenticationFlowRepresentation>>;

    /// Creates a top-level flow, returning the created flow id when the
    /// transport exposes one (e.g. via a Location header).
    fn create_flow(
        &self,
        realm: &str,
        flow: &AuthenticationFlowRepresentation,
    ) -> AdminResult<Option<String>>;

    /// Lists the executions of a flow, in evaluation order.
    fn list_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> AdminResult<Vec<AuthenticationExecutionInfoRepresentation>>;

    /// Appends a leaf authenticator execution to a flow.
    fn add_execution(&self, realm: &str, flow_alias: &str, provider: &str) -> AdminResult<()>;

    /// Appends a nested sub-flow to a flow, returning the created flow id
    /// when the transport exposes one.
    ///
    /// When `None` is returned the caller must fall back to scanning the
    /// parent's execution listing; relying on list order being append
    /// order is a documented risk of that fallback, not a guaranteed
    /// contract.
    fn add_execution_flow(
        &self,
        realm: &str,
        flow_alias: &str,
        params: &NewFlowExecution,
    ) -> AdminResult<Option<String>>;

    /// Updates an execution within a flow.
    fn update_execution(
        &self,
        realm: &str,
        flow_alias: &str,
        execution: &AuthenticationExecutionInfoRepresentation,
    ) -> AdminResult<()>;

    /// Creates an authenticator config for an execution, returning the
    /// created config id when the transport exposes one.
    fn create_execution_config(
        &self,
        realm: &str,
        execution_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<Option<String>>;

    /// Fetches an authenticator config by id.
    fn get_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
    ) -> AdminResult<AuthenticatorConfigRepresentation>;

    /// Updates an authenticator config by id.
    fn update_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<()>;
}

/// Group operations.
pub trait GroupApi {
    /// Lists all top-level groups in a realm.
    fn list_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>>;

    /// Creates a group.
    fn create_group(&self, realm: &str, group: &GroupRepresentation) -> AdminResult<()>;

    /// Updates a group by id.
    fn update_group(
        &self,
        realm: &str,
        group_id: &str,
        group: &GroupRepresentation,
    ) -> AdminResult<()>;
}

/// User operations, including group membership edges.
pub trait UserApi {
    /// Lists all users in a realm.
    fn list_users(&self, realm: &str) -> AdminResult<Vec<UserRepresentation>>;

    /// Creates a user.
    fn create_user(&self, realm: &str, user: &UserRepresentation) -> AdminResult<()>;

    /// Updates a user by id.
    fn update_user(&self, realm: &str, user_id: &str, user: &UserRepresentation)
        -> AdminResult<()>;

    /// Lists the groups a user is a member of.
    fn user_groups(&self, realm: &str, user_id: &str) -> AdminResult<Vec<GroupRepresentation>>;

    /// Adds a user to a group.
    fn join_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()>;

    /// Removes a user from a group.
    fn leave_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()>;
}

/// The full capability surface consumed by the reconciliation driver.
pub trait AdminApi:
    RealmApi + ClientScopeApi + ClientApi + IdentityProviderApi + AuthFlowApi + GroupApi + UserApi
{
}

impl<T> AdminApi for T where
    T: RealmApi
        + ClientScopeApi
        + ClientApi
        + IdentityProviderApi
        + AuthFlowApi
        + GroupApi
        + UserApi
{
}
