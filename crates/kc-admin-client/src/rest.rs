//! Blocking HTTP implementation of the capability traits.

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{
    AuthFlowApi, ClientApi, ClientScopeApi, GroupApi, IdentityProviderApi, RealmApi, UserApi,
};
use crate::error::{AdminError, AdminResult};
use crate::types::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigRepresentation, ClientRepresentation, ClientScopeRepresentation,
    GroupRepresentation, IdentityProviderMapperRepresentation, IdentityProviderRepresentation,
    NewFlowExecution, ProtocolMapperRepresentation, RealmRepresentation, UserRepresentation,
};

/// Realm used for admin authentication.
const MASTER_REALM: &str = "master";

/// Request timeout for administrative calls.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Authenticated client for the Admin REST API.
///
/// One client holds one admin session; the bearer token obtained at login
/// is reused for every call of the run.
pub struct AdminClient {
    http: Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    /// Logs in to the master realm with the password grant and returns an
    /// authenticated client.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Auth` when the token endpoint rejects the
    /// credentials and `AdminError::Http` on transport failures.
    pub fn login(
        server_url: &str,
        username: &str,
        password: &str,
        client_id: &str,
    ) -> AdminResult<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = server_url.trim_end_matches('/').to_string();

        let token_url = format!(
            "{}/realms/{}/protocol/openid-connect/token",
            base_url, MASTER_REALM
        );
        let response = http
            .post(&token_url)
            .form(&[
                ("grant_type", "password"),
                ("username", username),
                ("password", password),
                ("client_id", client_id),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdminError::Auth(format!("{} - {}", status.as_u16(), message)));
        }

        let token: TokenResponse = response.json()?;
        debug!(server = %base_url, %username, "admin login succeeded");
        Ok(Self {
            http,
            base_url,
            token: token.access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> AdminResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()?;
        read_json(response)
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> AdminResult<()> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()?;
        read_empty(response)
    }

    /// POST that captures the created resource's id from the Location
    /// header, when the server sends one.
    fn post_created<B: Serialize>(&self, path: &str, body: &B) -> AdminResult<Option<String>> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdminError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let id = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(id_from_location);
        Ok(id)
    }

    fn put<B: Serialize>(&self, path: &str, body: &B) -> AdminResult<()> {
        let response = self
            .http
            .put(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()?;
        read_empty(response)
    }

    /// PUT without a body, used by the scope/group assignment endpoints.
    fn put_empty(&self, path: &str) -> AdminResult<()> {
        let response = self
            .http
            .put(self.url(path))
            .bearer_auth(&self.token)
            .send()?;
        read_empty(response)
    }

    fn delete(&self, path: &str) -> AdminResult<()> {
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(&self.token)
            .send()?;
        read_empty(response)
    }
}

/// Percent-encodes one path segment.
fn seg(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Extracts the trailing path segment of a Location header value.
fn id_from_location(location: &str) -> Option<String> {
    let path = location.trim_end_matches('/');
    let id = path.rsplit('/').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

fn read_json<T: DeserializeOwned>(response: Response) -> AdminResult<T> {
    let status = response.status();
    if status.is_success() {
        response.json().map_err(AdminError::Http)
    } else {
        let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn read_empty(response: Response) -> AdminResult<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
        Err(AdminError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl RealmApi for AdminClient {
    fn list_realms(&self) -> AdminResult<Vec<RealmRepresentation>> {
        self.get("/admin/realms")
    }

    fn create_realm(&self, realm: &RealmRepresentation) -> AdminResult<()> {
        self.post("/admin/realms", realm)
    }

    fn update_realm(&self, realm_name: &str, realm: &RealmRepresentation) -> AdminResult<()> {
        self.put(&format!("/admin/realms/{}", seg(realm_name)), realm)
    }

    fn default_default_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/default-default-client-scopes",
            seg(realm)
        ))
    }

    fn add_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/default-default-client-scopes/{}",
            seg(realm),
            seg(scope_id)
        ))
    }

    fn remove_default_default_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/default-default-client-scopes/{}",
            seg(realm),
            seg(scope_id)
        ))
    }

    fn default_optional_client_scopes(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/default-optional-client-scopes",
            seg(realm)
        ))
    }

    fn add_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/default-optional-client-scopes/{}",
            seg(realm),
            seg(scope_id)
        ))
    }

    fn remove_default_optional_client_scope(&self, realm: &str, scope_id: &str) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/default-optional-client-scopes/{}",
            seg(realm),
            seg(scope_id)
        ))
    }

    fn default_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.get(&format!("/admin/realms/{}/default-groups", seg(realm)))
    }

    fn add_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/default-groups/{}",
            seg(realm),
            seg(group_id)
        ))
    }

    fn remove_default_group(&self, realm: &str, group_id: &str) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/default-groups/{}",
            seg(realm),
            seg(group_id)
        ))
    }
}

impl ClientScopeApi for AdminClient {
    fn list_client_scopes(&self, realm: &str) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.get(&format!("/admin/realms/{}/client-scopes", seg(realm)))
    }

    fn create_client_scope(
        &self,
        realm: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()> {
        self.post(&format!("/admin/realms/{}/client-scopes", seg(realm)), scope)
    }

    fn update_client_scope(
        &self,
        realm: &str,
        scope_id: &str,
        scope: &ClientScopeRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!("/admin/realms/{}/client-scopes/{}", seg(realm), seg(scope_id)),
            scope,
        )
    }

    fn list_protocol_mappers(
        &self,
        realm: &str,
        scope_id: &str,
    ) -> AdminResult<Vec<ProtocolMapperRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/client-scopes/{}/protocol-mappers/models",
            seg(realm),
            seg(scope_id)
        ))
    }

    fn create_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()> {
        self.post(
            &format!(
                "/admin/realms/{}/client-scopes/{}/protocol-mappers/models",
                seg(realm),
                seg(scope_id)
            ),
            mapper,
        )
    }

    fn update_protocol_mapper(
        &self,
        realm: &str,
        scope_id: &str,
        mapper_id: &str,
        mapper: &ProtocolMapperRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!(
                "/admin/realms/{}/client-scopes/{}/protocol-mappers/models/{}",
                seg(realm),
                seg(scope_id),
                seg(mapper_id)
            ),
            mapper,
        )
    }
}

impl ClientApi for AdminClient {
    fn list_clients(&self, realm: &str) -> AdminResult<Vec<ClientRepresentation>> {
        self.get(&format!("/admin/realms/{}/clients", seg(realm)))
    }

    fn create_client(&self, realm: &str, client: &ClientRepresentation) -> AdminResult<()> {
        self.post(&format!("/admin/realms/{}/clients", seg(realm)), client)
    }

    fn update_client(
        &self,
        realm: &str,
        client_id: &str,
        client: &ClientRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!("/admin/realms/{}/clients/{}", seg(realm), seg(client_id)),
            client,
        )
    }

    fn default_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/clients/{}/default-client-scopes",
            seg(realm),
            seg(client_id)
        ))
    }

    fn add_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/clients/{}/default-client-scopes/{}",
            seg(realm),
            seg(client_id),
            seg(scope_id)
        ))
    }

    fn remove_default_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/clients/{}/default-client-scopes/{}",
            seg(realm),
            seg(client_id),
            seg(scope_id)
        ))
    }

    fn optional_client_scopes(
        &self,
        realm: &str,
        client_id: &str,
    ) -> AdminResult<Vec<ClientScopeRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/clients/{}/optional-client-scopes",
            seg(realm),
            seg(client_id)
        ))
    }

    fn add_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/clients/{}/optional-client-scopes/{}",
            seg(realm),
            seg(client_id),
            seg(scope_id)
        ))
    }

    fn remove_optional_client_scope(
        &self,
        realm: &str,
        client_id: &str,
        scope_id: &str,
    ) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/clients/{}/optional-client-scopes/{}",
            seg(realm),
            seg(client_id),
            seg(scope_id)
        ))
    }
}

impl IdentityProviderApi for AdminClient {
    fn list_identity_providers(
        &self,
        realm: &str,
    ) -> AdminResult<Vec<IdentityProviderRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/identity-provider/instances",
            seg(realm)
        ))
    }

    fn create_identity_provider(
        &self,
        realm: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()> {
        self.post(
            &format!("/admin/realms/{}/identity-provider/instances", seg(realm)),
            provider,
        )
    }

    fn update_identity_provider(
        &self,
        realm: &str,
        alias: &str,
        provider: &IdentityProviderRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!(
                "/admin/realms/{}/identity-provider/instances/{}",
                seg(realm),
                seg(alias)
            ),
            provider,
        )
    }

    fn list_identity_provider_mappers(
        &self,
        realm: &str,
        alias: &str,
    ) -> AdminResult<Vec<IdentityProviderMapperRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/identity-provider/instances/{}/mappers",
            seg(realm),
            seg(alias)
        ))
    }

    fn create_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()> {
        self.post(
            &format!(
                "/admin/realms/{}/identity-provider/instances/{}/mappers",
                seg(realm),
                seg(alias)
            ),
            mapper,
        )
    }

    fn update_identity_provider_mapper(
        &self,
        realm: &str,
        alias: &str,
        mapper_id: &str,
        mapper: &IdentityProviderMapperRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!(
                "/admin/realms/{}/identity-provider/instances/{}/mappers/{}",
                seg(realm),
                seg(alias),
                seg(mapper_id)
            ),
            mapper,
        )
    }
}

impl AuthFlowApi for AdminClient {
    fn list_flows(&self, realm: &str) -> AdminResult<Vec<AuthenticationFlowRepresentation>> {
        self.get(&format!("/admin/realms/{}/authentication/flows", seg(realm)))
    }

    fn create_flow(
        &self,
        realm: &str,
        flow: &AuthenticationFlowRepresentation,
    ) -> AdminResult<Option<String>> {
        self.post_created(
            &format!("/admin/realms/{}/authentication/flows", seg(realm)),
            flow,
        )
    }

    fn list_executions(
        &self,
        realm: &str,
        flow_alias: &str,
    ) -> AdminResult<Vec<AuthenticationExecutionInfoRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/authentication/flows/{}/executions",
            seg(realm),
            seg(flow_alias)
        ))
    }

    fn add_execution(&self, realm: &str, flow_alias: &str, provider: &str) -> AdminResult<()> {
        self.post(
            &format!(
                "/admin/realms/{}/authentication/flows/{}/executions/execution",
                seg(realm),
                seg(flow_alias)
            ),
            &serde_json::json!({ "provider": provider }),
        )
    }

    fn add_execution_flow(
        &self,
        realm: &str,
        flow_alias: &str,
        params: &NewFlowExecution,
    ) -> AdminResult<Option<String>> {
        self.post_created(
            &format!(
                "/admin/realms/{}/authentication/flows/{}/executions/flow",
                seg(realm),
                seg(flow_alias)
            ),
            params,
        )
    }

    fn update_execution(
        &self,
        realm: &str,
        flow_alias: &str,
        execution: &AuthenticationExecutionInfoRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!(
                "/admin/realms/{}/authentication/flows/{}/executions",
                seg(realm),
                seg(flow_alias)
            ),
            execution,
        )
    }

    fn create_execution_config(
        &self,
        realm: &str,
        execution_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<Option<String>> {
        self.post_created(
            &format!(
                "/admin/realms/{}/authentication/executions/{}/config",
                seg(realm),
                seg(execution_id)
            ),
            config,
        )
    }

    fn get_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
    ) -> AdminResult<AuthenticatorConfigRepresentation> {
        self.get(&format!(
            "/admin/realms/{}/authentication/config/{}",
            seg(realm),
            seg(config_id)
        ))
    }

    fn update_authenticator_config(
        &self,
        realm: &str,
        config_id: &str,
        config: &AuthenticatorConfigRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!(
                "/admin/realms/{}/authentication/config/{}",
                seg(realm),
                seg(config_id)
            ),
            config,
        )
    }
}

impl GroupApi for AdminClient {
    fn list_groups(&self, realm: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.get(&format!("/admin/realms/{}/groups", seg(realm)))
    }

    fn create_group(&self, realm: &str, group: &GroupRepresentation) -> AdminResult<()> {
        self.post(&format!("/admin/realms/{}/groups", seg(realm)), group)
    }

    fn update_group(
        &self,
        realm: &str,
        group_id: &str,
        group: &GroupRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!("/admin/realms/{}/groups/{}", seg(realm), seg(group_id)),
            group,
        )
    }
}

impl UserApi for AdminClient {
    fn list_users(&self, realm: &str) -> AdminResult<Vec<UserRepresentation>> {
        self.get(&format!("/admin/realms/{}/users", seg(realm)))
    }

    fn create_user(&self, realm: &str, user: &UserRepresentation) -> AdminResult<()> {
        self.post(&format!("/admin/realms/{}/users", seg(realm)), user)
    }

    fn update_user(
        &self,
        realm: &str,
        user_id: &str,
        user: &UserRepresentation,
    ) -> AdminResult<()> {
        self.put(
            &format!("/admin/realms/{}/users/{}", seg(realm), seg(user_id)),
            user,
        )
    }

    fn user_groups(&self, realm: &str, user_id: &str) -> AdminResult<Vec<GroupRepresentation>> {
        self.get(&format!(
            "/admin/realms/{}/users/{}/groups",
            seg(realm),
            seg(user_id)
        ))
    }

    fn join_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.put_empty(&format!(
            "/admin/realms/{}/users/{}/groups/{}",
            seg(realm),
            seg(user_id),
            seg(group_id)
        ))
    }

    fn leave_group(&self, realm: &str, user_id: &str, group_id: &str) -> AdminResult<()> {
        self.delete(&format!(
            "/admin/realms/{}/users/{}/groups/{}",
            seg(realm),
            seg(user_id),
            seg(group_id)
        ))
    }
}
