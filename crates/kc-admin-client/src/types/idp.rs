//! Identity-provider representations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A configured external identity federation source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityProviderRepresentation {
    /// Alias identifying the provider within the realm.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Server-internal id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_id: Option<String>,
    /// Provider implementation id (e.g. `oidc`, `saml`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Display name shown on the login page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the provider is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Alias of the flow run on first broker login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_broker_login_flow_alias: Option<String>,
    /// Alias of the flow run after every broker login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_broker_login_flow_alias: Option<String>,
    /// Provider-specific configuration. The `clientSecret` key is managed
    /// by the server and is never overwritten by the provisioner unless
    /// the document declares it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, String>>,
    /// Unmodeled fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A mapper in an identity provider's pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityProviderMapperRepresentation {
    /// Server-issued id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Mapper name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Alias of the owning identity provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider_alias: Option<String>,
    /// Provider id of the mapper implementation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_provider_mapper: Option<String>,
    /// Mapper configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, String>>,
    /// Unmodeled fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
