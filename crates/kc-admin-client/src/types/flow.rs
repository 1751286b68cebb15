//! Authentication-flow representations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A top-level or nested authentication flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationFlowRepresentation {
    /// Server-issued id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Flow alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flow implementation id (e.g. `basic-flow`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Whether this is a top-level flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_level: Option<bool>,
    /// Whether this is one of the server's built-in flows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_in: Option<bool>,
    /// Unmodeled fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One node of a flow's execution tree as returned by the executions
/// listing.
///
/// The listing indexes executions by display name; the display name of a
/// nested sub-flow does not reliably match the alias used to create it,
/// which is why the reconciler patches the alias after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticationExecutionInfoRepresentation {
    /// Server-issued execution id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Requirement level (e.g. `REQUIRED`, `ALTERNATIVE`, `DISABLED`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    /// Display name the listing indexes by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Alias (sub-flows only; settable after creation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this execution accepts an authenticator config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
    /// True when this node is a nested sub-flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_flow: Option<bool>,
    /// Authenticator provider id (leaf executions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    /// Id of the nested flow record (sub-flows only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_id: Option<String>,
    /// Id of the attached authenticator config, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_config: Option<String>,
    /// Nesting depth within the listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    /// Position within the parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    /// Unmodeled fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named key/value configuration attached to one execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthenticatorConfigRepresentation {
    /// Server-issued id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Config alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Configuration map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<HashMap<String, String>>,
}

/// Parameters for appending a nested sub-flow to a parent flow.
///
/// The create call does not accept a requirement and stores the alias as
/// the display name; both are patched through an execution update
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewFlowExecution {
    /// Alias of the new sub-flow.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Flow implementation id (e.g. `basic-flow`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<String>,
    /// Optional provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
