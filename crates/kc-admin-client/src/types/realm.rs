//! Realm representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A realm as exposed by the Admin REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealmRepresentation {
    /// Server-issued id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Realm name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Whether the realm is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Alias of the flow used for browser logins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_flow: Option<String>,
    /// Whether login events are persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_enabled: Option<bool>,
    /// Login event retention in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_expiration: Option<i64>,
    /// Event types to persist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_event_types: Option<Vec<String>>,
    /// Whether admin events are persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_events_enabled: Option<bool>,
    /// Unmodeled realm fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
