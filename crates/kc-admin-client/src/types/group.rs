//! Group representation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupRepresentation {
    /// Server-issued id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Group name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Full path of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Multi-valued group attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<HashMap<String, Vec<String>>>,
    /// Unmodeled fields, preserved across round-trips.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
