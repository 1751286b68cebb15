//! Conversion of declared attribute/config sections into representation
//! maps.
//!
//! Attribute and free-form config maps are merged: declared keys are
//! written over a snapshot of the live map so that keys set outside of
//! this tool survive re-application.

use std::collections::HashMap;

use kc_config::property::{scalar_to_string, to_string_list};
use kc_config::PropertyGroup;

use crate::error::ProvisionResult;

/// Merges declared single-valued entries over the live map snapshot.
///
/// `null`-valued entries leave the live key untouched.
pub(crate) fn merge_single_valued(
    existing: Option<HashMap<String, String>>,
    declared: &PropertyGroup<'_>,
) -> ProvisionResult<HashMap<String, String>> {
    let mut merged = existing.unwrap_or_default();
    for (key, value) in declared.entries() {
        if let Some(value) = scalar_to_string(key, value)? {
            merged.insert(key.to_string(), value);
        }
    }
    Ok(merged)
}

/// Merges declared multi-valued entries over the live map snapshot.
///
/// Scalar values become single-element lists.
pub(crate) fn merge_multi_valued(
    existing: Option<HashMap<String, Vec<String>>>,
    declared: &PropertyGroup<'_>,
) -> ProvisionResult<HashMap<String, Vec<String>>> {
    let mut merged = existing.unwrap_or_default();
    for (key, value) in declared.entries() {
        merged.insert(key.to_string(), to_string_list(key, value)?);
    }
    Ok(merged)
}

/// Builds a fresh config map from a declared section, replacing whatever
/// the live object held.
pub(crate) fn config_map(declared: &PropertyGroup<'_>) -> ProvisionResult<HashMap<String, String>> {
    merge_single_valued(None, declared)
}
