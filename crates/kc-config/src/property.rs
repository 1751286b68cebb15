//! Path-addressed property access over a JSON document.
//!
//! A [`PropertyGroup`] is a read-only view of one JSON object within the
//! loaded configuration. Properties are addressed with hierarchical names
//! whose elements are joined by [`PATH_SEPARATOR`], e.g.
//! `keycloak|realms|tenant1|clients`. Absent paths resolve to `None` at
//! every level; a present value with the wrong shape is a
//! [`ConfigError::TypeMismatch`].

use serde_json::{Map, Value};

use crate::error::{ConfigError, ConfigResult};
use crate::secret;

/// Separator character used within a hierarchical property name.
pub const PATH_SEPARATOR: char = '|';

/// A read-only view over one object node of the configuration document.
///
/// JSON `null` values are treated as absent by every accessor.
#[derive(Debug, Clone, Copy)]
pub struct PropertyGroup<'a> {
    node: &'a Map<String, Value>,
}

impl<'a> PropertyGroup<'a> {
    /// Creates a view over the given JSON object.
    #[must_use]
    pub fn new(node: &'a Map<String, Value>) -> Self {
        Self { node }
    }

    /// Resolves a hierarchical property name to its raw JSON value.
    ///
    /// Returns `Ok(None)` when any path element is absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` when an intermediate path
    /// element resolves to a non-object value.
    pub fn get(&self, path: &str) -> ConfigResult<Option<&'a Value>> {
        let mut cursor = self.node;
        let mut elements = path.split(PATH_SEPARATOR).peekable();

        while let Some(element) = elements.next() {
            let Some(value) = cursor.get(element) else {
                return Ok(None);
            };
            if elements.peek().is_none() {
                return Ok(if value.is_null() { None } else { Some(value) });
            }
            cursor = match value {
                Value::Object(obj) => obj,
                Value::Null => return Ok(None),
                _ => return Err(ConfigError::type_mismatch(path, "object")),
            };
        }
        Ok(None)
    }

    /// Returns the sub-group at the given path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is not an object.
    pub fn get_group(&self, path: &str) -> ConfigResult<Option<PropertyGroup<'a>>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Object(obj)) => Ok(Some(PropertyGroup::new(obj))),
            Some(_) => Err(ConfigError::type_mismatch(path, "object")),
        }
    }

    /// Returns the string value at the given path, decoded if obfuscated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is not a string.
    pub fn get_string(&self, path: &str) -> ConfigResult<Option<String>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(secret::decode(s)?)),
            Some(_) => Err(ConfigError::type_mismatch(path, "string")),
        }
    }

    /// Returns the boolean value at the given path.
    ///
    /// A string value of `"true"` (any case) is accepted as `true` and any
    /// other string as `false`, matching the leniency of hand-edited
    /// documents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is neither a
    /// boolean nor a string.
    pub fn get_bool(&self, path: &str) -> ConfigResult<Option<bool>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => Ok(Some(s.eq_ignore_ascii_case("true"))),
            Some(_) => Err(ConfigError::type_mismatch(path, "boolean or string")),
        }
    }

    /// Returns the boolean value at the given path, or `default` when the
    /// property is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` as [`PropertyGroup::get_bool`].
    pub fn get_bool_or(&self, path: &str, default: bool) -> ConfigResult<bool> {
        Ok(self.get_bool(path)?.unwrap_or(default))
    }

    /// Returns the integer value at the given path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is not an integral
    /// number.
    pub fn get_i64(&self, path: &str) -> ConfigResult<Option<i64>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Number(n)) if n.as_i64().is_some() => Ok(n.as_i64()),
            Some(_) => Err(ConfigError::type_mismatch(path, "integer")),
        }
    }

    /// Returns the floating-point value at the given path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is not a number.
    pub fn get_f64(&self, path: &str) -> ConfigResult<Option<f64>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(_) => Err(ConfigError::type_mismatch(path, "number")),
        }
    }

    /// Returns the array value at the given path converted to strings.
    ///
    /// Scalar elements are stringified; string elements are decoded if
    /// obfuscated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the value is not an array or
    /// an element is not a scalar.
    pub fn get_string_list(&self, path: &str) -> ConfigResult<Option<Vec<String>>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Array(items)) => {
                let mut strings = Vec::with_capacity(items.len());
                for item in items {
                    match scalar_to_string(path, item)? {
                        Some(s) => strings.push(s),
                        None => return Err(ConfigError::type_mismatch(path, "string list")),
                    }
                }
                Ok(Some(strings))
            }
            Some(_) => Err(ConfigError::type_mismatch(path, "array")),
        }
    }

    /// Iterates the direct members of this group in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.node.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Converts a scalar JSON value to a string, decoding obfuscated strings.
///
/// `null` converts to `None`.
///
/// # Errors
///
/// Returns `ConfigError::TypeMismatch` for objects and arrays.
pub fn scalar_to_string(path: &str, value: &Value) -> ConfigResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(secret::decode(s)?)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Object(_) | Value::Array(_) => {
            Err(ConfigError::type_mismatch(path, "scalar"))
        }
    }
}

/// Converts a JSON value to a list of strings.
///
/// An array converts element-wise; a scalar converts to a single-element
/// list; `null` converts to an empty list. Used for attribute maps whose
/// values may be written either way.
///
/// # Errors
///
/// Returns `ConfigError::TypeMismatch` for objects and non-scalar array
/// elements.
pub fn to_string_list(path: &str, value: &Value) -> ConfigResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => {
            let mut strings = Vec::with_capacity(items.len());
            for item in items {
                match scalar_to_string(path, item)? {
                    Some(s) => strings.push(s),
                    None => return Err(ConfigError::type_mismatch(path, "string list")),
                }
            }
            Ok(strings)
        }
        other => match scalar_to_string(path, other)? {
            Some(s) => Ok(vec![s]),
            None => Ok(Vec::new()),
        },
    }
}
