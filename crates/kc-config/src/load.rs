//! Loading of the configuration document.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::property::PropertyGroup;

/// Property path of the server URL.
pub const PROP_SERVER_URL: &str = "keycloak|serverUrl";
/// Property path of the admin username.
pub const PROP_ADMIN_USER: &str = "keycloak|adminUser";
/// Property path of the admin password.
pub const PROP_ADMIN_PASSWORD: &str = "keycloak|adminPassword";
/// Property path of the admin client id.
pub const PROP_ADMIN_CLIENT_ID: &str = "keycloak|adminClientId";
/// Property path of the realms section.
pub const PROP_REALMS: &str = "keycloak|realms";

/// The loaded configuration document.
///
/// Constructed once and passed by reference into the reconciliation
/// driver; there is no global configuration state.
#[derive(Debug)]
pub struct KeycloakConfig {
    root: Value,
}

impl KeycloakConfig {
    /// Loads the configuration from a JSON file, substituting `${VAR}`
    /// references from the process environment before parsing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` if it is not valid JSON, and
    /// `ConfigError::RootNotObject` if the document root is not an object.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "loaded configuration file");
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_str_with_env(&raw, &env)
    }

    /// Parses a configuration document from a string after substituting
    /// `${VAR}` references from the supplied variable map.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` or `ConfigError::RootNotObject` as
    /// [`KeycloakConfig::from_file`].
    pub fn from_str_with_env(raw: &str, env: &HashMap<String, String>) -> ConfigResult<Self> {
        let resolved = substitute(raw, env);
        let root: Value = serde_json::from_str(&resolved)?;
        if !root.is_object() {
            return Err(ConfigError::RootNotObject);
        }
        Ok(Self { root })
    }

    /// Returns the root property group.
    #[must_use]
    pub fn root(&self) -> PropertyGroup<'_> {
        // The constructor rejects non-object roots.
        match &self.root {
            Value::Object(obj) => PropertyGroup::new(obj),
            _ => unreachable!("configuration root is validated at load time"),
        }
    }

    /// Returns the target server URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the property is not a string.
    pub fn server_url(&self) -> ConfigResult<Option<String>> {
        self.root().get_string(PROP_SERVER_URL)
    }

    /// Returns the admin username.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the property is not a string.
    pub fn admin_user(&self) -> ConfigResult<Option<String>> {
        self.root().get_string(PROP_ADMIN_USER)
    }

    /// Returns the admin password, decoded if obfuscated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the property is not a string.
    pub fn admin_password(&self) -> ConfigResult<Option<String>> {
        self.root().get_string(PROP_ADMIN_PASSWORD)
    }

    /// Returns the admin client id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the property is not a string.
    pub fn admin_client_id(&self) -> ConfigResult<Option<String>> {
        self.root().get_string(PROP_ADMIN_CLIENT_ID)
    }

    /// Returns the realms section, if declared.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TypeMismatch` if the property is not an
    /// object.
    pub fn realms(&self) -> ConfigResult<Option<PropertyGroup<'_>>> {
        self.root().get_group(PROP_REALMS)
    }
}

/// Replaces `${VAR}` references with values from `env`.
///
/// References to unknown variables are left verbatim so that a missing
/// variable surfaces as a recognizable placeholder downstream instead of
/// an empty string.
fn substitute(raw: &str, env: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match env.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("${");
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
