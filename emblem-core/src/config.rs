//! YAML configuration addressed by dot-separated paths.
//!
//! The document is kept as a [`serde_yaml::Value`] tree. `openapi.title`
//! walks the `openapi` mapping, and `openapi.servers.0` indexes into a
//! sequence. Typed reads go through serde, so anything implementing
//! `Deserialize` can be pulled out of a subtree.

use std::any::type_name;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration tree loaded from YAML, with an optional environment overlay.
///
/// Environment variables sharing the `EMBLEM_` prefix are laid over the
/// document by [`EmblemConfig::with_env_overlay`]: `EMBLEM_OPENAPI_TITLE`
/// overrides `openapi.title`.
#[derive(Debug, Clone, Default)]
pub struct EmblemConfig {
    root: Value,
}

impl EmblemConfig {
    pub const ENV_PREFIX: &'static str = "EMBLEM_";

    pub fn empty() -> Self {
        Self {
            root: Value::Mapping(Mapping::new()),
        }
    }

    /// Parse a YAML document. An empty document yields an empty config; any
    /// other non-mapping root is rejected.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let root: Value =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Load(e.to_string()))?;
        match root {
            Value::Null => Ok(Self::empty()),
            Value::Mapping(_) => Ok(Self { root }),
            _ => Err(ConfigError::Load(
                "top-level YAML value must be a mapping".into(),
            )),
        }
    }

    /// Load a YAML file. A missing file yields an empty config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::empty());
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Load(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    /// Overlay process environment variables starting with `EMBLEM_`.
    pub fn with_env_overlay(self) -> Self {
        self.with_vars(std::env::vars())
    }

    /// Overlay `(name, value)` pairs starting with `EMBLEM_`, using the same
    /// naming convention as [`EmblemConfig::with_env_overlay`].
    pub fn with_vars<I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            if let Some(rest) = name.strip_prefix(Self::ENV_PREFIX).filter(|r| !r.is_empty()) {
                let key = rest.to_lowercase().replace('_', ".");
                tracing::trace!(key = %key, "Config value overridden from environment");
                self.set(&key, value);
            }
        }
        self
    }

    /// Set a value, creating intermediate mappings along the path. A scalar
    /// in the way is replaced by a mapping.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let segments: Vec<&str> = key.split('.').collect();
        insert_at(&mut self.root, &segments, value.into());
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// Scalars are coerced across the string boundary: an environment string
    /// `"true"` reads as `bool`, and a YAML number reads as `String`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: DeserializeOwned>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .lookup(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        decode(key, value)
    }

    /// Get a typed value, returning `default` if the key is missing or
    /// cannot be converted.
    pub fn get_or<V: DeserializeOwned>(&self, key: &str, default: V) -> V {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        key.split('.').try_fold(&self.root, |node, segment| match node {
            Value::Mapping(map) => map.get(segment),
            Value::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

fn insert_at(node: &mut Value, segments: &[&str], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_mapping() {
        *node = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = node {
        if !map.contains_key(*first) {
            map.insert(Value::String((*first).to_string()), Value::Null);
        }
        if let Some(child) = map.get_mut(*first) {
            insert_at(child, rest, value);
        }
    }
}

fn decode<V: DeserializeOwned>(key: &str, value: &Value) -> Result<V, ConfigError> {
    if let Ok(v) = serde_yaml::from_value(value.clone()) {
        return Ok(v);
    }
    let coerced = match value {
        Value::String(s) => serde_yaml::from_str::<Value>(s).ok(),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    };
    coerced
        .and_then(|v| serde_yaml::from_value(v).ok())
        .ok_or_else(|| ConfigError::TypeMismatch {
            key: key.to_string(),
            expected: type_name::<V>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_scalar_with_mapping() {
        let mut config = EmblemConfig::from_yaml_str("openapi: off\n").unwrap();
        config.set("openapi.title", "Pets");
        assert_eq!(config.get::<String>("openapi.title").unwrap(), "Pets");
    }

    #[test]
    fn non_mapping_root_is_rejected() {
        let err = EmblemConfig::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn empty_document_is_empty_config() {
        let config = EmblemConfig::from_yaml_str("").unwrap();
        assert!(!config.contains_key("openapi"));
    }
}
