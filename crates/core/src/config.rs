//! Projection configuration.
//!
//! Loaded from TOML or assembled with the builder-style setters:
//!
//! ```toml
//! strict_nulls = true
//! global_namespace = "Api"
//!
//! [overrides]
//! "System.TimeSpan" = "string"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::descriptor::TypeKey;
use crate::error::ConfigError;

/// Settings that steer how host types are projected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Namespace every complex type name is qualified with, instead of its own.
    pub(crate) global_namespace: Option<String>,
    /// Literal target text for specific host types.
    pub(crate) overrides: HashMap<TypeKey, String>,
    /// Whether nullable types get a `| null` arm.
    pub(crate) strict_nulls: bool,
}

impl ProjectionConfig {
    /// Default configuration: no overrides, no global namespace, lax nulls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Qualify every complex type with `namespace`.
    pub fn global_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.global_namespace = Some(namespace.into());
        self
    }

    /// Project the host type named `key` as the literal `text`.
    pub fn override_type(mut self, key: impl Into<TypeKey>, text: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), text.into());
        self
    }

    /// Enable or disable the `| null` arm for nullable types.
    pub fn strict_nulls(mut self, strict: bool) -> Self {
        self.strict_nulls = strict;
        self
    }

    /// Whether strict null handling is on.
    pub fn is_strict_nulls(&self) -> bool {
        self.strict_nulls
    }

    /// The override text for a host full name.
    pub fn override_for(&self, full_name: &str) -> Option<&str> {
        self.overrides.get(full_name).map(String::as_str)
    }

    /// Number of configured overrides.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// The global namespace, if set to something non-empty.
    pub(crate) fn namespace_override(&self) -> Option<&str> {
        self.global_namespace
            .as_deref()
            .filter(|namespace| !namespace.is_empty())
    }
}
