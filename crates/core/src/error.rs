//! Errors raised while loading catalogs and configuration.
//!
//! Projection itself never fails; these only cover the input layer.

use std::path::PathBuf;

/// Failure to build or resolve against a type catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog JSON is malformed.
    #[error("Failed to parse type catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A reference names a type the catalog does not define.
    #[error("Unknown type '{0}'")]
    UnknownType(String),

    /// A definition collides with an existing one.
    #[error("Duplicate definition for type '{0}'")]
    DuplicateDefinition(String),

    /// A definition whose name or namespace would produce empty or marked output.
    #[error("Invalid definition for type '{name}': {reason}")]
    InvalidDefinition {
        /// Name as written in the catalog
        name: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// A generic reference supplies the wrong number of arguments.
    #[error("Type '{name}' expects {expected} generic argument(s), got {actual}")]
    ArityMismatch {
        /// Definition name
        name: String,
        /// Generic parameter count of the definition
        expected: usize,
        /// Argument count supplied by the reference
        actual: usize,
    },
}

/// Failure to load a projection config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for the config schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
