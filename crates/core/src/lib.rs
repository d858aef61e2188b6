//! Projects host runtime type descriptors into TypeScript type expressions.
//!
//! The entry point is [`TypeProjector`]: hand it a [`TypeDescriptor`] and it
//! returns the TypeScript text for that type, registering every complex type
//! it names with a [`TypeRegistry`] so declarations can be emitted later.
//! Descriptors usually come from a [`Catalog`] loaded from JSON.

pub mod builtins;
pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod projection;
pub mod registry;

pub use builtins::{Builtin, BuiltinTable};
pub use catalog::{Catalog, TypeReference};
pub use config::ProjectionConfig;
pub use descriptor::{Contracts, TypeDescriptor, TypeKey, TypeKind};
pub use diagnostics::{CollectingSink, DiagnosticsSink, TracingSink};
pub use error::{CatalogError, ConfigError};
pub use projection::{Projection, TypeProjector};
pub use registry::{ModelRegistry, ModuleMember, TypeRegistry};
