//! Projection of host types into TypeScript type expressions.
//!
//! [`TypeProjector::project`] strips wrapper types, then walks an ordered
//! cascade of rules; the first rule that matches decides the text. Composite
//! rules recurse into element, key, value and generic argument types, each of
//! which goes through wrapper stripping again.

mod cascade;
mod names;
mod unwrap;

use std::fmt;
use std::sync::Arc;

use crate::builtins::BuiltinTable;
use crate::config::ProjectionConfig;
use crate::descriptor::TypeDescriptor;
use crate::diagnostics::{DiagnosticsSink, TracingSink};
use crate::registry::TypeRegistry;

pub use names::qualified_name;
pub use unwrap::unwrap_type;

/// Result of projecting one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// Type expression text
    pub text: String,
    /// Whether the text is a top-level union and needs parentheses when embedded
    pub is_union: bool,
}

impl Projection {
    /// A projection that is not a union.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_union: false,
        }
    }

    /// A projection whose text is a top-level union.
    pub fn union(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_union: true,
        }
    }

    /// Text safe to embed in a composite expression such as `T[]`.
    pub fn into_embedded(self) -> String {
        if self.is_union {
            format!("({})", self.text)
        } else {
            self.text
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Projects host type descriptors into TypeScript type expressions.
///
/// Shareable across threads; the only mutation it causes goes through the
/// injected registry and diagnostics sink.
pub struct TypeProjector {
    config: ProjectionConfig,
    builtins: Arc<BuiltinTable>,
    registry: Arc<dyn TypeRegistry>,
    diagnostics: Arc<dyn DiagnosticsSink>,
}

impl fmt::Debug for TypeProjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeProjector")
            .field("config", &self.config)
            .field("builtins", &self.builtins.len())
            .finish_non_exhaustive()
    }
}

impl TypeProjector {
    /// Projector with the standard builtin table, reporting warnings through `tracing`.
    pub fn new(config: ProjectionConfig, registry: Arc<dyn TypeRegistry>) -> Self {
        Self {
            config,
            builtins: Arc::new(BuiltinTable::standard()),
            registry,
            diagnostics: Arc::new(TracingSink),
        }
    }

    /// Report warnings to `diagnostics` instead.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Use a different builtin table.
    pub fn with_builtins(mut self, builtins: Arc<BuiltinTable>) -> Self {
        self.builtins = builtins;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `ty`, registering every complex type it names.
    ///
    /// Never fails: types no rule understands become `any` with a warning.
    pub fn project(&self, ty: &TypeDescriptor) -> Projection {
        let (ty, nullable) = unwrap_type(ty);
        self.project_unwrapped(&ty, nullable)
    }

    /// Text of [`project`](Self::project).
    pub fn render(&self, ty: &TypeDescriptor) -> String {
        self.project(ty).text
    }

    /// Whether `ty` needs its own declaration, i.e. is not a builtin.
    pub fn is_complex_type(&self, ty: &TypeDescriptor) -> bool {
        !self.builtins.contains(ty)
    }

    /// Text embedded in a composite: the projection of `ty`, parenthesized if a union.
    fn embedded(&self, ty: &TypeDescriptor) -> String {
        self.project(ty).into_embedded()
    }

    /// Add a `| null` arm when strict nulls are on and the type admits null.
    fn or_null(&self, nullable: bool, projection: Projection) -> Projection {
        if self.config.strict_nulls && nullable {
            Projection::union(format!("{} | null", projection.into_embedded()))
        } else {
            projection
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::ModelRegistry;

    #[test]
    fn test_into_embedded() {
        assert_eq!(Projection::plain("number").into_embedded(), "number");
        assert_eq!(
            Projection::union("string | null").into_embedded(),
            "(string | null)"
        );
    }

    #[test]
    fn test_or_null() {
        let lax = TypeProjector::new(ProjectionConfig::new(), Arc::new(ModelRegistry::new()));
        assert_eq!(
            lax.or_null(true, Projection::plain("Widget")),
            Projection::plain("Widget")
        );

        let strict = TypeProjector::new(
            ProjectionConfig::new().strict_nulls(true),
            Arc::new(ModelRegistry::new()),
        );
        assert_eq!(
            strict.or_null(true, Projection::plain("Widget")),
            Projection::union("Widget | null")
        );
        assert_eq!(
            strict.or_null(false, Projection::plain("number")),
            Projection::plain("number")
        );
        assert_eq!(
            strict.or_null(true, Projection::union("A | B")),
            Projection::union("(A | B) | null")
        );
    }

    #[test]
    fn test_projector_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypeProjector>();
    }
}
