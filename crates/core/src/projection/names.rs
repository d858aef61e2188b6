//! Target-language names for complex types.

use crate::config::ProjectionConfig;
use crate::descriptor::{TypeDescriptor, strip_arity_marker};
use crate::registry::TypeRegistry;

/// Name a complex type is referenced by in generated declarations.
///
/// A configured global namespace wins, then the module the registry placed
/// the type in, then the host's own qualified name. The arity marker is
/// always dropped.
pub fn qualified_name(
    ty: &TypeDescriptor,
    config: &ProjectionConfig,
    registry: &dyn TypeRegistry,
) -> String {
    let name = if let Some(namespace) = config.namespace_override() {
        format!("{namespace}.{}", ty.name())
    } else if let Some(member) = registry.module_of(ty) {
        format!("{}.{}", member.module, member.name)
    } else {
        ty.definition_name().to_string()
    };

    strip_arity_marker(&name).to_string()
}
