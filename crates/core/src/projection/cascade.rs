//! The ordered projection rules. First match wins.

use tracing::debug;

use super::names::qualified_name;
use super::{Projection, TypeProjector};
use crate::descriptor::TypeDescriptor;
use crate::host;

const ANY: &str = "any";

impl TypeProjector {
    /// Project a type that has already been through [`super::unwrap_type`].
    pub(super) fn project_unwrapped(&self, ty: &TypeDescriptor, nullable: bool) -> Projection {
        // ====================================================================
        // Literal mappings
        // ====================================================================

        if let Some(text) = self.config.override_for(ty.full_name()) {
            return Projection::plain(text);
        }

        if let Some(builtin) = self.builtins.get(ty) {
            return self.or_null(
                builtin.nullable || nullable,
                Projection::plain(builtin.name),
            );
        }

        match ty.name() {
            host::ACTION_RESULT_INTERFACE => return Projection::plain("any /* IActionResult */"),
            host::FORM_COLLECTION_INTERFACE => return Projection::plain("FormData"),
            _ => {}
        }

        if ty.namespace().is_some_and(host::is_dynamic_json_namespace) {
            return Projection::plain(ANY);
        }

        // ====================================================================
        // Collections
        // ====================================================================

        if ty.implements_mapping() {
            return match ty.generic_args() {
                [key, value] => Projection::plain(format!(
                    "{{ [key: {}]: {} }}",
                    self.project(key).text,
                    self.embedded(value)
                )),
                _ => Projection::plain("{ [key: string]: any }"),
            };
        }

        if let Some(element) = ty.element_type() {
            return Projection::plain(format!("{}[]", self.embedded(element)));
        }

        if ty.implements_sequence() {
            return match ty.generic_args().first() {
                Some(item) => Projection::plain(format!("{}[]", self.embedded(item))),
                None => Projection::plain("any[]"),
            };
        }

        // ====================================================================
        // Complex types
        // ====================================================================

        if ty.is_enum() {
            self.registry.register(ty);
            let name = qualified_name(ty, &self.config, self.registry.as_ref());
            debug!(ty = %ty, name = %name, "Projected enum.");
            return self.or_null(nullable, Projection::plain(name));
        }

        if ty.namespace().is_some_and(host::is_runtime_namespace) {
            return Projection::plain(ANY);
        }

        if ty.is_class() || ty.is_interface() {
            self.registry.register(ty);
            let mut text = qualified_name(ty, &self.config, self.registry.as_ref());
            if ty.is_generic() {
                let args = ty
                    .generic_args()
                    .iter()
                    .map(|arg| self.project(arg).text)
                    .collect::<Vec<_>>()
                    .join(", ");
                text = format!("{text}<{args}>");
            }
            return self.or_null(nullable, Projection::plain(text));
        }

        self.diagnostics.warn(&format!(
            "Unknown conversion for type: {}",
            ty.pretty_name()
        ));
        Projection::plain(ANY)
    }
}
