//! Registry of complex types discovered during projection.
//!
//! The projector registers every enum, class and interface it names so a
//! declaration emitter can later write one declaration per type. Registration
//! is keyed by generic definition: `Box<A>` and `Box<B>` share one entry.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use tracing::debug;

use crate::descriptor::{TypeDescriptor, TypeKey};

/// Where a registered type is declared in the generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMember {
    /// Target module (namespace) name
    pub module: String,
    /// Member name inside the module, possibly carrying an arity marker
    pub name: String,
}

/// Stores complex types found by the projector.
pub trait TypeRegistry: Send + Sync {
    /// Record `ty` for later emission. Registering the same type again is a no-op.
    fn register(&self, ty: &TypeDescriptor);

    /// Module grouping `ty` was registered under, if any.
    fn module_of(&self, ty: &TypeDescriptor) -> Option<ModuleMember>;
}

#[derive(Debug, Default)]
struct RegistryState {
    order: Vec<TypeDescriptor>,
    members: HashMap<TypeKey, Option<ModuleMember>>,
}

/// In-memory [`TypeRegistry`] grouping types into modules by namespace.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    module_names: HashMap<String, String>,
    state: RwLock<RegistryState>,
}

impl ModelRegistry {
    /// An empty registry; each namespace becomes a module of the same name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit types from host `namespace` under the target module `module`.
    pub fn with_module(mut self, namespace: impl Into<String>, module: impl Into<String>) -> Self {
        self.module_names.insert(namespace.into(), module.into());
        self
    }

    /// Registered types in first-registration order.
    ///
    /// A generic definition appears once, as the first instantiation that
    /// registered it; use [`TypeDescriptor::definition_name`] to name the entry.
    pub fn registered(&self) -> Vec<TypeDescriptor> {
        self.read().order.clone()
    }

    /// Whether the generic definition of `ty` has been registered.
    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.read().members.contains_key(ty.definition_name())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.read().order.is_empty()
    }

    fn module_for(&self, ty: &TypeDescriptor) -> Option<ModuleMember> {
        let namespace = ty.namespace()?;
        let module = self
            .module_names
            .get(namespace)
            .map_or(namespace, String::as_str);
        Some(ModuleMember {
            module: module.to_string(),
            name: ty.name().to_string(),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TypeRegistry for ModelRegistry {
    fn register(&self, ty: &TypeDescriptor) {
        let key = ty.definition_key();
        if self.read().members.contains_key(&key) {
            return;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have won the race between the two locks
        if state.members.contains_key(&key) {
            return;
        }

        debug!(ty = %key, "Registered complex type.");
        state.members.insert(key, self.module_for(ty));
        state.order.push(ty.clone());
    }

    fn module_of(&self, ty: &TypeDescriptor) -> Option<ModuleMember> {
        self.read()
            .members
            .get(ty.definition_name())
            .cloned()
            .flatten()
    }
}
