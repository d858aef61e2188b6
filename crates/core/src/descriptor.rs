//! Type descriptors: the engine's view of a host runtime type.
//!
//! A descriptor is an immutable, cheaply clonable handle. Two descriptors are
//! equal when their full host names are equal, no matter how they were built,
//! so a descriptor constructed from a catalog and one constructed by hand for
//! the same type are interchangeable as table keys.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Character the host runtime uses to mark generic arity (``Box`1``).
pub const ARITY_MARKER: char = '`';

/// Identity of a type in the builtin, override and registry tables.
///
/// Wraps the full host name, e.g. `System.Int32` or
/// ``System.Collections.Generic.List`1[[System.String]]``.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    /// Create a key from a full host name.
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    /// The full host name this key wraps.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape of a type as the host runtime classifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// Reference type
    Class,
    /// Interface type
    Interface,
    /// Value type that is not an enum
    Struct,
    /// Enumeration (a value type)
    Enum,
    /// Single-dimensional array of the element type
    Array(TypeDescriptor),
    /// Unbound generic parameter such as `T`
    GenericParameter,
    /// Anything the host exposes that fits none of the above (pointers, by-ref types)
    Other,
}

/// Collection contracts a type implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contracts {
    /// Implements the iteration contract (sequence of T)
    pub sequence: bool,
    /// Implements the key-value mapping contract (dictionary of K, V)
    pub mapping: bool,
}

impl Contracts {
    /// No collection contract.
    pub const NONE: Self = Self {
        sequence: false,
        mapping: false,
    };

    /// Iteration contract only.
    pub const SEQUENCE: Self = Self {
        sequence: true,
        mapping: false,
    };

    /// Key-value mapping. Mappings are enumerable as well, like every host dictionary.
    pub const MAPPING: Self = Self {
        sequence: true,
        mapping: true,
    };
}

#[derive(Debug)]
struct TypeInfo {
    namespace: Option<String>,
    name: String,
    kind: TypeKind,
    generic_args: Vec<TypeDescriptor>,
    generic_definition: bool,
    contracts: Contracts,
    definition_name: String,
    full_name: String,
}

/// Handle describing one host runtime type.
#[derive(Clone)]
pub struct TypeDescriptor(Arc<TypeInfo>);

impl TypeDescriptor {
    /// Start building a descriptor for the type spelled `name` by the host.
    pub fn builder(name: impl Into<String>) -> TypeBuilder {
        TypeBuilder {
            namespace: None,
            name: name.into(),
            kind: TypeKind::Class,
            generic_args: Vec::new(),
            generic_definition: false,
            contracts: Contracts::NONE,
        }
    }

    /// Array of `element`. Arrays live in the element's namespace and are enumerable.
    pub fn array_of(element: TypeDescriptor) -> Self {
        let name = format!("{}[]", element.name());
        let definition_name = format!("{}[]", element.definition_name());
        let full_name = format!("{}[]", element.full_name());
        Self(Arc::new(TypeInfo {
            namespace: element.namespace().map(str::to_string),
            name,
            kind: TypeKind::Array(element),
            generic_args: Vec::new(),
            generic_definition: false,
            contracts: Contracts::SEQUENCE,
            definition_name,
            full_name,
        }))
    }

    /// Close this type over `args`, keeping its namespace, name, kind and contracts.
    pub fn make_generic(&self, args: Vec<TypeDescriptor>) -> Self {
        TypeBuilder {
            namespace: self.0.namespace.clone(),
            name: self.0.name.clone(),
            kind: self.0.kind.clone(),
            generic_args: args,
            generic_definition: false,
            contracts: self.0.contracts,
        }
        .build()
    }

    /// Declaring namespace, if the type has one.
    pub fn namespace(&self) -> Option<&str> {
        self.0.namespace.as_deref()
    }

    /// Simple name as the host spells it, arity marker included.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Simple name with any generic arity marker removed.
    pub fn simple_name(&self) -> &str {
        strip_arity_marker(&self.0.name)
    }

    /// Namespace-qualified name without generic arguments (``Shop.Box`1``).
    pub fn definition_name(&self) -> &str {
        &self.0.definition_name
    }

    /// Full host name, generic arguments included. This is the descriptor's identity.
    pub fn full_name(&self) -> &str {
        &self.0.full_name
    }

    /// Table key for this exact type.
    pub fn key(&self) -> TypeKey {
        TypeKey::new(self.full_name())
    }

    /// Table key for the generic definition of this type (the type itself when not generic).
    pub fn definition_key(&self) -> TypeKey {
        TypeKey::new(self.definition_name())
    }

    /// Host classification of the type.
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Collection contracts implemented by the type.
    pub fn contracts(&self) -> Contracts {
        self.0.contracts
    }

    /// Generic arguments, or generic parameters for an open definition.
    pub fn generic_args(&self) -> &[TypeDescriptor] {
        &self.0.generic_args
    }

    /// Whether the type has generic arguments or parameters.
    pub fn is_generic(&self) -> bool {
        !self.0.generic_args.is_empty()
    }

    /// Whether this is an open generic definition such as ``List`1``.
    pub fn is_generic_definition(&self) -> bool {
        self.0.generic_definition
    }

    /// Element type of an array.
    pub fn element_type(&self) -> Option<&TypeDescriptor> {
        match &self.0.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Whether the type is a class.
    pub fn is_class(&self) -> bool {
        matches!(self.0.kind, TypeKind::Class)
    }

    /// Whether the type is an interface.
    pub fn is_interface(&self) -> bool {
        matches!(self.0.kind, TypeKind::Interface)
    }

    /// Whether the type is an enum.
    pub fn is_enum(&self) -> bool {
        matches!(self.0.kind, TypeKind::Enum)
    }

    /// Whether the type is an array.
    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array(_))
    }

    /// Value types are structs and enums.
    pub fn is_value_type(&self) -> bool {
        matches!(self.0.kind, TypeKind::Struct | TypeKind::Enum)
    }

    /// Reference types are classes, interfaces and arrays.
    pub fn is_reference_type(&self) -> bool {
        matches!(
            self.0.kind,
            TypeKind::Class | TypeKind::Interface | TypeKind::Array(_)
        )
    }

    /// Whether the type implements the iteration contract.
    pub fn implements_sequence(&self) -> bool {
        self.0.contracts.sequence
    }

    /// Whether the type implements the key-value mapping contract.
    pub fn implements_mapping(&self) -> bool {
        self.0.contracts.mapping
    }

    /// Human readable host name for diagnostics: `Shop.Box<Shop.Widget>`.
    ///
    /// Never used in generated declarations.
    pub fn pretty_name(&self) -> String {
        if !self.is_generic() {
            return self.full_name().to_string();
        }

        let args = self
            .generic_args()
            .iter()
            .map(TypeDescriptor::pretty_name)
            .collect::<Vec<_>>()
            .join(", ");

        match self.namespace() {
            Some(namespace) => format!("{namespace}.{}<{args}>", self.simple_name()),
            None => format!("{}<{args}>", self.simple_name()),
        }
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.full_name == other.0.full_name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.full_name.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeDescriptor")
            .field(&self.0.full_name)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_name())
    }
}

/// Builder for [`TypeDescriptor`].
#[derive(Debug)]
pub struct TypeBuilder {
    namespace: Option<String>,
    name: String,
    kind: TypeKind,
    generic_args: Vec<TypeDescriptor>,
    generic_definition: bool,
    contracts: Contracts,
}

impl TypeBuilder {
    /// Set the declaring namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the kind. Defaults to [`TypeKind::Class`].
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the implemented collection contracts.
    pub fn contracts(mut self, contracts: Contracts) -> Self {
        self.contracts = contracts;
        self
    }

    /// Close the type over concrete generic arguments.
    pub fn generic_args(mut self, args: Vec<TypeDescriptor>) -> Self {
        self.generic_args = args;
        self.generic_definition = false;
        self
    }

    /// Make the type an open generic definition over the named parameters.
    pub fn generic_params<S: AsRef<str>>(mut self, params: &[S]) -> Self {
        self.generic_args = params
            .iter()
            .map(|param| {
                TypeDescriptor::builder(param.as_ref())
                    .kind(TypeKind::GenericParameter)
                    .build()
            })
            .collect();
        self.generic_definition = !self.generic_args.is_empty();
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> TypeDescriptor {
        let definition_name = match &self.namespace {
            Some(namespace) => format!("{namespace}.{}", self.name),
            None => self.name.clone(),
        };

        let full_name = if self.generic_definition || self.generic_args.is_empty() {
            definition_name.clone()
        } else {
            let args = self
                .generic_args
                .iter()
                .map(|arg| format!("[{}]", arg.full_name()))
                .collect::<Vec<_>>()
                .join(",");
            format!("{definition_name}[{args}]")
        };

        TypeDescriptor(Arc::new(TypeInfo {
            namespace: self.namespace,
            name: self.name,
            kind: self.kind,
            generic_args: self.generic_args,
            generic_definition: self.generic_definition,
            contracts: self.contracts,
            definition_name,
            full_name,
        }))
    }
}

/// Remove a trailing generic arity marker: ``Box`1`` becomes `Box`.
///
/// Only a marker followed by digits up to the end of the name is removed.
pub fn strip_arity_marker(name: &str) -> &str {
    match name.rfind(ARITY_MARKER) {
        Some(pos)
            if pos > 0
                && pos + 1 < name.len()
                && name[pos + 1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            &name[..pos]
        }
        _ => name,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn widget() -> TypeDescriptor {
        TypeDescriptor::builder("Widget").namespace("Shop").build()
    }

    fn boxed(arg: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::builder("Box`1")
            .namespace("Shop")
            .generic_args(vec![arg])
            .build()
    }

    #[test]
    fn test_strip_arity_marker() {
        assert_eq!(strip_arity_marker("Box`1"), "Box");
        assert_eq!(strip_arity_marker("Dictionary`2"), "Dictionary");
        assert_eq!(strip_arity_marker("Shop.Pair`12"), "Shop.Pair");
        assert_eq!(strip_arity_marker("Widget"), "Widget");
        // Not a trailing digit run: leave untouched
        assert_eq!(strip_arity_marker("Box`"), "Box`");
        assert_eq!(strip_arity_marker("Box`1x"), "Box`1x");
        assert_eq!(strip_arity_marker("`1"), "`1");
    }

    #[test]
    fn test_full_names() {
        assert_eq!(widget().full_name(), "Shop.Widget");
        assert_eq!(boxed(widget()).full_name(), "Shop.Box`1[[Shop.Widget]]");
        assert_eq!(boxed(widget()).definition_name(), "Shop.Box`1");

        let pair = TypeDescriptor::builder("Pair`2")
            .namespace("Shop")
            .generic_args(vec![widget(), boxed(widget())])
            .build();
        assert_eq!(
            pair.full_name(),
            "Shop.Pair`2[[Shop.Widget],[Shop.Box`1[[Shop.Widget]]]]"
        );
    }

    #[test]
    fn test_generic_definition() {
        let definition = TypeDescriptor::builder("Box`1")
            .namespace("Shop")
            .generic_params(&["T"])
            .build();
        assert!(definition.is_generic_definition());
        assert!(definition.is_generic());
        assert_eq!(definition.full_name(), "Shop.Box`1");
        assert_eq!(
            definition.generic_args()[0].kind(),
            &TypeKind::GenericParameter
        );

        let closed = definition.make_generic(vec![widget()]);
        assert!(!closed.is_generic_definition());
        assert_eq!(closed, boxed(widget()));
    }

    #[test]
    fn test_equality_is_by_full_name() {
        let a = widget();
        let b = widget();
        assert_eq!(a, b);
        assert_ne!(a, boxed(widget()));

        let mut set = std::collections::HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_array_of() {
        let array = TypeDescriptor::array_of(widget());
        assert!(array.is_array());
        assert!(array.is_reference_type());
        assert!(array.implements_sequence());
        assert_eq!(array.namespace(), Some("Shop"));
        assert_eq!(array.full_name(), "Shop.Widget[]");
        assert_eq!(array.element_type(), Some(&widget()));
    }

    #[test]
    fn test_value_and_reference_kinds() {
        let point = TypeDescriptor::builder("Point")
            .namespace("Shop")
            .kind(TypeKind::Struct)
            .build();
        let color = TypeDescriptor::builder("Color")
            .namespace("Shop")
            .kind(TypeKind::Enum)
            .build();
        let shape = TypeDescriptor::builder("IShape")
            .namespace("Shop")
            .kind(TypeKind::Interface)
            .build();

        assert!(point.is_value_type() && !point.is_reference_type());
        assert!(color.is_value_type() && color.is_enum());
        assert!(shape.is_reference_type() && shape.is_interface());
    }

    #[test]
    fn test_pretty_name() {
        assert_eq!(widget().pretty_name(), "Shop.Widget");
        assert_eq!(boxed(widget()).pretty_name(), "Shop.Box<Shop.Widget>");
        assert_eq!(
            boxed(boxed(widget())).pretty_name(),
            "Shop.Box<Shop.Box<Shop.Widget>>"
        );

        let global = TypeDescriptor::builder("Holder`1")
            .generic_args(vec![widget()])
            .build();
        assert_eq!(global.pretty_name(), "Holder<Shop.Widget>");
        assert_eq!(format!("{}", boxed(widget())), "Shop.Box<Shop.Widget>");
    }

    #[test]
    fn test_type_key_borrows_as_str() {
        let mut map = std::collections::HashMap::new();
        map.insert(TypeKey::from("System.Int32"), 1);
        assert_eq!(map.get("System.Int32"), Some(&1));
    }
}
