//! Type catalog structs for serde deserialization.
//!
//! A catalog is the JSON document a host-side exporter writes: the type
//! definitions it discovered plus the type references to project.
//!
//! ```json
//! {
//!   "types": [
//!     { "namespace": "Shop", "name": "Widget", "kind": "class" },
//!     { "namespace": "Shop", "name": "Box`1", "generic_params": ["T"] }
//!   ],
//!   "roots": [
//!     "Shop.Widget",
//!     { "type": "Shop.Box`1", "args": ["System.Int32"] },
//!     { "array": "Shop.Widget" }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::descriptor::{Contracts, TypeKind};

/// Root catalog document.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogDocument {
    /// User type definitions, added on top of the host library.
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
    /// References to project.
    #[serde(default)]
    pub roots: Vec<TypeReference>,
}

/// A type definition as exported by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDefinition {
    /// Declaring namespace.
    pub namespace: Option<String>,
    /// Simple name. Generic definitions get an arity marker appended when missing.
    pub name: String,
    /// Host classification.
    #[serde(default)]
    pub kind: DefinitionKind,
    /// Generic parameter names; non-empty makes this a generic definition.
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Collection contracts the type implements.
    #[serde(default)]
    pub implements: Vec<Contract>,
}

/// Kind of a catalog definition. Arrays and generic parameters are never defined directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    /// Reference type
    #[default]
    Class,
    /// Interface type
    Interface,
    /// Value type
    Struct,
    /// Enumeration
    Enum,
    /// Unclassified host type
    Other,
}

impl From<DefinitionKind> for TypeKind {
    fn from(kind: DefinitionKind) -> Self {
        match kind {
            DefinitionKind::Class => TypeKind::Class,
            DefinitionKind::Interface => TypeKind::Interface,
            DefinitionKind::Struct => TypeKind::Struct,
            DefinitionKind::Enum => TypeKind::Enum,
            DefinitionKind::Other => TypeKind::Other,
        }
    }
}

/// Collection contract named in a definition's `implements` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contract {
    /// Iteration contract
    Sequence,
    /// Key-value mapping contract (implies `sequence`)
    Mapping,
}

impl TypeDefinition {
    /// Collection contracts declared by this definition.
    pub fn contracts(&self) -> Contracts {
        self.implements
            .iter()
            .fold(Contracts::NONE, |acc, contract| match contract {
                Contract::Sequence => Contracts {
                    sequence: true,
                    ..acc
                },
                Contract::Mapping => Contracts::MAPPING,
            })
    }
}

/// Reference to a type: a bare full name, an array, or a closed generic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeReference {
    /// `"Shop.Widget"`; a trailing `[]` makes it an array.
    Name(String),
    /// `{ "array": <reference> }`
    Array {
        /// Element type
        array: Box<TypeReference>,
    },
    /// ``{ "type": "Shop.Box`1", "args": [<reference>...] }``
    Generic {
        /// Definition name, arity marker included
        #[serde(rename = "type")]
        name: String,
        /// Generic arguments
        #[serde(default)]
        args: Vec<TypeReference>,
    },
}

impl TypeReference {
    /// Shorthand for a reference by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Shorthand for a closed generic reference.
    pub fn generic(name: impl Into<String>, args: Vec<TypeReference>) -> Self {
        Self::Generic {
            name: name.into(),
            args,
        }
    }

    /// Shorthand for an array reference.
    pub fn array(element: TypeReference) -> Self {
        Self::Array {
            array: Box::new(element),
        }
    }
}
