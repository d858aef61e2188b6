//! Type catalogs: the host-side inventory of types the engine can project.
//!
//! A catalog always starts from the host standard library; user definitions
//! from a JSON document are added on top. References are resolved into
//! [`TypeDescriptor`]s, closing generic definitions over their arguments.

mod document;

use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::{ARITY_MARKER, TypeDescriptor, strip_arity_marker};
use crate::error::CatalogError;
use crate::host;

pub use document::{CatalogDocument, Contract, DefinitionKind, TypeDefinition, TypeReference};

/// Definitions by name plus the references to project.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    definitions: HashMap<String, TypeDescriptor>,
    roots: Vec<TypeReference>,
}

impl Catalog {
    /// An empty catalog, without even the host library.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the host standard library definitions.
    pub fn with_host_library() -> Self {
        let mut catalog = Self::new();
        for definition in host::standard_library() {
            let descriptor = build_definition(&definition);
            catalog
                .definitions
                .insert(descriptor.definition_name().to_string(), descriptor);
        }
        catalog
    }

    /// Parse a catalog document and add its definitions to the host library.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Add a parsed document's definitions to the host library.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut catalog = Self::with_host_library();
        for definition in &document.types {
            catalog.define(definition)?;
        }
        catalog.roots = document.roots;

        debug!(
            definitions = catalog.definitions.len(),
            roots = catalog.roots.len(),
            "Loaded type catalog."
        );

        Ok(catalog)
    }

    /// Add a definition. Fails if a type with the same full name exists, or
    /// if the name or namespace is blank.
    pub fn define(&mut self, definition: &TypeDefinition) -> Result<TypeDescriptor, CatalogError> {
        validate_definition(definition)?;
        let descriptor = build_definition(definition);
        let name = descriptor.definition_name().to_string();
        if self.definitions.contains_key(&name) {
            return Err(CatalogError::DuplicateDefinition(name));
        }
        self.definitions.insert(name, descriptor.clone());
        Ok(descriptor)
    }

    /// Look up a definition by its namespace-qualified name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.definitions.get(name)
    }

    /// Number of definitions, host library included.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// References listed in the document's `roots`.
    pub fn roots(&self) -> &[TypeReference] {
        &self.roots
    }

    /// Resolve every root reference, in document order.
    pub fn resolve_roots(&self) -> Result<Vec<TypeDescriptor>, CatalogError> {
        self.roots.iter().map(|root| self.resolve(root)).collect()
    }

    /// Resolve a reference into a descriptor.
    pub fn resolve(&self, reference: &TypeReference) -> Result<TypeDescriptor, CatalogError> {
        match reference {
            TypeReference::Name(name) => self.resolve_name(name),
            TypeReference::Array { array } => Ok(TypeDescriptor::array_of(self.resolve(array)?)),
            TypeReference::Generic { name, args } => {
                let definition = self.lookup(name)?;
                let expected = if definition.is_generic_definition() {
                    definition.generic_args().len()
                } else {
                    0
                };
                if args.len() != expected {
                    return Err(CatalogError::ArityMismatch {
                        name: name.clone(),
                        expected,
                        actual: args.len(),
                    });
                }
                if args.is_empty() {
                    return Ok(definition.clone());
                }

                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(definition.make_generic(args))
            }
        }
    }

    /// Resolve a bare name. A trailing `[]` resolves to an array; a generic
    /// definition name resolves to the open definition.
    pub fn resolve_name(&self, name: &str) -> Result<TypeDescriptor, CatalogError> {
        if let Some(element) = name.strip_suffix("[]") {
            return Ok(TypeDescriptor::array_of(self.resolve_name(element)?));
        }
        self.lookup(name).cloned()
    }

    fn lookup(&self, name: &str) -> Result<&TypeDescriptor, CatalogError> {
        self.definitions
            .get(name)
            .ok_or_else(|| CatalogError::UnknownType(name.to_string()))
    }
}

/// A usable name keeps some text once the arity marker is stripped.
fn validate_definition(definition: &TypeDefinition) -> Result<(), CatalogError> {
    let name = &definition.name;
    if strip_arity_marker(name).trim().is_empty() || name.starts_with(ARITY_MARKER) {
        return Err(CatalogError::InvalidDefinition {
            name: name.clone(),
            reason: "blank type name",
        });
    }
    if definition
        .namespace
        .as_deref()
        .is_some_and(|namespace| namespace.trim().is_empty())
    {
        return Err(CatalogError::InvalidDefinition {
            name: name.clone(),
            reason: "blank namespace",
        });
    }
    Ok(())
}

/// Build the (possibly open generic) descriptor for a definition.
fn build_definition(definition: &TypeDefinition) -> TypeDescriptor {
    let arity = definition.generic_params.len();
    let name = if arity > 0 && !definition.name.contains(ARITY_MARKER) {
        format!("{}{ARITY_MARKER}{arity}", definition.name)
    } else {
        definition.name.clone()
    };

    let mut builder = TypeDescriptor::builder(name)
        .kind(definition.kind.into())
        .contracts(definition.contracts())
        .generic_params(definition.generic_params.as_slice());
    if let Some(namespace) = &definition.namespace {
        builder = builder.namespace(namespace);
    }
    builder.build()
}
