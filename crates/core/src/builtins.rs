//! Builtin table: host primitives with a fixed target-language spelling.

use std::collections::HashMap;

use crate::descriptor::{TypeDescriptor, TypeKey};

/// Target spelling of a builtin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Builtin {
    /// Target primitive name (`number`, `string`, ...)
    pub name: &'static str,
    /// Whether values of the host type may be null even without a nullable wrapper
    pub nullable: bool,
}

impl Builtin {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            nullable: false,
        }
    }

    const fn nullable(name: &'static str) -> Self {
        Self {
            name,
            nullable: true,
        }
    }
}

const STANDARD: &[(&str, Builtin)] = &[
    ("System.Object", Builtin::nullable("any")),
    ("System.Boolean", Builtin::new("boolean")),
    ("System.Byte", Builtin::new("number")),
    ("System.SByte", Builtin::new("number")),
    ("System.Int16", Builtin::new("number")),
    ("System.UInt16", Builtin::new("number")),
    ("System.Int32", Builtin::new("number")),
    ("System.UInt32", Builtin::new("number")),
    ("System.Int64", Builtin::new("number")),
    ("System.UInt64", Builtin::new("number")),
    ("System.Single", Builtin::new("number")),
    ("System.Double", Builtin::new("number")),
    ("System.Decimal", Builtin::new("number")),
    ("System.String", Builtin::nullable("string")),
    ("System.Char", Builtin::new("string")),
    ("System.DateTime", Builtin::new("Date")),
    ("System.DateTimeOffset", Builtin::new("Date")),
    // Byte arrays travel base64-encoded
    ("System.Byte[]", Builtin::nullable("string")),
    ("System.Guid", Builtin::new("string")),
    ("System.Exception", Builtin::nullable("string")),
    ("System.Void", Builtin::new("void")),
];

/// Mapping from host type to [`Builtin`]. Built once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct BuiltinTable {
    entries: HashMap<TypeKey, Builtin>,
}

impl BuiltinTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard host primitive mappings.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (name, builtin) in STANDARD {
            table.insert(*name, *builtin);
        }
        table
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<TypeKey>, builtin: Builtin) {
        self.entries.insert(key.into(), builtin);
    }

    /// Builtin for `ty`, matched on its full host name.
    pub fn get(&self, ty: &TypeDescriptor) -> Option<Builtin> {
        self.entries.get(ty.full_name()).copied()
    }

    /// Whether `ty` has a builtin mapping.
    pub fn contains(&self, ty: &TypeDescriptor) -> bool {
        self.entries.contains_key(ty.full_name())
    }

    /// Entries sorted by host name.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeKey, &Builtin)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::descriptor::TypeKind;

    fn system(name: &str) -> TypeDescriptor {
        TypeDescriptor::builder(name)
            .namespace("System")
            .kind(TypeKind::Struct)
            .build()
    }

    #[test]
    fn test_standard_entries() {
        let table = BuiltinTable::standard();

        assert_eq!(table.get(&system("Int32")), Some(Builtin::new("number")));
        assert_eq!(
            table.get(&system("String")),
            Some(Builtin::nullable("string"))
        );
        assert_eq!(table.get(&system("DateTimeOffset")).unwrap().name, "Date");
        assert_eq!(table.get(&system("Void")).unwrap().name, "void");
        assert!(table.get(&system("TimeSpan")).is_none());
    }

    #[test]
    fn test_byte_array_is_builtin() {
        let table = BuiltinTable::standard();
        let bytes = TypeDescriptor::array_of(system("Byte"));
        assert_eq!(table.get(&bytes), Some(Builtin::nullable("string")));

        let ints = TypeDescriptor::array_of(system("Int32"));
        assert!(!table.contains(&ints));
    }

    #[test]
    fn test_nullable_by_default() {
        let table = BuiltinTable::standard();
        let nullable: Vec<_> = table
            .iter()
            .filter(|(_, builtin)| builtin.nullable)
            .map(|(key, _)| key.as_str())
            .collect();
        assert_eq!(
            nullable,
            vec![
                "System.Byte[]",
                "System.Exception",
                "System.Object",
                "System.String"
            ]
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut table = BuiltinTable::standard();
        let before = table.len();
        table.insert("System.Int64", Builtin::new("bigint"));
        assert_eq!(table.len(), before);
        assert_eq!(table.get(&system("Int64")).unwrap().name, "bigint");
    }
}
