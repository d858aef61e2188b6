//! Well-known host runtime types.
//!
//! Names the projection cascade recognizes by identity, plus the standard
//! library definitions every catalog starts from.

use crate::catalog::{Contract, DefinitionKind, TypeDefinition};
use crate::descriptor::{TypeDescriptor, TypeKind};

/// The host's `void`.
pub const VOID: &str = "System.Void";

/// Value-type nullable wrapper.
pub const NULLABLE: &str = "System.Nullable`1";

/// Asynchronous computation wrappers. The non-generic forms complete with no result.
pub const ASYNC_WRAPPERS: [&str; 4] = [
    "System.Threading.Tasks.Task",
    "System.Threading.Tasks.Task`1",
    "System.Threading.Tasks.ValueTask",
    "System.Threading.Tasks.ValueTask`1",
];

/// Web framework result wrapper generic over the returned value.
pub const ACTION_RESULT: &str = "Microsoft.AspNetCore.Mvc.ActionResult`1";

/// Simple name of the polymorphic action result interface.
pub const ACTION_RESULT_INTERFACE: &str = "IActionResult";

/// Simple name of the submitted form data interface.
pub const FORM_COLLECTION_INTERFACE: &str = "IFormCollection";

/// Namespaces holding shapeless JSON document types.
pub const DYNAMIC_JSON_NAMESPACES: [&str; 2] = ["Newtonsoft.Json.Linq", "System.Text.Json.Nodes"];

/// Root namespace of the host runtime's own library.
pub const RUNTIME_NAMESPACE: &str = "System";

/// Whether `ty` is one of the [`ASYNC_WRAPPERS`].
pub fn is_async_wrapper(ty: &TypeDescriptor) -> bool {
    ASYNC_WRAPPERS.contains(&ty.definition_name())
}

/// Whether `namespace` holds dynamic JSON document types.
pub fn is_dynamic_json_namespace(namespace: &str) -> bool {
    DYNAMIC_JSON_NAMESPACES.contains(&namespace)
}

/// Whether `namespace` belongs to the host runtime rather than application code.
pub fn is_runtime_namespace(namespace: &str) -> bool {
    namespace == RUNTIME_NAMESPACE
        || namespace
            .strip_prefix(RUNTIME_NAMESPACE)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Descriptor for [`VOID`].
pub fn void() -> TypeDescriptor {
    TypeDescriptor::builder("Void")
        .namespace(RUNTIME_NAMESPACE)
        .kind(TypeKind::Struct)
        .build()
}

type Entry = (
    &'static str,
    &'static str,
    DefinitionKind,
    &'static [&'static str],
    &'static [Contract],
);

const SEQ: &[Contract] = &[Contract::Sequence];
const MAP: &[Contract] = &[Contract::Mapping];
const ITEM: &[&str] = &["T"];
const KEY_VALUE: &[&str] = &["TKey", "TValue"];

const STANDARD_LIBRARY: &[Entry] = &[
    // Primitives and core value types
    ("System", "Object", DefinitionKind::Class, &[], &[]),
    ("System", "Boolean", DefinitionKind::Struct, &[], &[]),
    ("System", "Byte", DefinitionKind::Struct, &[], &[]),
    ("System", "SByte", DefinitionKind::Struct, &[], &[]),
    ("System", "Int16", DefinitionKind::Struct, &[], &[]),
    ("System", "UInt16", DefinitionKind::Struct, &[], &[]),
    ("System", "Int32", DefinitionKind::Struct, &[], &[]),
    ("System", "UInt32", DefinitionKind::Struct, &[], &[]),
    ("System", "Int64", DefinitionKind::Struct, &[], &[]),
    ("System", "UInt64", DefinitionKind::Struct, &[], &[]),
    ("System", "Single", DefinitionKind::Struct, &[], &[]),
    ("System", "Double", DefinitionKind::Struct, &[], &[]),
    ("System", "Decimal", DefinitionKind::Struct, &[], &[]),
    ("System", "Char", DefinitionKind::Struct, &[], &[]),
    ("System", "String", DefinitionKind::Class, &[], SEQ),
    ("System", "DateTime", DefinitionKind::Struct, &[], &[]),
    ("System", "DateTimeOffset", DefinitionKind::Struct, &[], &[]),
    ("System", "TimeSpan", DefinitionKind::Struct, &[], &[]),
    ("System", "Guid", DefinitionKind::Struct, &[], &[]),
    ("System", "Uri", DefinitionKind::Class, &[], &[]),
    ("System", "Exception", DefinitionKind::Class, &[], &[]),
    ("System", "Void", DefinitionKind::Struct, &[], &[]),
    ("System", "Nullable`1", DefinitionKind::Struct, ITEM, &[]),
    // Async
    ("System.Threading.Tasks", "Task", DefinitionKind::Class, &[], &[]),
    ("System.Threading.Tasks", "Task`1", DefinitionKind::Class, &["TResult"], &[]),
    ("System.Threading.Tasks", "ValueTask", DefinitionKind::Struct, &[], &[]),
    ("System.Threading.Tasks", "ValueTask`1", DefinitionKind::Struct, &["TResult"], &[]),
    // Collections
    ("System.Collections", "IEnumerable", DefinitionKind::Interface, &[], SEQ),
    ("System.Collections", "IDictionary", DefinitionKind::Interface, &[], MAP),
    ("System.Collections", "ArrayList", DefinitionKind::Class, &[], SEQ),
    ("System.Collections", "Hashtable", DefinitionKind::Class, &[], MAP),
    ("System.Collections.Generic", "IEnumerable`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "ICollection`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "IList`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "IReadOnlyCollection`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "IReadOnlyList`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "ISet`1", DefinitionKind::Interface, ITEM, SEQ),
    ("System.Collections.Generic", "List`1", DefinitionKind::Class, ITEM, SEQ),
    ("System.Collections.Generic", "HashSet`1", DefinitionKind::Class, ITEM, SEQ),
    ("System.Collections.Generic", "IDictionary`2", DefinitionKind::Interface, KEY_VALUE, MAP),
    (
        "System.Collections.Generic",
        "IReadOnlyDictionary`2",
        DefinitionKind::Interface,
        KEY_VALUE,
        MAP,
    ),
    ("System.Collections.Generic", "Dictionary`2", DefinitionKind::Class, KEY_VALUE, MAP),
    ("System.Collections.Generic", "KeyValuePair`2", DefinitionKind::Struct, KEY_VALUE, &[]),
    // Web framework
    ("Microsoft.AspNetCore.Mvc", "IActionResult", DefinitionKind::Interface, &[], &[]),
    ("Microsoft.AspNetCore.Mvc", "ActionResult`1", DefinitionKind::Class, &["TValue"], &[]),
    ("Microsoft.AspNetCore.Http", "IFormCollection", DefinitionKind::Interface, &[], MAP),
    // Dynamic JSON documents
    ("Newtonsoft.Json.Linq", "JToken", DefinitionKind::Class, &[], SEQ),
    ("Newtonsoft.Json.Linq", "JObject", DefinitionKind::Class, &[], MAP),
    ("Newtonsoft.Json.Linq", "JArray", DefinitionKind::Class, &[], SEQ),
    ("System.Text.Json.Nodes", "JsonNode", DefinitionKind::Class, &[], &[]),
    ("System.Text.Json.Nodes", "JsonObject", DefinitionKind::Class, &[], MAP),
    ("System.Text.Json.Nodes", "JsonArray", DefinitionKind::Class, &[], SEQ),
];

/// Definitions of the host runtime library types a catalog can reference without declaring.
pub fn standard_library() -> Vec<TypeDefinition> {
    STANDARD_LIBRARY
        .iter()
        .map(|(namespace, name, kind, params, implements)| TypeDefinition {
            namespace: Some((*namespace).to_string()),
            name: (*name).to_string(),
            kind: *kind,
            generic_params: params.iter().map(|p| (*p).to_string()).collect(),
            implements: implements.to_vec(),
        })
        .collect()
}
