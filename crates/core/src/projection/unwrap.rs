//! Wrapper stripping ahead of the projection cascade.

use crate::descriptor::TypeDescriptor;
use crate::host;

/// Strip async, action-result and nullable-value wrappers from `ty`.
///
/// Returns the type to project and whether it admits null. Each step applies
/// at most once and in order, so ``Task<ActionResult<int?>>`` becomes
/// `(int, true)` but a nullable nested inside a generic argument is left to
/// the recursive projection of that argument.
pub fn unwrap_type(ty: &TypeDescriptor) -> (TypeDescriptor, bool) {
    let mut ty = ty.clone();
    let mut nullable = false;

    if host::is_async_wrapper(&ty) {
        ty = ty.generic_args().first().cloned().unwrap_or_else(host::void);
    }

    if ty.definition_name() == host::ACTION_RESULT
        && let [inner] = ty.generic_args()
    {
        ty = inner.clone();
    }

    if ty.definition_name() == host::NULLABLE
        && let [inner] = ty.generic_args()
    {
        ty = inner.clone();
        nullable = true;
    }

    if ty.is_reference_type() {
        nullable = true;
    }

    (ty, nullable)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::descriptor::TypeKind;

    fn int() -> TypeDescriptor {
        TypeDescriptor::builder("Int32")
            .namespace("System")
            .kind(TypeKind::Struct)
            .build()
    }

    fn widget() -> TypeDescriptor {
        TypeDescriptor::builder("Widget").namespace("Shop").build()
    }

    fn wrap(namespace: &str, name: &str, arg: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::builder(name)
            .namespace(namespace)
            .generic_args(vec![arg])
            .build()
    }

    fn nullable(arg: TypeDescriptor) -> TypeDescriptor {
        wrap("System", "Nullable`1", arg)
    }

    fn task(arg: TypeDescriptor) -> TypeDescriptor {
        wrap("System.Threading.Tasks", "Task`1", arg)
    }

    fn action_result(arg: TypeDescriptor) -> TypeDescriptor {
        wrap("Microsoft.AspNetCore.Mvc", "ActionResult`1", arg)
    }

    #[test]
    fn test_plain_value_type() {
        assert_eq!(unwrap_type(&int()), (int(), false));
    }

    #[test]
    fn test_reference_type_is_nullable() {
        assert_eq!(unwrap_type(&widget()), (widget(), true));
    }

    #[test]
    fn test_nullable_value_type() {
        assert_eq!(unwrap_type(&nullable(int())), (int(), true));
    }

    #[test]
    fn test_task_unwraps_to_result() {
        assert_eq!(unwrap_type(&task(int())), (int(), false));
        assert_eq!(unwrap_type(&task(widget())), (widget(), true));
    }

    #[test]
    fn test_bare_task_is_void() {
        let task = TypeDescriptor::builder("Task")
            .namespace("System.Threading.Tasks")
            .build();
        assert_eq!(unwrap_type(&task), (host::void(), false));
    }

    #[test]
    fn test_wrappers_compose_in_order() {
        let ty = task(action_result(nullable(int())));
        assert_eq!(unwrap_type(&ty), (int(), true));
    }

    #[test]
    fn test_single_pass() {
        // A task of a task keeps the inner task
        let inner = task(int());
        assert_eq!(unwrap_type(&task(inner.clone())), (inner, true));
    }
}
