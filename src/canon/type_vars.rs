/// Type-variable detection
use crate::declarations::TypeMirror;

/// True when the type is a type parameter, or a parameterized type with a
/// type parameter among its direct arguments.
///
/// Only one level of type arguments is inspected: `List<List<T>>` is not
/// flagged.
pub fn has_type_variable(mirror: &TypeMirror) -> bool {
    match mirror {
        TypeMirror::TypeVariable(_) => true,
        TypeMirror::Declared { type_arguments, .. } => {
            type_arguments.iter().any(TypeMirror::is_type_variable)
        }
        _ => false,
    }
}
