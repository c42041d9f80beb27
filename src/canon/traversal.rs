/// Traversal controller
///
/// Builds a full record for a declaration, recursing into every nested
/// declaration, and lists the declarations of a unit in the order a
/// declaration walker visits them.
use tracing::debug;

use crate::declarations::{CompilationUnit, TypeDeclaration, UnitContext};
use crate::records::TypeRecord;

use super::{classes, fields, methods};

/// Complete record for `decl`, nested declarations included.
///
/// `enclosing_key` is the key of the lexically enclosing declaration, if any.
pub fn build_type_record(
    decl: &TypeDeclaration,
    ctx: &UnitContext,
    enclosing_key: Option<&str>,
) -> TypeRecord {
    let mut record = classes::extract_type_metadata(decl, ctx);
    record.fields = fields::extract_fields(decl, &record.key, ctx);
    record.methods = methods::extract_methods(decl, &record.key, ctx);
    classes::extract_extends_and_implements(decl, ctx, &mut record);
    record.defined_in_type_key = enclosing_key.map(str::to_string);

    for nested in &decl.nested {
        let inner = build_type_record(nested, ctx, Some(&record.key));
        let previous = record
            .inner_types_mut(nested.kind)
            .insert(inner.key.clone(), inner);
        if let Some(previous) = previous {
            debug!(
                "nested {} '{}' shadows an earlier declaration with the same key in {}",
                previous.kind, previous.key, record.key
            );
        }
    }

    record
}

/// Records for every declaration of the unit, in walker order: each top-level
/// declaration followed by its nested declarations, depth first.
///
/// A nested declaration appears twice in the output: inside its parent's
/// record and as an entry of its own.
pub fn visit_unit(unit: &CompilationUnit) -> Vec<TypeRecord> {
    let mut visited = Vec::with_capacity(unit.declaration_count());
    for decl in &unit.types {
        visit_declaration(decl, &unit.context, None, &mut visited);
    }
    visited
}

fn visit_declaration(
    decl: &TypeDeclaration,
    ctx: &UnitContext,
    enclosing_key: Option<&str>,
    visited: &mut Vec<TypeRecord>,
) {
    let record = build_type_record(decl, ctx, enclosing_key);
    let key = record.key.clone();
    visited.push(record);

    for nested in &decl.nested {
        visit_declaration(nested, ctx, Some(&key), visited);
    }
}
