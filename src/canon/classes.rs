/// Class/interface metadata and extends/implements extraction
use crate::declarations::{TypeDeclaration, UnitContext};
use crate::records::TypeRecord;

use super::{keys, modifier_names, position, qualified};

/// Record shell with name, key, kind, position, anonymity and modifiers.
pub fn extract_type_metadata(decl: &TypeDeclaration, ctx: &UnitContext) -> TypeRecord {
    let key = keys::type_key(decl.canonical_name.as_deref(), &decl.simple_name);
    let mut record = TypeRecord::new(
        decl.simple_name.clone(),
        key,
        decl.kind,
        ctx.source_file_path.clone(),
    );
    record.position = position::ast_position(&decl.span);
    record.anonymous = decl.anonymous;
    record.modifiers = modifier_names(&decl.modifiers);
    record
}

/// Qualified names of the `extends` and `implements` clauses, order and
/// duplicates kept as written.
pub fn extract_extends_and_implements(
    decl: &TypeDeclaration,
    ctx: &UnitContext,
    record: &mut TypeRecord,
) {
    record.implements = decl
        .implements
        .iter()
        .map(|mirror| qualified::qualified_name(mirror, ctx))
        .collect();
    record.extends = decl
        .extends
        .iter()
        .map(|mirror| qualified::qualified_name(mirror, ctx))
        .collect();
}
