/// Field extraction
use indexmap::IndexMap;

use tracing::trace;

use crate::declarations::{TypeDeclaration, UnitContext};
use crate::records::FieldRecord;

use super::{keys, modifier_names, position, qualified, type_vars};

/// One record per declared identifier of every non-synthetic field statement.
///
/// `private List a, b;` yields `<owner>/field/a` and `<owner>/field/b`, both
/// sharing the statement's modifiers.
pub fn extract_fields(
    decl: &TypeDeclaration,
    owner_key: &str,
    ctx: &UnitContext,
) -> IndexMap<String, FieldRecord> {
    let mut fields = IndexMap::new();

    for statement in decl.fields.iter().filter(|f| !f.synthetic) {
        let modifiers = modifier_names(&statement.modifiers);

        for variable in &statement.variables {
            let key = keys::field_key(owner_key, &variable.name);
            let record = FieldRecord {
                name: variable.name.clone(),
                type_name: qualified::qualified_name(&variable.type_mirror, ctx),
                has_type_variable: type_vars::has_type_variable(&variable.type_mirror),
                position: position::ast_position(&variable.span),
                owning_type_key: owner_key.to_string(),
                modifiers: modifiers.clone(),
                key: key.clone(),
            };
            trace!("field {} : {}", key, record.type_name);
            fields.insert(key, record);
        }
    }

    fields
}
