/// Method and parameter extraction
use indexmap::IndexMap;

use tracing::trace;

use crate::declarations::{MethodDeclaration, TypeDeclaration, UnitContext};
use crate::records::{MethodRecord, ParameterRecord};

use super::{keys, modifier_names, position, qualified, type_vars};

pub fn extract_methods(
    decl: &TypeDeclaration,
    owner_key: &str,
    ctx: &UnitContext,
) -> IndexMap<String, MethodRecord> {
    decl.methods
        .iter()
        .map(|method| {
            let record = extract_method(method, owner_key, ctx);
            (record.key.clone(), record)
        })
        .collect()
}

/// Build one method record; the method key is only known once every
/// parameter type is resolved, so parameter keys are filled in afterwards.
fn extract_method(method: &MethodDeclaration, owner_key: &str, ctx: &UnitContext) -> MethodRecord {
    let mut parameters: Vec<ParameterRecord> = method
        .parameters
        .iter()
        .map(|parameter| ParameterRecord {
            name: parameter.name.clone(),
            type_name: qualified::qualified_name(&parameter.type_mirror, ctx),
            has_type_variable: type_vars::has_type_variable(&parameter.type_mirror),
            position: position::ast_position(&parameter.span),
            modifiers: modifier_names(&parameter.modifiers),
            key: String::new(),
            owning_method_key: String::new(),
        })
        .collect();

    let key = keys::method_key(
        owner_key,
        &method.name,
        parameters
            .iter()
            .map(|p| (p.type_name.as_str(), p.name.as_str())),
    );

    for parameter in &mut parameters {
        parameter.key = keys::parameter_key(&key, &parameter.name);
        parameter.owning_method_key = key.clone();
    }

    trace!("method {}", key);

    MethodRecord {
        name: method.name.clone(),
        return_type: qualified::qualified_name(&method.return_type, ctx),
        position: position::ast_position(&method.span),
        owning_type_key: owner_key.to_string(),
        modifiers: modifier_names(&method.modifiers),
        overrides_super_method: method.overrides,
        parameters,
        key,
    }
}
