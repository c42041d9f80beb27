/// Method and parameter extraction
///
/// Constructors are not methods here; only `method_declaration` nodes are
/// extracted.
use std::collections::BTreeSet;

use tracing::trace;
use tree_sitter::Node;

use crate::declarations::{
    MethodDeclaration, Modifier, ParameterDeclaration, TypeKind, TypeMirror,
};
use crate::extractors::java::JavaExtractor;

use super::{helpers, types};

/// Extract a method declared in a body of `enclosing` kind.
///
/// The method's own type parameters must already be in scope.
pub(super) fn extract_method(
    extractor: &JavaExtractor,
    node: Node,
    enclosing: TypeKind,
) -> Option<MethodDeclaration> {
    let name_node = node.child_by_field_name("name")?;
    let name = extractor.get_node_text(&name_node);

    let explicit = helpers::extract_modifiers(extractor, &node);
    let has_body = node.child_by_field_name("body").is_some();
    let modifiers = helpers::effective_method_modifiers(enclosing, &explicit, has_body);

    // `int values()[]` is legal and returns int[]
    let dimensions = node
        .child_by_field_name("dimensions")
        .map(|d| helpers::count_dimensions(&d))
        .unwrap_or(0);
    let return_type = node
        .child_by_field_name("type")
        .map(|type_node| types::resolve_type(extractor, &type_node))
        .unwrap_or(TypeMirror::Void)
        .array_of(dimensions);

    let parameters = node
        .child_by_field_name("parameters")
        .map(|params| extract_parameters(extractor, params))
        .unwrap_or_default();

    trace!("method {}({} parameters)", name, parameters.len());

    Some(MethodDeclaration {
        name,
        return_type,
        span: helpers::span_of(extractor, &node),
        modifiers: Some(modifiers),
        overrides: explicit.has_annotation("Override", "java.lang.Override"),
        parameters,
    })
}

/// Parameters of a `formal_parameters` node, receiver parameter excluded.
fn extract_parameters(extractor: &JavaExtractor, params: Node) -> Vec<ParameterDeclaration> {
    params
        .children(&mut params.walk())
        .filter_map(|param| match param.kind() {
            "formal_parameter" => extract_formal_parameter(extractor, param),
            "spread_parameter" => extract_spread_parameter(extractor, param),
            _ => None,
        })
        .collect()
}

fn extract_formal_parameter(
    extractor: &JavaExtractor,
    param: Node,
) -> Option<ParameterDeclaration> {
    let name_node = param.child_by_field_name("name")?;
    let dimensions = param
        .child_by_field_name("dimensions")
        .map(|d| helpers::count_dimensions(&d))
        .unwrap_or(0);
    let type_mirror = param
        .child_by_field_name("type")
        .map(|type_node| types::resolve_type(extractor, &type_node))
        .or_else(|| types::resolve_type_child(extractor, &param))?
        .array_of(dimensions);

    Some(ParameterDeclaration {
        name: extractor.get_node_text(&name_node),
        type_mirror,
        span: helpers::span_of(extractor, &name_node),
        modifiers: Some(explicit_keywords(extractor, &param)),
    })
}

/// `String... names` is an array parameter.
fn extract_spread_parameter(
    extractor: &JavaExtractor,
    param: Node,
) -> Option<ParameterDeclaration> {
    let element = types::resolve_type_child(extractor, &param)?;
    let declarator = helpers::find_child(&param, "variable_declarator")?;
    let name_node = declarator.child_by_field_name("name")?;
    let dimensions = declarator
        .child_by_field_name("dimensions")
        .map(|d| helpers::count_dimensions(&d))
        .unwrap_or(0);

    Some(ParameterDeclaration {
        name: extractor.get_node_text(&name_node),
        type_mirror: element.array_of(1 + dimensions),
        span: helpers::span_of(extractor, &name_node),
        modifiers: Some(explicit_keywords(extractor, &param)),
    })
}

fn explicit_keywords(extractor: &JavaExtractor, param: &Node) -> BTreeSet<Modifier> {
    helpers::extract_modifiers(extractor, param).keywords
}
