/// Field and interface-constant extraction
use tracing::trace;
use tree_sitter::Node;

use crate::declarations::{FieldDeclaration, TypeKind, TypeMirror, VariableDeclarator};
use crate::extractors::java::JavaExtractor;

use super::{helpers, types};

/// Extract a `field_declaration` or `constant_declaration` declared in a body
/// of `enclosing` kind. One declaration may declare several variables.
pub(super) fn extract_field(
    extractor: &JavaExtractor,
    node: Node,
    enclosing: TypeKind,
) -> Option<FieldDeclaration> {
    let explicit = helpers::extract_modifiers(extractor, &node);
    let modifiers = helpers::effective_field_modifiers(enclosing, &explicit);

    let base_type = node
        .child_by_field_name("type")
        .map(|type_node| types::resolve_type(extractor, &type_node))
        .or_else(|| types::resolve_type_child(extractor, &node))?;

    let variables: Vec<VariableDeclarator> = node
        .children(&mut node.walk())
        .filter(|c| c.kind() == "variable_declarator")
        .filter_map(|declarator| extract_declarator(extractor, declarator, &base_type))
        .collect();

    if variables.is_empty() {
        trace!(
            "field declaration without declarators at line {}",
            node.start_position().row + 1
        );
        return None;
    }

    Some(FieldDeclaration {
        span: helpers::span_of(extractor, &node),
        modifiers: Some(modifiers),
        synthetic: false,
        variables,
    })
}

/// `int a[]` declares an array even though the statement's type is `int`.
fn extract_declarator(
    extractor: &JavaExtractor,
    declarator: Node,
    base_type: &TypeMirror,
) -> Option<VariableDeclarator> {
    let name_node = declarator.child_by_field_name("name")?;
    let dimensions = declarator
        .child_by_field_name("dimensions")
        .map(|d| helpers::count_dimensions(&d))
        .unwrap_or(0);

    Some(VariableDeclarator {
        name: extractor.get_node_text(&name_node),
        type_mirror: base_type.clone().array_of(dimensions),
        span: helpers::span_of(extractor, &name_node),
    })
}
