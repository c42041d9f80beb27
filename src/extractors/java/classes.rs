/// Class and interface extraction
///
/// Enum, record and annotation type declarations, and anonymous class
/// bodies, bound the search: nothing inside them is extracted.
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::declarations::{TypeDeclaration, TypeKind};
use crate::extractors::java::JavaExtractor;

use super::helpers::{self, DeclarationSite};
use super::types::{self, TypePath};
use super::{fields, methods, relationships};

fn type_kind(node: &Node) -> Option<TypeKind> {
    match node.kind() {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        _ => None,
    }
}

fn is_boundary(node: &Node) -> bool {
    matches!(
        node.kind(),
        "enum_declaration" | "record_declaration" | "annotation_type_declaration" | "class_body"
    )
}

/// Extract a top-level declaration of the unit, if `node` is one.
pub(super) fn extract_top_level(extractor: &mut JavaExtractor, node: Node) -> Option<TypeDeclaration> {
    type_kind(&node)?;
    let name = extractor.get_node_text(&node.child_by_field_name("name")?);
    extract_type_declaration(
        extractor,
        node,
        DeclarationSite::TopLevel,
        TypePath::top_level(&name),
    )
}

/// Extract a class or interface declaration and everything nested in it.
pub(super) fn extract_type_declaration(
    extractor: &mut JavaExtractor,
    node: Node,
    site: DeclarationSite,
    path: TypePath,
) -> Option<TypeDeclaration> {
    let kind = type_kind(&node)?;
    let name_node = node.child_by_field_name("name")?;
    let simple_name = extractor.get_node_text(&name_node);

    let explicit = helpers::extract_modifiers(extractor, &node);
    let modifiers = helpers::effective_type_modifiers(kind, site, &explicit);

    let scope = types::type_scope(extractor, &node, &path, &simple_name);
    extractor.push_scope(scope);

    let (extends, implements) = relationships::extract_supertypes(extractor, &node, kind);

    let mut decl = TypeDeclaration {
        canonical_name: path.canonical_name(extractor.package_name()),
        simple_name,
        kind,
        anonymous: false,
        span: helpers::span_of(extractor, &node),
        modifiers: Some(modifiers),
        fields: Vec::new(),
        methods: Vec::new(),
        extends,
        implements,
        nested: Vec::new(),
    };

    if let Some(body) = node.child_by_field_name("body") {
        extract_body(extractor, body, &path, &mut decl);
    }

    extractor.pop_scope();

    trace!(
        "{} {} ({} fields, {} methods, {} nested)",
        decl.kind,
        decl.simple_name,
        decl.fields.len(),
        decl.methods.len(),
        decl.nested.len()
    );

    extractor
        .hierarchy_mut()
        .record(&decl, path.class_name());
    Some(decl)
}

/// Walk a class or interface body in source order.
fn extract_body(
    extractor: &mut JavaExtractor,
    body: Node,
    path: &TypePath,
    decl: &mut TypeDeclaration,
) {
    let kind = decl.kind;
    for member in body.children(&mut body.walk()) {
        match member.kind() {
            "field_declaration" | "constant_declaration" => {
                if let Some(field) = fields::extract_field(extractor, member, kind) {
                    decl.fields.push(field);
                }
                collect_local_types(extractor, member, &mut decl.nested);
            }
            "method_declaration" => {
                let scope = types::method_scope(extractor, &member);
                extractor.push_scope(scope);
                if let Some(method) = methods::extract_method(extractor, member, kind) {
                    decl.methods.push(method);
                }
                collect_local_types(extractor, member, &mut decl.nested);
                extractor.pop_scope();
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                let scope = types::method_scope(extractor, &member);
                extractor.push_scope(scope);
                collect_local_types(extractor, member, &mut decl.nested);
                extractor.pop_scope();
            }
            "class_declaration" | "interface_declaration" => {
                let Some(name_node) = member.child_by_field_name("name") else {
                    continue;
                };
                let name = extractor.get_node_text(&name_node);
                if let Some(nested) = extract_type_declaration(
                    extractor,
                    member,
                    DeclarationSite::Member(kind),
                    path.member(&name),
                ) {
                    decl.nested.push(nested);
                }
            }
            _ if is_boundary(&member) => {
                debug!(
                    "skipping {} in {} at line {}",
                    member.kind(),
                    decl.simple_name,
                    member.start_position().row + 1
                );
            }
            // Initializer blocks and anything else that may hold local types.
            _ => collect_local_types(extractor, member, &mut decl.nested),
        }
    }
}

/// Find class and interface declarations inside executable code (method
/// bodies, initializers, lambdas). Each found declaration is extracted whole;
/// its own body is not searched again here.
fn collect_local_types(extractor: &mut JavaExtractor, node: Node, out: &mut Vec<TypeDeclaration>) {
    for child in node.children(&mut node.walk()) {
        if type_kind(&child).is_some() {
            let Some(name_node) = child.child_by_field_name("name") else {
                continue;
            };
            let name = extractor.get_node_text(&name_node);
            if let Some(local) = extract_type_declaration(
                extractor,
                child,
                DeclarationSite::Local,
                TypePath::local(&name),
            ) {
                out.push(local);
            }
        } else if !is_boundary(&child) {
            collect_local_types(extractor, child, out);
        }
    }
}
