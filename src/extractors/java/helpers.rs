/// Helper functions for Java extraction
/// Handles spans, explicit modifiers and Java's implicit modifier rules
use std::collections::BTreeSet;

use tree_sitter::Node;

use crate::declarations::{Modifier, Span, TypeKind};
use crate::extractors::java::JavaExtractor;

/// Where a type declaration appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum DeclarationSite {
    TopLevel,
    /// Member of a class or interface body.
    Member(TypeKind),
    /// Declared inside a method, constructor or initializer body.
    Local,
}

/// Modifiers written in the source, before implicit rules are applied.
#[derive(Debug, Default)]
pub(super) struct ExplicitModifiers {
    pub keywords: BTreeSet<Modifier>,
    /// Annotation names as written (`Override`, `java.lang.Deprecated`).
    pub annotations: Vec<String>,
}

impl ExplicitModifiers {
    pub fn has(&self, modifier: Modifier) -> bool {
        self.keywords.contains(&modifier)
    }

    pub fn has_annotation(&self, simple_name: &str, qualified: &str) -> bool {
        self.annotations
            .iter()
            .any(|name| name == simple_name || name == qualified)
    }
}

/// Span of a node: 1-based lines and character columns, exclusive end column.
pub(super) fn span_of(extractor: &JavaExtractor, node: &Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        begin_line: start.row as u32 + 1,
        begin_column: extractor.char_column(node.start_byte(), start.column),
        end_line: end.row as u32 + 1,
        end_column: extractor.char_column(node.end_byte(), end.column),
    }
}

/// First direct child of the given kind.
pub(super) fn find_child<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    node.children(&mut node.walk()).find(|c| c.kind() == kind)
}

/// Extract the modifier keywords and annotations of a declaration node.
pub(super) fn extract_modifiers(extractor: &JavaExtractor, node: &Node) -> ExplicitModifiers {
    let mut explicit = ExplicitModifiers::default();
    let Some(modifiers_node) = find_child(node, "modifiers") else {
        return explicit;
    };

    for child in modifiers_node.children(&mut modifiers_node.walk()) {
        match child.kind() {
            "marker_annotation" | "annotation" => {
                if let Some(name) = child.child_by_field_name("name") {
                    explicit.annotations.push(extractor.get_node_text(&name));
                }
            }
            _ => {
                let text = extractor.get_node_text(&child);
                if let Some(modifier) = Modifier::from_keyword(&text) {
                    explicit.keywords.insert(modifier);
                }
            }
        }
    }
    explicit
}

/// Effective modifiers of a class or interface declaration.
pub(super) fn effective_type_modifiers(
    kind: TypeKind,
    site: DeclarationSite,
    explicit: &ExplicitModifiers,
) -> BTreeSet<Modifier> {
    let mut effective = explicit.keywords.clone();
    if kind == TypeKind::Interface {
        effective.insert(Modifier::Abstract);
        if site != DeclarationSite::TopLevel {
            effective.insert(Modifier::Static);
        }
    }
    if site == DeclarationSite::Member(TypeKind::Interface) {
        effective.insert(Modifier::Public);
        effective.insert(Modifier::Static);
    }
    effective
}

/// Effective modifiers of a field declared in a body of `enclosing` kind.
pub(super) fn effective_field_modifiers(
    enclosing: TypeKind,
    explicit: &ExplicitModifiers,
) -> BTreeSet<Modifier> {
    let mut effective = explicit.keywords.clone();
    if enclosing == TypeKind::Interface {
        effective.extend([Modifier::Public, Modifier::Static, Modifier::Final]);
    }
    effective
}

/// Effective modifiers of a method declared in a body of `enclosing` kind.
pub(super) fn effective_method_modifiers(
    enclosing: TypeKind,
    explicit: &ExplicitModifiers,
    has_body: bool,
) -> BTreeSet<Modifier> {
    let mut effective = explicit.keywords.clone();
    if enclosing == TypeKind::Interface && !explicit.has(Modifier::Private) {
        effective.insert(Modifier::Public);
        if !has_body && !explicit.has(Modifier::Static) && !explicit.has(Modifier::Default) {
            effective.insert(Modifier::Abstract);
        }
    }
    effective
}

/// Number of `[]` pairs in a `dimensions` node.
pub(super) fn count_dimensions(node: &Node) -> usize {
    node.children(&mut node.walk())
        .filter(|c| c.kind() == "[")
        .count()
}

/// Node kinds that denote a type in a declaration.
pub(super) fn is_type_node(kind: &str) -> bool {
    matches!(
        kind,
        "type_identifier"
            | "scoped_type_identifier"
            | "generic_type"
            | "array_type"
            | "annotated_type"
            | "integral_type"
            | "floating_point_type"
            | "boolean_type"
            | "void_type"
    )
}
