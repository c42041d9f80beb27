/// Inheritance clauses and override detection
use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;
use tree_sitter::Node;

use crate::declarations::{ClassName, Span, TypeDeclaration, TypeKind, TypeMirror};
use crate::extractors::java::JavaExtractor;

use super::helpers::find_child;
use super::types;

/// Types listed in the `extends` and `implements` clauses, in source order.
///
/// Interfaces list their super-interfaces under `extends`.
pub(super) fn extract_supertypes(
    extractor: &JavaExtractor,
    node: &Node,
    kind: TypeKind,
) -> (Vec<TypeMirror>, Vec<TypeMirror>) {
    match kind {
        TypeKind::Class => {
            let extends = find_child(node, "superclass")
                .and_then(|superclass| types::resolve_type_child(extractor, &superclass))
                .into_iter()
                .collect();
            let implements = find_child(node, "super_interfaces")
                .map(|clause| type_list(extractor, &clause))
                .unwrap_or_default();
            (extends, implements)
        }
        TypeKind::Interface => {
            let extends = find_child(node, "extends_interfaces")
                .map(|clause| type_list(extractor, &clause))
                .unwrap_or_default();
            (extends, Vec::new())
        }
    }
}

fn type_list(extractor: &JavaExtractor, clause: &Node) -> Vec<TypeMirror> {
    let Some(list) = find_child(clause, "type_list") else {
        return Vec::new();
    };
    list.children(&mut list.walk())
        .filter(|c| super::helpers::is_type_node(c.kind()))
        .map(|c| types::resolve_type(extractor, &c))
        .collect()
}

/// Method signature as compared for overriding: name and parameter types.
type Signature = (String, Vec<TypeMirror>);

/// Supertypes and method signatures of the types declared in one unit.
#[derive(Debug, Default)]
pub(crate) struct TypeHierarchy {
    /// Declaration start position to the name references to it resolve to.
    by_position: HashMap<(u32, u32), ClassName>,
    supertypes: HashMap<ClassName, Vec<ClassName>>,
    signatures: HashMap<ClassName, Vec<Signature>>,
}

fn position_key(span: &Span) -> (u32, u32) {
    (span.begin_line, span.begin_column)
}

impl TypeHierarchy {
    /// Remember a finished declaration under the name that refers to it.
    pub fn record(&mut self, decl: &TypeDeclaration, name: ClassName) {
        let supertypes = decl
            .extends
            .iter()
            .chain(&decl.implements)
            .filter_map(|mirror| match mirror {
                TypeMirror::Declared { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect();
        let signatures = decl
            .methods
            .iter()
            .map(|method| {
                (
                    method.name.clone(),
                    method
                        .parameters
                        .iter()
                        .map(|p| p.type_mirror.clone())
                        .collect(),
                )
            })
            .collect();

        self.by_position.insert(position_key(&decl.span), name.clone());
        self.supertypes.insert(name.clone(), supertypes);
        self.signatures.insert(name, signatures);
    }

    /// Mark methods that override a method of a supertype declared in this
    /// unit. Methods already marked (by `@Override`) are left alone.
    pub fn mark_overrides(&self, declarations: &mut [TypeDeclaration]) {
        for decl in declarations.iter_mut() {
            if let Some(name) = self.by_position.get(&position_key(&decl.span)) {
                for method in decl.methods.iter_mut().filter(|m| !m.overrides) {
                    let parameters: Vec<&TypeMirror> =
                        method.parameters.iter().map(|p| &p.type_mirror).collect();
                    if self.overridden_in_supertypes(name, &method.name, &parameters) {
                        trace!("{} overrides a method of a supertype of {:?}", method.name, name);
                        method.overrides = true;
                    }
                }
            }
            self.mark_overrides(&mut decl.nested);
        }
    }

    fn overridden_in_supertypes(
        &self,
        start: &ClassName,
        method_name: &str,
        parameters: &[&TypeMirror],
    ) -> bool {
        let mut seen: HashSet<&ClassName> = HashSet::from([start]);
        let mut queue: VecDeque<&ClassName> = self
            .supertypes
            .get(start)
            .map(|direct| direct.iter().collect())
            .unwrap_or_default();

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            let declares = self.signatures.get(current).is_some_and(|signatures| {
                signatures.iter().any(|(name, params)| {
                    name == method_name
                        && params.len() == parameters.len()
                        && params.iter().zip(parameters).all(|(a, b)| a.same_type(b))
                })
            });
            if declares {
                return true;
            }
            if let Some(next) = self.supertypes.get(current) {
                queue.extend(next);
            }
        }
        false
    }
}
