//! Canonicalization engine
//!
//! Turns a [`CompilationUnit`](crate::declarations::CompilationUnit) into
//! stable [`TypeRecord`](crate::records::TypeRecord)s:
//! - `position`: declaration spans to record positions
//! - `qualified`: type printer and current-package placeholder substitution
//! - `type_vars`: shallow type-variable detection
//! - `keys`: canonical identity keys
//! - `fields`, `methods`, `classes`: entity extractors
//! - `traversal`: recursive descent over nested declarations
//!
//! Every function here takes the unit's [`UnitContext`] explicitly; nothing is
//! cached between calls.

pub mod classes;
pub mod fields;
pub mod keys;
pub mod methods;
pub mod position;
pub mod qualified;
pub mod traversal;
pub mod type_vars;

pub use qualified::{qualified_name, TypePrinter};
pub use traversal::{build_type_record, visit_unit};
pub use type_vars::has_type_variable;

use crate::declarations::ModifierSet;

/// Modifier names in canonical order; an unknown set yields no modifiers.
pub(crate) fn modifier_names(modifiers: &ModifierSet) -> Vec<String> {
    modifiers
        .as_ref()
        .map(|set| set.iter().map(|m| m.name().to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::{
        ClassName, CompilationUnit, FieldDeclaration, MethodDeclaration, Modifier,
        ParameterDeclaration, Span, TypeDeclaration, TypeKind, TypeMirror, UnitContext,
        VariableDeclarator,
    };
    use std::collections::BTreeSet;

    fn span(line: u32) -> Span {
        Span {
            begin_line: line,
            begin_column: 5,
            end_line: line,
            end_column: 20,
        }
    }

    fn modifiers(list: &[Modifier]) -> ModifierSet {
        Some(list.iter().copied().collect::<BTreeSet<_>>())
    }

    fn string() -> TypeMirror {
        TypeMirror::declared(ClassName::Qualified("java.lang.String".into()))
    }

    fn class(name: &str, canonical: Option<&str>) -> TypeDeclaration {
        TypeDeclaration {
            simple_name: name.to_string(),
            canonical_name: canonical.map(str::to_string),
            kind: TypeKind::Class,
            anonymous: false,
            span: span(1),
            modifiers: modifiers(&[Modifier::Public]),
            fields: Vec::new(),
            methods: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            nested: Vec::new(),
        }
    }

    fn parameter(name: &str, type_mirror: TypeMirror) -> ParameterDeclaration {
        ParameterDeclaration {
            name: name.to_string(),
            type_mirror,
            span: span(4),
            modifiers: modifiers(&[]),
        }
    }

    fn greet(parameters: Vec<ParameterDeclaration>) -> MethodDeclaration {
        MethodDeclaration {
            name: "greet".to_string(),
            return_type: TypeMirror::Void,
            span: span(4),
            modifiers: modifiers(&[Modifier::Public]),
            overrides: false,
            parameters,
        }
    }

    fn ctx() -> UnitContext {
        UnitContext::new("com.example", "com/example/Doctor.java")
    }

    #[test]
    fn test_modifier_names_for_missing_set_is_empty() {
        assert!(modifier_names(&None).is_empty());
        assert_eq!(
            modifier_names(&modifiers(&[Modifier::Final, Modifier::Private])),
            vec!["PRIVATE", "FINAL"]
        );
    }

    #[test]
    fn test_multi_variable_field_statement_yields_one_record_each() {
        let mut decl = class("Owner", Some("com.example.Owner"));
        let raw_list = TypeMirror::declared(ClassName::Qualified("java.util.List".into()));
        decl.fields.push(FieldDeclaration {
            span: span(2),
            modifiers: modifiers(&[Modifier::Private]),
            synthetic: false,
            variables: vec![
                VariableDeclarator {
                    name: "a".into(),
                    type_mirror: raw_list.clone(),
                    span: span(2),
                },
                VariableDeclarator {
                    name: "b".into(),
                    type_mirror: raw_list,
                    span: span(2),
                },
            ],
        });

        let record = build_type_record(&decl, &ctx(), None);
        let keys: Vec<&String> = record.fields.keys().collect();
        assert_eq!(
            keys,
            vec!["com.example.Owner/field/a", "com.example.Owner/field/b"]
        );
        for field in record.fields.values() {
            assert_eq!(field.type_name, "java.util.List");
            assert_eq!(field.modifiers, vec!["PRIVATE"]);
            assert_eq!(field.owning_type_key, "com.example.Owner");
        }
    }

    #[test]
    fn test_synthetic_fields_are_skipped() {
        let mut decl = class("Owner", Some("com.example.Owner"));
        decl.fields.push(FieldDeclaration {
            span: span(2),
            modifiers: None,
            synthetic: true,
            variables: vec![VariableDeclarator {
                name: "this$0".into(),
                type_mirror: string(),
                span: span(2),
            }],
        });
        let record = build_type_record(&decl, &ctx(), None);
        assert!(record.fields.is_empty());
    }

    #[test]
    fn test_overloads_get_distinct_method_keys() {
        let mut decl = class("Greeter", Some("com.example.Greeter"));
        decl.methods.push(greet(vec![
            parameter("a", string()),
            parameter("b", string()),
            parameter("c", string()),
        ]));
        decl.methods.push(greet(vec![
            parameter("a", string()),
            parameter("b", string()),
            parameter("c", string()),
            parameter("d", TypeMirror::Primitive("int".into())),
        ]));

        let record = build_type_record(&decl, &ctx(), None);
        assert_eq!(record.methods.len(), 2);

        let four = "com.example.Greeter/method/greet(java.lang.String a, java.lang.String b, java.lang.String c, int d)";
        let method = &record.methods[four];
        assert_eq!(method.parameters.len(), 4);
        assert_eq!(method.parameters[3].key, format!("{}/parameter/d", four));
        assert!(method.parameters.iter().all(|p| p.owning_method_key == four));
        assert_eq!(method.return_type, "void");
    }

    #[test]
    fn test_nested_declarations_are_keyed_and_routed() {
        let mut doctor = class("Doctor", Some("com.example.Doctor"));
        let patient = class("Patient", Some("com.example.Doctor.Patient"));
        let mut schedule = class("Schedule", Some("com.example.Doctor.Schedule"));
        schedule.kind = TypeKind::Interface;
        doctor.nested = vec![patient, schedule];

        let unit = CompilationUnit {
            context: ctx(),
            types: vec![doctor],
            has_syntax_errors: false,
        };

        let visited = visit_unit(&unit);
        let keys: Vec<&str> = visited.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "com.example.Doctor",
                "com.example.Doctor.Patient",
                "com.example.Doctor.Schedule"
            ]
        );

        let outer = &visited[0];
        assert!(outer.inner_classes.contains_key("com.example.Doctor.Patient"));
        assert!(outer
            .inner_interfaces
            .contains_key("com.example.Doctor.Schedule"));
        assert_eq!(
            outer.inner_classes["com.example.Doctor.Patient"],
            visited[1],
            "nested and standalone records must be identical"
        );
        assert_eq!(
            visited[1].defined_in_type_key.as_deref(),
            Some("com.example.Doctor")
        );
        assert_eq!(outer.defined_in_type_key, None);
    }

    #[test]
    fn test_local_type_without_canonical_name_uses_simple_name() {
        let mut outer = class("Outer", Some("p.Outer"));
        outer.nested.push(class("Helper", None));
        let record = build_type_record(&outer, &UnitContext::new("p", "p/Outer.java"), None);
        let helper = &record.inner_classes["Helper"];
        assert_eq!(helper.key, "Helper");
        assert_eq!(helper.source_file_path, "p/Outer.java");
    }
}
