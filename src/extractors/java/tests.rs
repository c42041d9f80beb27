use super::*;
use crate::declarations::{ClassName, Modifier, TypeKind, TypeMirror, WildcardBound};
use std::path::Path;

fn extract(source: &str) -> CompilationUnit {
    JavaExtractor::extract_unit(
        Path::new("/src/com/example/Doctor.java"),
        source,
        Path::new("/src"),
        &PackageIndex::default(),
    )
    .unwrap()
}

fn qualified(name: &str) -> TypeMirror {
    TypeMirror::declared(ClassName::Qualified(name.to_string()))
}

fn current(name: &str) -> TypeMirror {
    TypeMirror::declared(ClassName::CurrentPackage(name.to_string()))
}

fn modifier_names(decl_modifiers: &crate::declarations::ModifierSet) -> Vec<&'static str> {
    decl_modifiers
        .as_ref()
        .map(|set| set.iter().map(Modifier::name).collect())
        .unwrap_or_default()
}

#[test]
fn test_unit_context_and_relative_path() {
    let unit = extract("package com.example;\n\npublic class Doctor {}\n");
    assert_eq!(unit.context.package_name, "com.example");
    assert_eq!(unit.context.source_file_path, "com/example/Doctor.java");
    assert!(!unit.has_syntax_errors);
    assert_eq!(unit.types.len(), 1);
    assert_eq!(
        unit.types[0].canonical_name.as_deref(),
        Some("com.example.Doctor")
    );
}

#[test]
fn test_default_package_canonical_name() {
    let unit = extract("class Main { int x; }");
    assert_eq!(unit.context.package_name, "");
    assert_eq!(unit.types[0].canonical_name.as_deref(), Some("Main"));
}

#[test]
fn test_fields_with_several_declarators() {
    let source = "\
package com.example;

import java.util.List;

public class Doctor {
    private String name;
    private List a, b;
    protected static final int[] CODES = {1}, matrix[] = {};
}
";
    let unit = extract(source);
    let doctor = &unit.types[0];
    assert_eq!(doctor.fields.len(), 3);

    let name = &doctor.fields[0].variables[0];
    assert_eq!(name.name, "name");
    assert_eq!(name.type_mirror, qualified("java.lang.String"));
    assert_eq!(
        (name.span.begin_line, name.span.begin_column, name.span.end_column),
        (6, 20, 24)
    );

    let pair = &doctor.fields[1];
    let names: Vec<&str> = pair.variables.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(pair
        .variables
        .iter()
        .all(|v| v.type_mirror == qualified("java.util.List")));
    assert_eq!(modifier_names(&pair.modifiers), vec!["PRIVATE"]);

    let codes = &doctor.fields[2];
    assert_eq!(
        modifier_names(&codes.modifiers),
        vec!["PROTECTED", "STATIC", "FINAL"]
    );
    let int = TypeMirror::Primitive("int".into());
    assert_eq!(codes.variables[0].type_mirror, int.clone().array_of(1));
    assert_eq!(codes.variables[1].type_mirror, int.array_of(2));
}

#[test]
fn test_nested_local_anonymous_and_enum_declarations() {
    let source = "\
package com.example;

public class Doctor {
    class Patient {
        String name;
    }

    interface Schedule {}

    enum Ward { NORTH, SOUTH }

    void treat() {
        class Helper {}
        Runnable r = new Runnable() {
            class Hidden {}
            public void run() {}
        };
    }
}
";
    let unit = extract(source);
    let doctor = &unit.types[0];
    let nested: Vec<(&str, Option<&str>, TypeKind)> = doctor
        .nested
        .iter()
        .map(|n| (n.simple_name.as_str(), n.canonical_name.as_deref(), n.kind))
        .collect();
    assert_eq!(
        nested,
        vec![
            ("Patient", Some("com.example.Doctor.Patient"), TypeKind::Class),
            ("Schedule", Some("com.example.Doctor.Schedule"), TypeKind::Interface),
            ("Helper", None, TypeKind::Class),
        ]
    );
    assert_eq!(unit.declaration_count(), 4);
    assert_eq!(doctor.methods.len(), 1);
    assert_eq!(doctor.methods[0].name, "treat");
}

#[test]
fn test_type_resolution_order() {
    let source = "\
package com.example;

import java.util.Map;
import java.util.*;
import static java.util.Collections.emptyList;

public class Doctor<T> {
    static class Patient {}

    Patient patient;
    Map.Entry<String, Patient> entry;
    java.util.Set<T> tags;
    Record record;
    Nurse nurse;

    <E extends Comparable<E>> E pick(E first, T second) { return first; }
}
";
    let unit = extract(source);
    let doctor = &unit.types[0];
    let field_type = |i: usize| doctor.fields[i].variables[0].type_mirror.clone();

    assert_eq!(field_type(0), current("Doctor.Patient"));
    assert_eq!(
        field_type(1),
        TypeMirror::generic(
            ClassName::Qualified("java.util.Map.Entry".into()),
            vec![qualified("java.lang.String"), current("Doctor.Patient")]
        )
    );
    assert_eq!(
        field_type(2),
        TypeMirror::generic(
            ClassName::Qualified("java.util.Set".into()),
            vec![TypeMirror::TypeVariable("T".into())]
        )
    );
    assert_eq!(field_type(3), qualified("java.lang.Record"));
    assert_eq!(field_type(4), current("Nurse"));

    let pick = &doctor.methods[0];
    assert_eq!(pick.return_type, TypeMirror::TypeVariable("E".into()));
    assert_eq!(
        pick.parameters[0].type_mirror,
        TypeMirror::TypeVariable("E".into())
    );
    assert_eq!(
        pick.parameters[1].type_mirror,
        TypeMirror::TypeVariable("T".into())
    );
}

#[test]
fn test_parameters_varargs_wildcards_and_arrays() {
    let source = "\
package com.example;

import java.util.List;

class Doctor {
    void admit(final String id, List<? extends Number> scores, List<? super Integer> sink,
               List<?> any, int grid[][], String... notes) {}
}
";
    let unit = extract(source);
    let admit = &unit.types[0].methods[0];
    let types: Vec<&TypeMirror> = admit.parameters.iter().map(|p| &p.type_mirror).collect();
    assert_eq!(types[0], &qualified("java.lang.String"));
    assert_eq!(
        types[1],
        &TypeMirror::generic(
            ClassName::Qualified("java.util.List".into()),
            vec![TypeMirror::Wildcard(Some(WildcardBound::Extends(Box::new(
                qualified("java.lang.Number")
            ))))]
        )
    );
    assert_eq!(
        types[2],
        &TypeMirror::generic(
            ClassName::Qualified("java.util.List".into()),
            vec![TypeMirror::Wildcard(Some(WildcardBound::Super(Box::new(
                qualified("java.lang.Integer")
            ))))]
        )
    );
    assert_eq!(
        types[3],
        &TypeMirror::generic(
            ClassName::Qualified("java.util.List".into()),
            vec![TypeMirror::Wildcard(None)]
        )
    );
    assert_eq!(types[4], &TypeMirror::Primitive("int".into()).array_of(2));
    assert_eq!(types[5], &qualified("java.lang.String").array_of(1));

    assert_eq!(modifier_names(&admit.parameters[0].modifiers), vec!["FINAL"]);
    assert_eq!(admit.parameters[5].name, "notes");
}

#[test]
fn test_interface_effective_modifiers_and_extends() {
    let source = "\
package com.example;

public interface Schedule extends Comparable<Schedule>, Runnable {
    int SLOTS = 8;
    void book(String patient);
    default void clear() {}
    static Schedule empty() { return null; }
    class Slot {}
}
";
    let unit = extract(source);
    let schedule = &unit.types[0];
    assert_eq!(schedule.kind, TypeKind::Interface);
    assert_eq!(modifier_names(&schedule.modifiers), vec!["PUBLIC", "ABSTRACT"]);
    assert_eq!(
        schedule.extends,
        vec![
            TypeMirror::generic(
                ClassName::Qualified("java.lang.Comparable".into()),
                vec![current("Schedule")]
            ),
            qualified("java.lang.Runnable"),
        ]
    );
    assert!(schedule.implements.is_empty());

    assert_eq!(
        modifier_names(&schedule.fields[0].modifiers),
        vec!["PUBLIC", "STATIC", "FINAL"]
    );
    let methods: Vec<(&str, Vec<&str>)> = schedule
        .methods
        .iter()
        .map(|m| (m.name.as_str(), modifier_names(&m.modifiers)))
        .collect();
    assert_eq!(
        methods,
        vec![
            ("book", vec!["PUBLIC", "ABSTRACT"]),
            ("clear", vec!["PUBLIC", "DEFAULT"]),
            ("empty", vec!["PUBLIC", "STATIC"]),
        ]
    );
    assert_eq!(
        modifier_names(&schedule.nested[0].modifiers),
        vec!["PUBLIC", "STATIC"]
    );
}

#[test]
fn test_override_detection() {
    let source = "\
package com.example;

class Base {
    void greet(String name) {}
    void wave() {}
}

class Child extends Base implements Runnable {
    void greet(String name) {}
    void greet(int times) {}
    @Override
    public void run() {}
}
";
    let unit = extract(source);
    let child = &unit.types[1];
    assert_eq!(child.extends, vec![current("Base")]);
    assert_eq!(child.implements, vec![qualified("java.lang.Runnable")]);

    let flags: Vec<bool> = child.methods.iter().map(|m| m.overrides).collect();
    assert_eq!(flags, vec![true, false, true]);
    assert!(unit.types[0].methods.iter().all(|m| !m.overrides));
}

#[test]
fn test_constructors_are_not_methods() {
    let source = "\
class Clinic {
    Clinic(int beds) {
        class Bed {}
    }
    int beds() { return 0; }
}
";
    let unit = extract(source);
    let clinic = &unit.types[0];
    assert_eq!(clinic.methods.len(), 1);
    assert_eq!(clinic.methods[0].name, "beds");
    assert_eq!(clinic.nested.len(), 1);
    assert_eq!(clinic.nested[0].canonical_name, None);
}

#[test]
fn test_syntax_errors_are_tolerated() {
    let unit = extract("package com.example;\nclass Broken { int x = ; String name; }\n");
    assert!(unit.has_syntax_errors);
    assert_eq!(unit.types.len(), 1);
    assert_eq!(unit.types[0].simple_name, "Broken");
}

#[test]
fn test_import_table_kinds() {
    let source = "\
package com.example;

import java.util.List;
import java.util.concurrent.*;
import static java.util.Collections.emptyList;
import static java.lang.Math.*;

class Ward { List beds; }
";
    let mut parser = language::java_parser().unwrap();
    let tree = parser.parse(source, None).unwrap();
    let index = PackageIndex::default();
    let mut extractor = JavaExtractor::new(source, &index);
    let declarations = extractor.extract_declarations(tree.root_node());

    assert_eq!(extractor.package_name(), "com.example");
    assert_eq!(extractor.imports().resolve("List"), Some("java.util.List"));
    assert_eq!(extractor.imports().resolve("emptyList"), None);
    assert_eq!(extractor.imports().on_demand(), ["java.util.concurrent"]);
    assert_eq!(
        extractor.imports().static_imports(),
        ["java.util.Collections.emptyList", "java.lang.Math"]
    );
    assert_eq!(
        declarations[0].fields[0].variables[0].type_mirror,
        qualified("java.util.List")
    );
}

#[test]
fn test_columns_count_characters_not_bytes() {
    let unit = extract("class Ward {\n    /* héllo */ int count;\n    void grüß() {}\n}\n");
    let ward = &unit.types[0];
    let count = &ward.fields[0].variables[0];
    assert_eq!(
        (count.span.begin_line, count.span.begin_column, count.span.end_column),
        (2, 21, 26)
    );
    let greet = &ward.methods[0];
    assert_eq!(greet.name, "grüß");
    assert_eq!(
        (greet.span.begin_line, greet.span.begin_column, greet.span.end_column),
        (3, 5, 19)
    );
}

#[test]
fn test_package_index_resolution_order() {
    let mut index = PackageIndex::default();
    index.insert("com.example", "Process");
    index.insert("com.example.staff", "Nurse");
    index.insert("com.example.staff", "List");
    let source = "\
package com.example;

import java.util.*;
import com.example.staff.*;

class Ward {
    List<Nurse> nurses;
    Process process;
    Thread worker;
}
";
    let unit = JavaExtractor::extract_unit(
        Path::new("/src/com/example/Ward.java"),
        source,
        Path::new("/src"),
        &index,
    )
    .unwrap();
    let field_type = |i: usize| unit.types[0].fields[i].variables[0].type_mirror.clone();

    // first on-demand import that declares the name wins
    assert_eq!(
        field_type(0),
        TypeMirror::generic(
            ClassName::Qualified("java.util.List".into()),
            vec![qualified("com.example.staff.Nurse")]
        )
    );
    assert_eq!(field_type(1), current("Process"));
    assert_eq!(field_type(2), qualified("java.lang.Thread"));
}
