/// Canonical identity keys
///
/// Pure functions of already-resolved names. Formats:
/// - type: canonical name, falling back to the simple name
/// - field: `<type>/field/<name>`
/// - method: `<type>/method/<name>(<T1> <n1>, <T2> <n2>)`
/// - parameter: `<method>/parameter/<name>`

/// Key of a class or interface.
pub fn type_key(canonical_name: Option<&str>, simple_name: &str) -> String {
    match canonical_name {
        Some(name) => name.to_string(),
        None => simple_name.to_string(),
    }
}

pub fn field_key(owner_type_key: &str, field_name: &str) -> String {
    format!("{}/field/{}", owner_type_key, field_name)
}

/// Method key from `(type, name)` parameter pairs in declaration order.
///
/// Parameter names are part of the key, so overloads that differ only in a
/// parameter name get distinct keys.
pub fn method_key<'a, I>(owner_type_key: &str, method_name: &str, parameters: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let rendered: Vec<String> = parameters
        .into_iter()
        .map(|(type_name, name)| format!("{} {}", type_name, name))
        .collect();
    format!(
        "{}/method/{}({})",
        owner_type_key,
        method_name,
        rendered.join(", ")
    )
}

pub fn parameter_key(method_key: &str, parameter_name: &str) -> String {
    format!("{}/parameter/{}", method_key, parameter_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_key_falls_back_to_simple_name() {
        assert_eq!(type_key(Some("com.example.Doctor"), "Doctor"), "com.example.Doctor");
        assert_eq!(type_key(None, "LocalHelper"), "LocalHelper");
    }

    #[test]
    fn test_field_key() {
        assert_eq!(field_key("com.example.Doctor", "a"), "com.example.Doctor/field/a");
    }

    #[test]
    fn test_method_key_renders_type_and_name_pairs() {
        let key = method_key(
            "com.example.Greeter",
            "greet",
            [("java.lang.String", "a"), ("int", "d")],
        );
        assert_eq!(
            key,
            "com.example.Greeter/method/greet(java.lang.String a, int d)"
        );
        assert_eq!(method_key("A", "run", []), "A/method/run()");
    }

    #[test]
    fn test_parameter_names_distinguish_overloads() {
        let first = method_key("A", "m", [("int", "x")]);
        let second = method_key("A", "m", [("int", "y")]);
        assert_ne!(first, second);
    }

    #[test]
    fn test_parameter_key() {
        let method = method_key("A", "m", [("int", "x")]);
        assert_eq!(parameter_key(&method, "x"), "A/method/m(int x)/parameter/x");
    }
}
