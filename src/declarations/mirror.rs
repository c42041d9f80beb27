/// Resolved type references ("type mirrors")
/// Produced by a front end's type resolution, consumed by the printer and the
/// type-variable detector.

/// Name of a declared class or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassName {
    /// Fully qualified name, e.g. `java.util.Map.Entry`.
    Qualified(String),
    /// Member of the package currently being compiled, given by its path
    /// inside the package, e.g. `Doctor.Patient`. The printer renders these
    /// behind a placeholder because the package is only known per unit.
    CurrentPackage(String),
}

impl ClassName {
    /// Last dotted segment (`Entry` for `java.util.Map.Entry`).
    pub fn simple_name(&self) -> &str {
        let name = match self {
            ClassName::Qualified(name) | ClassName::CurrentPackage(name) => name,
        };
        name.rsplit('.').next().unwrap_or(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends(Box<TypeMirror>),
    Super(Box<TypeMirror>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeMirror {
    /// `int`, `boolean`, ...
    Primitive(String),
    Void,
    /// Reference to a declared class or interface, possibly parameterized.
    Declared {
        name: ClassName,
        type_arguments: Vec<TypeMirror>,
        /// Type-use annotations, e.g. `@NonNull`.
        annotations: Vec<ClassName>,
    },
    /// A type parameter of an enclosing method or type.
    TypeVariable(String),
    Array(Box<TypeMirror>),
    Wildcard(Option<WildcardBound>),
}

impl TypeMirror {
    /// Plain declared type without arguments or annotations.
    pub fn declared(name: ClassName) -> Self {
        TypeMirror::Declared {
            name,
            type_arguments: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Parameterized declared type.
    pub fn generic(name: ClassName, type_arguments: Vec<TypeMirror>) -> Self {
        TypeMirror::Declared {
            name,
            type_arguments,
            annotations: Vec::new(),
        }
    }

    /// Wrap in `dimensions` levels of array.
    pub fn array_of(self, dimensions: usize) -> Self {
        (0..dimensions).fold(self, |inner, _| TypeMirror::Array(Box::new(inner)))
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, TypeMirror::TypeVariable(_))
    }

    /// Structural equality ignoring type-use annotations.
    pub fn same_type(&self, other: &TypeMirror) -> bool {
        match (self, other) {
            (
                TypeMirror::Declared {
                    name: a,
                    type_arguments: args_a,
                    ..
                },
                TypeMirror::Declared {
                    name: b,
                    type_arguments: args_b,
                    ..
                },
            ) => {
                a == b
                    && args_a.len() == args_b.len()
                    && args_a.iter().zip(args_b).all(|(x, y)| x.same_type(y))
            }
            (TypeMirror::Array(a), TypeMirror::Array(b)) => a.same_type(b),
            _ => self == other,
        }
    }
}
