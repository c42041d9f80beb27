/// Qualified-name resolution
///
/// Types are rendered by a [`TypePrinter`]. Members of the package being
/// compiled are printed behind [`CURRENT_PACKAGE_PLACEHOLDER`], since their
/// package is only known per compilation unit; [`qualified_name`] substitutes
/// the placeholder with the unit's package so the name stays unambiguous
/// outside that unit.
use crate::declarations::{ClassName, TypeMirror, UnitContext, WildcardBound};

/// Marker the printer emits in front of current-package members.
pub const CURRENT_PACKAGE_PLACEHOLDER: char = '*';

/// Printer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePrinter {
    /// Print declared types with their full name instead of the simple name.
    pub qualify_names: bool,
    /// Print type-use annotations (`@NonNull String`).
    pub print_annotations: bool,
}

impl Default for TypePrinter {
    fn default() -> Self {
        Self {
            qualify_names: true,
            print_annotations: false,
        }
    }
}

impl TypePrinter {
    pub fn print(&self, mirror: &TypeMirror) -> String {
        let mut out = String::new();
        self.write_type(mirror, &mut out);
        out
    }

    fn write_type(&self, mirror: &TypeMirror, out: &mut String) {
        match mirror {
            TypeMirror::Primitive(name) => out.push_str(name),
            TypeMirror::Void => out.push_str("void"),
            TypeMirror::TypeVariable(name) => out.push_str(name),
            TypeMirror::Declared {
                name,
                type_arguments,
                annotations,
            } => {
                if self.print_annotations {
                    for annotation in annotations {
                        out.push('@');
                        self.write_class_name(annotation, out);
                        out.push(' ');
                    }
                }
                self.write_class_name(name, out);
                if !type_arguments.is_empty() {
                    out.push('<');
                    for (i, argument) in type_arguments.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(argument, out);
                    }
                    out.push('>');
                }
            }
            TypeMirror::Array(component) => {
                self.write_type(component, out);
                out.push_str("[]");
            }
            TypeMirror::Wildcard(bound) => {
                out.push('?');
                match bound {
                    Some(WildcardBound::Extends(bound)) => {
                        out.push_str(" extends ");
                        self.write_type(bound, out);
                    }
                    Some(WildcardBound::Super(bound)) => {
                        out.push_str(" super ");
                        self.write_type(bound, out);
                    }
                    None => {}
                }
            }
        }
    }

    fn write_class_name(&self, name: &ClassName, out: &mut String) {
        if !self.qualify_names {
            out.push_str(name.simple_name());
            return;
        }
        match name {
            ClassName::Qualified(qualified) => out.push_str(qualified),
            ClassName::CurrentPackage(path) => {
                out.push(CURRENT_PACKAGE_PLACEHOLDER);
                out.push_str(path);
            }
        }
    }
}

/// Best-effort fully-qualified name of a type reference taken from `ctx`'s unit.
pub fn qualified_name(mirror: &TypeMirror, ctx: &UnitContext) -> String {
    let printed = TypePrinter::default().print(mirror);
    substitute_placeholder(&printed, &ctx.package_name)
}

/// Replace every placeholder with `<package>.`, or with nothing in the
/// default package.
pub fn substitute_placeholder(printed: &str, package_name: &str) -> String {
    let prefix = if package_name.is_empty() {
        String::new()
    } else {
        format!("{}.", package_name)
    };
    printed.replace(CURRENT_PACKAGE_PLACEHOLDER, &prefix)
}
