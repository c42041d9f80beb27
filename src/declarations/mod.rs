//! Declaration-node interface consumed by the canonicalization engine.
//!
//! A language front end (see `extractors::java`) turns a parsed source file
//! into a [`CompilationUnit`]: an owned tree of type declarations with their
//! fields, methods and parameters, every type usage already resolved into a
//! [`TypeMirror`]. The engine in `canon` depends on nothing else, so it never
//! sees parser nodes, cursors or callback protocols.

pub mod mirror;

pub use mirror::{ClassName, TypeMirror, WildcardBound};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-compilation-unit context.
///
/// Carried explicitly into every extraction call so that nothing reads a
/// package or a file path left behind by a previously processed unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnitContext {
    /// Package of the unit; empty for the default package.
    pub package_name: String,
    /// Source path relative to the configured source root, `/`-separated.
    pub source_file_path: String,
}

impl UnitContext {
    pub fn new(package_name: impl Into<String>, source_file_path: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            source_file_path: source_file_path.into(),
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub context: UnitContext,
    /// Top-level class and interface declarations in source order.
    pub types: Vec<TypeDeclaration>,
    /// True when the parser had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

/// Source span of a declaration node. Lines and columns are 1-based; columns
/// count characters and the end column is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub begin_line: u32,
    pub begin_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// Class-or-interface tag, decided once by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective declaration modifiers.
///
/// Variant order is the canonical Java modifier order; a `BTreeSet<Modifier>`
/// therefore iterates in the order the records are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Sealed,
    NonSealed,
    Abstract,
    Static,
    Final,
    Synchronized,
    Native,
    Default,
    Strictfp,
    Transient,
    Volatile,
}

impl Modifier {
    /// Name as it appears in emitted records (`PUBLIC`, `NON_SEALED`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Public => "PUBLIC",
            Modifier::Protected => "PROTECTED",
            Modifier::Private => "PRIVATE",
            Modifier::Sealed => "SEALED",
            Modifier::NonSealed => "NON_SEALED",
            Modifier::Abstract => "ABSTRACT",
            Modifier::Static => "STATIC",
            Modifier::Final => "FINAL",
            Modifier::Synchronized => "SYNCHRONIZED",
            Modifier::Native => "NATIVE",
            Modifier::Default => "DEFAULT",
            Modifier::Strictfp => "STRICTFP",
            Modifier::Transient => "TRANSIENT",
            Modifier::Volatile => "VOLATILE",
        }
    }

    /// Parse a source keyword (`public`, `non-sealed`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "sealed" => Modifier::Sealed,
            "non-sealed" => Modifier::NonSealed,
            "abstract" => Modifier::Abstract,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "synchronized" => Modifier::Synchronized,
            "native" => Modifier::Native,
            "default" => Modifier::Default,
            "strictfp" => Modifier::Strictfp,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            _ => return None,
        };
        Some(modifier)
    }
}

/// Effective modifier set; `None` when the front end could not determine one.
pub type ModifierSet = Option<BTreeSet<Modifier>>;

/// A class or interface declaration and everything lexically inside it.
#[derive(Debug, Clone)]
pub struct TypeDeclaration {
    pub simple_name: String,
    /// Fully-qualified canonical name; `None` for local and anonymous types.
    pub canonical_name: Option<String>,
    pub kind: TypeKind,
    pub anonymous: bool,
    pub span: Span,
    pub modifiers: ModifierSet,
    pub fields: Vec<FieldDeclaration>,
    pub methods: Vec<MethodDeclaration>,
    /// Types listed in the `extends` clause, in source order.
    pub extends: Vec<TypeMirror>,
    /// Types listed in the `implements` clause, in source order.
    pub implements: Vec<TypeMirror>,
    /// Nested declarations (member and local), in source order.
    pub nested: Vec<TypeDeclaration>,
}

/// One field declaration statement; it may declare several variables.
#[derive(Debug, Clone)]
pub struct FieldDeclaration {
    pub span: Span,
    pub modifiers: ModifierSet,
    /// Compiler-inserted field; never extracted.
    pub synthetic: bool,
    pub variables: Vec<VariableDeclarator>,
}

/// A single declared identifier of a field statement.
#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub name: String,
    /// Resolved type, including any declarator-level array dimensions.
    pub type_mirror: TypeMirror,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodDeclaration {
    pub name: String,
    pub return_type: TypeMirror,
    pub span: Span,
    pub modifiers: ModifierSet,
    /// Statically known to override a supertype method.
    pub overrides: bool,
    pub parameters: Vec<ParameterDeclaration>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclaration {
    pub name: String,
    pub type_mirror: TypeMirror,
    /// Span of the parameter's declarator identifier.
    pub span: Span,
    pub modifiers: ModifierSet,
}

impl TypeDeclaration {
    /// Depth-first count of this declaration and all nested ones.
    pub fn declaration_count(&self) -> usize {
        1 + self
            .nested
            .iter()
            .map(TypeDeclaration::declaration_count)
            .sum::<usize>()
    }
}

impl CompilationUnit {
    /// Number of class/interface declarations the unit will emit.
    pub fn declaration_count(&self) -> usize {
        self.types.iter().map(TypeDeclaration::declaration_count).sum()
    }
}
