/// Java front end: turns a `.java` file into a [`CompilationUnit`]
///
/// This module is organized into focused sub-modules:
/// - helpers: node text, spans, explicit and effective modifiers
/// - imports_packages: package and import declarations
/// - package_index: top-level types of every package in the run
/// - types: scoped type-name resolution into type mirrors
/// - classes: class and interface declarations, member and local nesting
/// - fields: field and interface-constant declarations
/// - methods: method declarations and their parameters
/// - relationships: extends/implements clauses and override detection
mod classes;
mod fields;
mod helpers;
mod imports_packages;
mod methods;
mod package_index;
mod relationships;
mod types;

pub use imports_packages::ImportTable;
pub use package_index::PackageIndex;

use std::path::Path;

use tracing::{debug, warn};
use tree_sitter::Node;

use crate::declarations::{CompilationUnit, TypeDeclaration, UnitContext};
use crate::error::AstGenError;
use crate::language;
use crate::utils::paths;

use relationships::TypeHierarchy;
use types::Scope;

/// Extracts the declarations of one Java compilation unit.
///
/// Holds only per-unit state; a fresh extractor is used for every file.
pub struct JavaExtractor<'a> {
    content: &'a str,
    package_name: String,
    imports: ImportTable,
    index: &'a PackageIndex,
    scopes: Vec<Scope>,
    hierarchy: TypeHierarchy,
}

impl<'a> JavaExtractor<'a> {
    pub fn new(content: &'a str, index: &'a PackageIndex) -> Self {
        Self {
            content,
            package_name: String::new(),
            imports: ImportTable::default(),
            index,
            scopes: Vec::new(),
            hierarchy: TypeHierarchy::default(),
        }
    }

    /// Parse `content` (read from `path`) and extract its declarations.
    ///
    /// The unit's `sourceFilePath` is `path` relative to `source_root`.
    /// Names that no import or declaration of the unit binds are looked up in
    /// `index`.
    pub fn extract_unit(
        path: &Path,
        content: &str,
        source_root: &Path,
        index: &PackageIndex,
    ) -> Result<CompilationUnit, AstGenError> {
        let mut parser = language::java_parser().map_err(|e| AstGenError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| AstGenError::Parse {
                path: path.to_path_buf(),
                message: "parser returned no tree".to_string(),
            })?;

        let root = tree.root_node();
        let has_syntax_errors = root.has_error();
        if has_syntax_errors {
            warn!(
                "Syntax errors in {}; extracting from the recovered tree",
                path.display()
            );
        }

        let mut extractor = JavaExtractor::new(content, index);
        let types = extractor.extract_declarations(root);
        let context = UnitContext::new(
            extractor.package_name.clone(),
            relative_source_path(path, source_root),
        );

        debug!(
            "Extracted {} top-level declarations from {}",
            types.len(),
            context.source_file_path
        );

        Ok(CompilationUnit {
            context,
            types,
            has_syntax_errors,
        })
    }

    /// Top-level class and interface declarations under `root` (a `program`
    /// node), with override flags resolved across the unit.
    pub fn extract_declarations(&mut self, root: Node) -> Vec<TypeDeclaration> {
        for child in root.children(&mut root.walk()) {
            match child.kind() {
                "package_declaration" => {
                    if let Some(package) = imports_packages::extract_package(self, child) {
                        self.package_name = package;
                    }
                }
                "import_declaration" => {
                    let mut imports = std::mem::take(&mut self.imports);
                    imports_packages::extract_import(self, child, &mut imports);
                    self.imports = imports;
                }
                _ => {}
            }
        }

        self.push_scope(types::unit_scope(self, root));
        let mut declarations = Vec::new();
        for child in root.children(&mut root.walk()) {
            if let Some(decl) = classes::extract_top_level(self, child) {
                declarations.push(decl);
            }
        }
        self.pop_scope();

        self.hierarchy.mark_overrides(&mut declarations);
        declarations
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn imports(&self) -> &ImportTable {
        &self.imports
    }

    pub fn package_index(&self) -> &PackageIndex {
        self.index
    }

    // ========================================================================
    // Accessors for sub-modules
    // ========================================================================

    /// Source text of a node.
    pub(crate) fn get_node_text(&self, node: &Node) -> String {
        self.content
            .get(node.byte_range())
            .unwrap_or_default()
            .to_string()
    }

    /// 1-based character column of the position at `byte`, which lies
    /// `byte_column` bytes into its line (tree-sitter counts bytes).
    pub(crate) fn char_column(&self, byte: usize, byte_column: usize) -> u32 {
        let line_start = byte.saturating_sub(byte_column);
        let chars = self
            .content
            .get(line_start..byte)
            .map_or(byte_column, |prefix| prefix.chars().count());
        chars as u32 + 1
    }

    pub(crate) fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    pub(crate) fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub(crate) fn hierarchy_mut(&mut self) -> &mut TypeHierarchy {
        &mut self.hierarchy
    }
}

/// `path` relative to `source_root` with `/` separators, or the path itself
/// when it lies outside the root.
fn relative_source_path(path: &Path, source_root: &Path) -> String {
    paths::to_relative_unix_style(path, source_root).unwrap_or_else(|e| {
        warn!(
            "Failed to make '{}' relative to the source root: {} - using it as given",
            path.display(),
            e
        );
        path.to_string_lossy().replace('\\', "/")
    })
}

#[cfg(test)]
mod tests;
