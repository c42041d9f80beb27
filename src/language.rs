//! Language Support - tree-sitter grammar configuration
//!
//! Only Java sources are read. All parser setup goes through here.

use anyhow::Result;
use std::path::Path;
use tree_sitter::Parser;

/// File extension of the sources the generator reads.
pub const JAVA_EXTENSION: &str = "java";

/// Tree-sitter grammar for Java.
pub fn java_language() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
}

/// Parser configured for Java.
pub fn java_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&java_language())
        .map_err(|e| anyhow::anyhow!("Failed to set Java parser language: {}", e))?;
    Ok(parser)
}

/// True for `.java` files.
pub fn is_java_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == JAVA_EXTENSION)
}
