/// Import and package declaration extraction
use std::collections::HashMap;

use tracing::trace;
use tree_sitter::Node;

use crate::extractors::java::JavaExtractor;

/// Imports of one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct ImportTable {
    /// Simple name to fully qualified name, from `import a.b.C;`.
    single_type: HashMap<String, String>,
    /// Package (or type) prefixes of `import a.b.*;`.
    on_demand: Vec<String>,
    /// Targets of `import static ...;`, never used for type names.
    static_imports: Vec<String>,
}

impl ImportTable {
    /// Fully qualified name a single-type import binds `simple_name` to.
    pub fn resolve(&self, simple_name: &str) -> Option<&str> {
        self.single_type.get(simple_name).map(String::as_str)
    }

    pub fn on_demand(&self) -> &[String] {
        &self.on_demand
    }

    pub fn static_imports(&self) -> &[String] {
        &self.static_imports
    }

    pub fn add_single_type(&mut self, qualified: &str) {
        let simple = qualified.rsplit('.').next().unwrap_or(qualified);
        self.single_type
            .insert(simple.to_string(), qualified.to_string());
    }
}

/// Name of the unit's package.
pub(super) fn extract_package(extractor: &JavaExtractor, node: Node) -> Option<String> {
    let name_node = node
        .children(&mut node.walk())
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))?;
    Some(extractor.get_node_text(&name_node))
}

/// Record one import declaration in `imports`.
pub(super) fn extract_import(extractor: &JavaExtractor, node: Node, imports: &mut ImportTable) {
    let Some(name_node) = node
        .children(&mut node.walk())
        .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
    else {
        return;
    };
    let path = extractor.get_node_text(&name_node);

    let is_static = node
        .children(&mut node.walk())
        .any(|c| c.kind() == "static");
    let has_asterisk = node
        .children(&mut node.walk())
        .any(|c| c.kind() == "asterisk");

    trace!(
        "import {}{}{}",
        if is_static { "static " } else { "" },
        path,
        if has_asterisk { ".*" } else { "" }
    );

    if is_static {
        imports.static_imports.push(path);
    } else if has_asterisk {
        imports.on_demand.push(path);
    } else {
        imports.add_single_type(&path);
    }
}
