/// Top-level type names of every package in a run
///
/// Filled before extraction so that a simple name can be resolved against
/// the current package and against on-demand imports of project packages.
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::extractors::java::{imports_packages, types, JavaExtractor};
use crate::language;

#[derive(Debug, Clone, Default)]
pub struct PackageIndex {
    members: HashMap<String, HashSet<String>>,
}

impl PackageIndex {
    pub fn insert(&mut self, package_name: &str, simple_name: impl Into<String>) {
        self.members
            .entry(package_name.to_string())
            .or_default()
            .insert(simple_name.into());
    }

    /// True when `package_name` declares a top-level type `simple_name`.
    pub fn contains(&self, package_name: &str, simple_name: &str) -> bool {
        self.members
            .get(package_name)
            .is_some_and(|names| names.contains(simple_name))
    }

    /// Number of indexed types.
    pub fn type_count(&self) -> usize {
        self.members.values().map(HashSet::len).sum()
    }

    pub fn merge(mut self, other: PackageIndex) -> PackageIndex {
        for (package_name, names) in other.members {
            self.members.entry(package_name).or_default().extend(names);
        }
        self
    }

    /// Index of one source file: its package and top-level type names.
    pub fn scan(content: &str) -> PackageIndex {
        let mut index = PackageIndex::default();
        let tree = match language::java_parser() {
            Ok(mut parser) => parser.parse(content, None),
            Err(e) => {
                debug!("Skipping package scan: {}", e);
                None
            }
        };
        let Some(tree) = tree else {
            return index;
        };

        let empty = PackageIndex::default();
        let extractor = JavaExtractor::new(content, &empty);
        let root = tree.root_node();

        let package_name = root
            .children(&mut root.walk())
            .find(|child| child.kind() == "package_declaration")
            .and_then(|child| imports_packages::extract_package(&extractor, child))
            .unwrap_or_default();

        for child in root.children(&mut root.walk()) {
            if let Some(name) = types::declared_type_name(&extractor, &child) {
                index.insert(&package_name, name);
            }
        }
        index
    }
}
