// Utilities Module
//
// Source discovery and path helpers shared by the pipeline and the front end.

use anyhow::Result;
use std::path::{Path, PathBuf};

/// File utilities
pub mod file_utils {
    use super::*;
    use std::fs;
    use tracing::warn;

    use crate::language::{is_java_source, JAVA_EXTENSION};

    /// Read file content safely
    pub fn read_file_content(path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    /// Every `.java` file below `root`, sorted by path. A bare `.java` dotfile
    /// has no extension and is not a source.
    ///
    /// Entries that cannot be read while walking are logged and skipped.
    pub fn discover_java_sources(root: &Path) -> Result<Vec<PathBuf>> {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let pattern = format!("{}/**/*.{}", escaped_root, JAVA_EXTENSION);

        let mut sources = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() && is_java_source(&path) => sources.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }
        sources.sort();
        Ok(sources)
    }
}

/// Path conversion utilities (absolute -> relative Unix-style)
pub mod paths;

#[cfg(test)]
mod tests {
    use super::file_utils::*;
    use std::fs;

    #[test]
    fn test_discovery_finds_nested_java_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/deep")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/deep/Z.java"), "class Z {}").unwrap();
        fs::write(root.join("a/Y.java"), "class Y {}").unwrap();
        fs::write(root.join("X.java"), "class X {}").unwrap();
        fs::write(root.join("notes.txt"), "not java").unwrap();
        fs::write(root.join(".java"), "class Hidden {}").unwrap();
        fs::create_dir_all(root.join("pkg.java")).unwrap();

        let found = discover_java_sources(root).unwrap();
        let relative: Vec<String> = found
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(relative, vec!["X.java", "a/Y.java", "b/deep/Z.java"]);
    }

    #[test]
    fn test_read_file_content_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_file_content(&dir.path().join("Missing.java")).is_err());
    }
}
