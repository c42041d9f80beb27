// Path conversion for recorded source paths
//
// Artifacts record where a declaration came from relative to the configured
// source root, always with `/` separators so output is identical across
// platforms.

use anyhow::{Context, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a source file path to a relative Unix-style path (with `/` separators)
///
/// Strips the source root prefix and converts all path separators to `/`,
/// regardless of the platform.
///
/// # Returns
/// * `Ok(String)` - The relative Unix-style path (e.g., "com/example/Doctor.java")
/// * `Err` - If the file is not within the source root
pub fn to_relative_unix_style(absolute: &Path, source_root: &Path) -> Result<String> {
    // Canonicalize both to see through symlinks (/var -> /private/var on macOS);
    // fall back to the paths as given when either does not exist.
    let (path_to_use, root_to_use) = match (absolute.canonicalize(), source_root.canonicalize()) {
        (Ok(canonical_abs), Ok(canonical_root)) => (canonical_abs, canonical_root),
        _ => (absolute.to_path_buf(), source_root.to_path_buf()),
    };

    // Canonicalized Windows paths carry a \\?\ prefix that breaks strip_prefix
    #[cfg(windows)]
    fn strip_unc_prefix(path: &Path) -> std::path::PathBuf {
        let path_str = path.to_string_lossy();
        if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
            std::path::PathBuf::from(stripped)
        } else {
            path.to_path_buf()
        }
    }

    #[cfg(not(windows))]
    fn strip_unc_prefix(path: &Path) -> std::path::PathBuf {
        path.to_path_buf()
    }

    let normalized_path = strip_unc_prefix(&path_to_use);
    let normalized_root = strip_unc_prefix(&root_to_use);

    let relative = normalized_path
        .strip_prefix(&normalized_root)
        .with_context(|| {
            format!(
                "File path '{}' is not within source root '{}'",
                normalized_path.display(),
                normalized_root.display()
            )
        })?;

    let path_str = relative.to_str().context("Path contains invalid UTF-8")?;

    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}
