//! Error types for AST generation.
//!
//! A key collision under the strict policy is the only fatal condition of a
//! run; everything else is either reported per file or degrades locally.

use std::path::PathBuf;

use thiserror::Error;

/// Recorded path used when a colliding artifact cannot be read back.
pub const UNREADABLE_ARTIFACT_PATH: &str = "OTHER FILE COULD NOT BE READ";

#[derive(Debug, Error)]
pub enum AstGenError {
    /// Two declarations map to the same canonical key.
    #[error(
        "type '{key}' is declared more than once; existing artifact {artifact}: \
         defined in '{new_path}' and in '{existing_path}'",
        artifact = artifact.display()
    )]
    Collision {
        key: String,
        new_path: String,
        existing_path: String,
        artifact: PathBuf,
    },

    #[error("I/O error on {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {path}: {message}", path = path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AstGenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AstGenError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors that must stop the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AstGenError::Collision { .. } | AstGenError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, AstGenError>;
