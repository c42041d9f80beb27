//! Run configuration.
//!
//! Read from the environment variables the generator has always been driven
//! by (`SOURCE`, `DESTINATION`, `IGNORE_DUBLICATE_DEFINITION`, ...). The
//! binary lets command-line flags override them.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{AstGenError, Result};

pub const ENV_SOURCE: &str = "SOURCE";
pub const ENV_DESTINATION: &str = "DESTINATION";
/// Spelling used by existing build scripts.
pub const ENV_IGNORE_DUPLICATES: &str = "IGNORE_DUBLICATE_DEFINITION";
pub const ENV_IGNORE_DUPLICATES_ALT: &str = "IGNORE_DUPLICATE_DEFINITION";
pub const ENV_GENERATE_REFERENCES: &str = "GENERATE_REFERENCES_OF_FIELDS_AND_METHODS";
pub const ENV_IGNORE_WILDCARD_IMPORTS: &str = "IGNORE_WILDCARD_IMPORTS";

pub const DEFAULT_OUTPUT_DIR: &str = "./output";

/// What to do when an artifact for a key already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Delete the stale artifact and write the new one.
    #[default]
    Overwrite,
    /// Abort the run, naming both source files.
    Strict,
}

impl CollisionPolicy {
    /// Unset or `true` (any case) permits overwriting; anything else is strict.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None => CollisionPolicy::Overwrite,
            Some(v) if v.trim().eq_ignore_ascii_case("true") => CollisionPolicy::Overwrite,
            Some(_) => CollisionPolicy::Strict,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root that artifact `sourceFilePath`s are relative to.
    pub source_root: PathBuf,
    pub output_dir: PathBuf,
    pub collision_policy: CollisionPolicy,
    /// Reserved: usage references of fields and methods.
    pub generate_references: bool,
    /// Reserved: wildcard-import handling.
    pub ignore_wildcard_imports: bool,
}

impl Config {
    pub fn new(source_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_root: normalize_root(source_root.into()),
            output_dir: output_dir.into(),
            collision_policy: CollisionPolicy::default(),
            generate_references: false,
            ignore_wildcard_imports: false,
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key/value source (the environment, a test map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source_root = lookup(ENV_SOURCE)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AstGenError::Config(format!("{} (source root) is not set", ENV_SOURCE))
            })?;
        let output_dir = lookup(ENV_DESTINATION)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        let duplicates = lookup(ENV_IGNORE_DUPLICATES).or_else(|| lookup(ENV_IGNORE_DUPLICATES_ALT));

        let config = Config {
            source_root: normalize_root(PathBuf::from(source_root)),
            output_dir: PathBuf::from(output_dir),
            collision_policy: CollisionPolicy::from_setting(duplicates.as_deref()),
            generate_references: flag(lookup(ENV_GENERATE_REFERENCES).as_deref()),
            ignore_wildcard_imports: flag(lookup(ENV_IGNORE_WILDCARD_IMPORTS).as_deref()),
        };

        if config.generate_references || config.ignore_wildcard_imports {
            debug!(
                "reserved switches set (generate_references={}, ignore_wildcard_imports={}); they have no effect yet",
                config.generate_references, config.ignore_wildcard_imports
            );
        }

        Ok(config)
    }
}

fn flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Drop a trailing separator so relative paths never start with `/`.
fn normalize_root(root: PathBuf) -> PathBuf {
    let text = root.to_string_lossy();
    let trimmed = text.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() || trimmed.len() == text.len() {
        root
    } else {
        PathBuf::from(trimmed)
    }
}
