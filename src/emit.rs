//! Artifact store: one JSON document per emitted type record.
//!
//! Artifacts are named `<key>.json` inside the output directory. Emission is
//! check-then-write: an existing artifact for the same key is either replaced
//! or, under the strict policy, reported as a collision naming both source
//! files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::CollisionPolicy;
use crate::error::{AstGenError, Result, UNREADABLE_ARTIFACT_PATH};
use crate::records::TypeRecord;

/// What happened to an emitted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emitted {
    Created(PathBuf),
    /// A stale artifact with the same key was deleted first.
    Replaced(PathBuf),
}

impl Emitted {
    pub fn path(&self) -> &Path {
        match self {
            Emitted::Created(path) | Emitted::Replaced(path) => path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    output_dir: PathBuf,
    policy: CollisionPolicy,
}

impl ArtifactStore {
    /// Open the store, creating the output directory if needed.
    pub fn open(output_dir: impl Into<PathBuf>, policy: CollisionPolicy) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| AstGenError::io(&output_dir, e))?;
        Ok(Self { output_dir, policy })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the artifact for `key` lives.
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", key))
    }

    /// Serialize and persist one record.
    pub fn emit(&self, record: &TypeRecord) -> Result<Emitted> {
        let json = record.to_json().map_err(|source| AstGenError::Serialize {
            key: record.key.clone(),
            source,
        })?;
        let path = self.artifact_path(&record.key);

        let replaced = if path.exists() {
            match self.policy {
                CollisionPolicy::Overwrite => {
                    debug!("Replacing stale artifact {}", path.display());
                    fs::remove_file(&path).map_err(|e| AstGenError::io(&path, e))?;
                    true
                }
                CollisionPolicy::Strict => {
                    return Err(AstGenError::Collision {
                        key: record.key.clone(),
                        new_path: record.source_file_path.clone(),
                        existing_path: recorded_source_path(&path),
                        artifact: path,
                    });
                }
            }
        } else {
            false
        };

        fs::write(&path, json).map_err(|e| AstGenError::io(&path, e))?;
        info!("AST generated for: {}", path.display());

        Ok(if replaced {
            Emitted::Replaced(path)
        } else {
            Emitted::Created(path)
        })
    }
}

/// The `sourceFilePath` recorded in an existing artifact, or a placeholder
/// when it cannot be read.
pub fn recorded_source_path(artifact: &Path) -> String {
    let recorded = fs::read_to_string(artifact)
        .ok()
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok())
        .and_then(|value| {
            value
                .get("sourceFilePath")
                .and_then(|path| path.as_str())
                .map(str::to_string)
        });

    recorded.unwrap_or_else(|| {
        debug!(
            "Could not read the recorded source path of {}",
            artifact.display()
        );
        UNREADABLE_ARTIFACT_PATH.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TypeKind;

    fn record(key: &str, source: &str) -> TypeRecord {
        let name = key.rsplit('.').next().unwrap_or(key).to_string();
        TypeRecord::new(name, key.to_string(), TypeKind::Class, source.to_string())
    }

    #[test]
    fn test_open_creates_nested_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out/asts");
        let store = ArtifactStore::open(&out, CollisionPolicy::Overwrite).unwrap();
        assert!(out.is_dir());
        assert_eq!(
            store.artifact_path("com.example.Doctor"),
            out.join("com.example.Doctor.json")
        );
    }

    #[test]
    fn test_emit_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path(), CollisionPolicy::Overwrite).unwrap();

        let emitted = store
            .emit(&record("com.example.Doctor", "com/example/Doctor.java"))
            .unwrap();
        assert!(matches!(emitted, Emitted::Created(_)));

        let text = fs::read_to_string(emitted.path()).unwrap();
        assert!(text.contains("\n  \"name\": \"Doctor\""));
        let back: TypeRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(back.source_file_path, "com/example/Doctor.java");
    }

    #[test]
    fn test_overwrite_policy_replaces_stale_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path(), CollisionPolicy::Overwrite).unwrap();

        store.emit(&record("p.Dup", "a/p/Dup.java")).unwrap();
        let second = store.emit(&record("p.Dup", "b/p/Dup.java")).unwrap();

        assert!(matches!(second, Emitted::Replaced(_)));
        assert_eq!(recorded_source_path(second.path()), "b/p/Dup.java");
    }

    #[test]
    fn test_strict_policy_reports_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path(), CollisionPolicy::Strict).unwrap();

        store.emit(&record("p.Dup", "a/p/Dup.java")).unwrap();
        let error = store.emit(&record("p.Dup", "b/p/Dup.java")).unwrap_err();

        match error {
            AstGenError::Collision {
                key,
                new_path,
                existing_path,
                ..
            } => {
                assert_eq!(key, "p.Dup");
                assert_eq!(new_path, "b/p/Dup.java");
                assert_eq!(existing_path, "a/p/Dup.java");
            }
            other => panic!("expected collision, got {:?}", other),
        }
        // The first artifact is untouched.
        assert_eq!(
            recorded_source_path(&store.artifact_path("p.Dup")),
            "a/p/Dup.java"
        );
    }

    #[test]
    fn test_unreadable_existing_artifact_degrades_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path(), CollisionPolicy::Strict).unwrap();
        fs::write(store.artifact_path("p.Broken"), "{ not json").unwrap();

        let error = store.emit(&record("p.Broken", "p/Broken.java")).unwrap_err();
        match error {
            AstGenError::Collision { existing_path, .. } => {
                assert_eq!(existing_path, UNREADABLE_ARTIFACT_PATH)
            }
            other => panic!("expected collision, got {:?}", other),
        }
    }
}
