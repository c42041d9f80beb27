// Clump AST Generator - canonical declaration records from Java sources
//
// Parses Java compilation units with tree-sitter and writes one JSON record
// per class or interface declaration, the input of data-clump mining.
// Architecture: front end (extractors) -> declaration tree -> canon -> emit.

// Declaration tree shared by front ends and the canonicalization engine
pub mod declarations;

// Canonicalization engine: positions, names, keys, records
pub mod canon;
pub mod records;

// Tree-sitter front end
pub mod extractors;
pub mod language;

// Run driver and artifact store
pub mod config;
pub mod emit;
pub mod error;
pub mod pipeline;

pub mod utils;

pub use config::{CollisionPolicy, Config};
pub use emit::{ArtifactStore, Emitted};
pub use error::AstGenError;
pub use pipeline::{run, RunSummary};
pub use records::{AstPosition, FieldRecord, MethodRecord, ParameterRecord, TypeKind, TypeRecord};
