//! Language Extractors Module
//!
//! Tree-sitter based front ends. Each one parses source code and produces the
//! declaration tree (`crate::declarations`) the canonicalization engine reads.
//!
//! - `java` - class and interface declarations of `.java` files

pub mod java;

pub use java::{ImportTable, JavaExtractor, PackageIndex};
