//! Run driver: discover sources, index packages, extract every compilation
//! unit, emit records.
//!
//! Extraction of each unit is pure (its package and source path travel in
//! its own `UnitContext`), so units are parsed and canonicalized in parallel,
//! one batch of source paths at a time. Emission stays sequential in
//! source-path order, then declaration pre-order within a unit, so collisions
//! resolve the same way on every run.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, error, info, warn};

use crate::canon;
use crate::config::Config;
use crate::declarations::CompilationUnit;
use crate::emit::{ArtifactStore, Emitted};
use crate::error::{AstGenError, Result};
use crate::extractors::{JavaExtractor, PackageIndex};
use crate::records::TypeRecord;
use crate::utils::file_utils;

/// Source files extracted in parallel before their records are written.
pub const EXTRACTION_BATCH_SIZE: usize = 256;

/// Counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files_discovered: usize,
    pub units_extracted: usize,
    /// Units parsed with syntax errors (still extracted).
    pub units_with_syntax_errors: usize,
    pub artifacts_written: usize,
    /// Artifacts that replaced a stale artifact with the same key.
    pub artifacts_replaced: usize,
    pub read_failures: usize,
    pub emit_failures: usize,
}

impl RunSummary {
    /// Files that could not be read plus records that could not be written.
    pub fn failure_count(&self) -> usize {
        self.read_failures + self.emit_failures
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }
}

/// One source file after extraction.
struct ExtractedUnit {
    unit: CompilationUnit,
    records: Vec<TypeRecord>,
}

/// Run the generator over `config.source_root`.
///
/// Only a strict-policy collision (or an unusable configuration) ends the run
/// early; per-file failures are logged and counted.
pub fn run(config: &Config) -> Result<RunSummary> {
    run_in_batches(config, EXTRACTION_BATCH_SIZE)
}

/// [`run`] holding at most `batch_size` extracted units in memory.
pub fn run_in_batches(config: &Config, batch_size: usize) -> Result<RunSummary> {
    if !config.source_root.is_dir() {
        return Err(AstGenError::Config(format!(
            "source root '{}' is not a directory",
            config.source_root.display()
        )));
    }

    let sources = file_utils::discover_java_sources(&config.source_root).map_err(|e| {
        AstGenError::Config(format!(
            "cannot search source root '{}': {}",
            config.source_root.display(),
            e
        ))
    })?;
    let store = ArtifactStore::open(&config.output_dir, config.collision_policy)?;

    info!(
        "Generating ASTs for {} Java files from {} into {}",
        sources.len(),
        config.source_root.display(),
        store.output_dir().display()
    );

    let mut summary = RunSummary {
        files_discovered: sources.len(),
        ..RunSummary::default()
    };

    let index = build_package_index(&sources);
    debug!("Indexed {} top-level types", index.type_count());

    for batch in sources.chunks(batch_size.max(1)) {
        let extracted: Vec<(&PathBuf, Result<ExtractedUnit>)> = batch
            .par_iter()
            .map(|path| (path, extract_source(path, &config.source_root, &index)))
            .collect();

        for (path, outcome) in extracted {
            match outcome {
                Ok(extracted) => {
                    summary.units_extracted += 1;
                    if extracted.unit.has_syntax_errors {
                        summary.units_with_syntax_errors += 1;
                    }
                    emit_records(&store, &extracted.records, &mut summary)?;
                }
                Err(e) => {
                    error!("Failed to extract {}: {}", path.display(), e);
                    summary.read_failures += 1;
                }
            }
        }
    }

    info!(
        "Wrote {} artifacts ({} replaced) from {} units",
        summary.artifacts_written, summary.artifacts_replaced, summary.units_extracted
    );
    if summary.has_failures() {
        warn!(
            "{} source files could not be read and {} records could not be written",
            summary.read_failures, summary.emit_failures
        );
    }

    Ok(summary)
}

/// Packages and top-level type names of every readable source. Unreadable
/// files are skipped here and reported when extraction reads them.
fn build_package_index(sources: &[PathBuf]) -> PackageIndex {
    sources
        .par_iter()
        .filter_map(|path| match file_utils::read_file_content(path) {
            Ok(content) => Some(PackageIndex::scan(&content)),
            Err(e) => {
                debug!("Not indexing {}: {}", path.display(), e);
                None
            }
        })
        .reduce(PackageIndex::default, PackageIndex::merge)
}

/// Read, parse and canonicalize one source file.
fn extract_source(path: &Path, source_root: &Path, index: &PackageIndex) -> Result<ExtractedUnit> {
    let content = file_utils::read_file_content(path).map_err(|e| {
        match e.downcast::<std::io::Error>() {
            Ok(io) => AstGenError::io(path, io),
            Err(other) => AstGenError::Parse {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    })?;

    let unit = JavaExtractor::extract_unit(path, &content, source_root, index)?;
    let records = canon::visit_unit(&unit);
    debug!(
        "{}: {} declarations",
        unit.context.source_file_path,
        records.len()
    );
    Ok(ExtractedUnit { unit, records })
}

/// Emit a unit's records in order. Returns early only on a fatal error.
fn emit_records(store: &ArtifactStore, records: &[TypeRecord], summary: &mut RunSummary) -> Result<()> {
    for record in records {
        match store.emit(record) {
            Ok(Emitted::Created(_)) => summary.artifacts_written += 1,
            Ok(Emitted::Replaced(_)) => {
                summary.artifacts_written += 1;
                summary.artifacts_replaced += 1;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("Failed to emit {}: {}", record.key, e);
                summary.emit_failures += 1;
            }
        }
    }
    Ok(())
}
