//! Binary entry point for clump-astgen.
//!
//! ```bash
//! # Environment-driven, as existing build scripts call it
//! SOURCE=/work/swt/src DESTINATION=/tmp/asts clump-astgen
//!
//! # Flags override the environment
//! clump-astgen --source /work/swt/src --destination /tmp/asts --strict
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use clump_astgen::config::{ENV_DESTINATION, ENV_IGNORE_DUPLICATES, ENV_SOURCE};
use clump_astgen::{pipeline, Config};

/// Generate canonical JSON declaration records from Java sources.
#[derive(Parser, Debug)]
#[command(name = "clump-astgen", version, about = "Canonical AST records for data-clump mining")]
struct Cli {
    /// Source root to scan for `.java` files (overrides SOURCE).
    #[arg(long)]
    source: Option<PathBuf>,

    /// Output directory for the JSON artifacts (overrides DESTINATION).
    #[arg(long)]
    destination: Option<PathBuf>,

    /// Abort when two declarations map to the same key instead of overwriting.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    /// Value a flag supplies for an environment setting, if any.
    fn setting(&self, key: &str) -> Option<String> {
        match key {
            ENV_SOURCE => self.source.as_ref().map(|p| p.to_string_lossy().into_owned()),
            ENV_DESTINATION => self
                .destination
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            ENV_IGNORE_DUPLICATES if self.strict => Some("false".to_string()),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Initialize tracing subscriber (RUST_LOG, default `info`).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run once; `Ok(false)` when some files or records failed.
fn execute(cli: &Cli) -> anyhow::Result<bool> {
    let config = Config::from_lookup(|key| cli.setting(key).or_else(|| std::env::var(key).ok()))
        .context("Failed to load configuration")?;

    let summary = pipeline::run(&config).with_context(|| {
        format!(
            "AST generation from '{}' failed",
            config.source_root.display()
        )
    })?;

    info!(
        "Done: {} files, {} artifacts, {} failures",
        summary.files_discovered,
        summary.artifacts_written,
        summary.failure_count()
    );
    Ok(!summary.has_failures())
}
