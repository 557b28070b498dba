//! Batch command - build every job in a manifest

use anyhow::{Context, Result};
use mplsg_core::batch::{self, Manifest};
use mplsg_core::BuildConfig;
use std::path::Path;

use crate::output::{render_outcomes, OutputFormat};

/// Run the batch command
///
/// Failed jobs are reported alongside successful ones; the command itself
/// fails only when the manifest cannot be read.
pub fn run(
    manifest: &Path,
    threads: Option<usize>,
    format: OutputFormat,
    config: &BuildConfig,
) -> Result<()> {
    let manifest = Manifest::load(manifest)
        .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;

    tracing::info!(jobs = manifest.jobs.len(), "running batch");
    let outcomes = batch::run(&manifest.jobs, threads, config);

    println!("{}", render_outcomes(&outcomes, format)?);
    Ok(())
}
