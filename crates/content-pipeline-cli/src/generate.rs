//! `content-pipeline generate`

use crate::input::{Invocation, ensure_no_errors, report_diagnostics};
use crate::lockfile::LockFile;
use anyhow::{Context, Result};
use content_pipeline_codegen::{Generation, generate};
use content_pipeline_core::CancellationToken;
use std::path::Path;
use tracing::{debug, info};

/// Summary of a generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub written: usize,
    pub removed: Vec<String>,
}

/// Run analysis and emission in memory
pub fn generate_in_memory(invocation: &Invocation) -> Result<Generation> {
    let graph = invocation.load_graph()?;
    let generation = generate(&graph, &invocation.options, &CancellationToken::new())
        .with_context(|| format!("Failed to generate from {}", invocation.input.display()))?;

    report_diagnostics(&generation.diagnostics);
    ensure_no_errors(&generation.diagnostics)?;
    Ok(generation)
}

/// Generate every artifact into the output directory
///
/// Files recorded by a previous lock file and no longer generated are
/// deleted. Nothing is written when generation reports errors.
pub fn run(invocation: &Invocation) -> Result<GenerateSummary> {
    let output = invocation.output_dir()?;
    let generation = generate_in_memory(invocation)?;

    std::fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let lock = LockFile::from_artifacts(&generation.artifacts, &invocation.options);
    let removed = remove_stale(output, &lock)?;

    for artifact in &generation.artifacts {
        let path = output.join(&artifact.file_name);
        std::fs::write(&path, &artifact.source)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(file = %artifact.file_name, "wrote artifact");
    }
    lock.write(output)?;

    info!(
        files = generation.artifacts.len(),
        removed = removed.len(),
        output = %output.display(),
        "generated artifacts"
    );
    Ok(GenerateSummary {
        written: generation.artifacts.len(),
        removed,
    })
}

fn remove_stale(output: &Path, lock: &LockFile) -> Result<Vec<String>> {
    let Some(previous) = LockFile::read(output)? else {
        return Ok(Vec::new());
    };

    let mut removed = Vec::new();
    for name in previous.stale_files(lock) {
        let path = output.join(name);
        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale file {}", path.display()))?;
            debug!(file = name, "removed stale artifact");
        }
        removed.push(name.to_string());
    }
    Ok(removed)
}
