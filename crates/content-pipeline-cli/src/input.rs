//! Input resolution shared by every command
//!
//! Flags win over the manifest; the manifest wins over built-in defaults.

use crate::manifest::Manifest;
use anyhow::{Context, Result};
use content_pipeline_codegen::DeclarationGraph;
use content_pipeline_core::{Diagnostics, GeneratorOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options given on the command line
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
    pub forms: bool,
    pub namespace: Option<String>,
}

/// What a command runs against
#[derive(Debug, Clone)]
pub struct Invocation {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub options: GeneratorOptions,
}

impl Invocation {
    /// Merge flags with the manifest they name
    pub fn resolve(flags: Flags) -> Result<Self> {
        let manifest = match &flags.manifest {
            Some(path) => {
                let manifest = Manifest::from_file(path)?;
                manifest.validate()?;
                debug!(manifest = %path.display(), "loaded manifest");
                manifest
            }
            None => Manifest::default(),
        };

        let mut options = manifest.options();
        if flags.forms {
            options.forms_enabled = true;
        }
        if let Some(namespace) = flags.namespace {
            options.shared_namespace = namespace;
        }
        options.validate().context("Invalid generator options")?;

        let input = flags
            .input
            .or(manifest.input.graph)
            .context("No declaration graph given (use --input or [input] graph in the manifest)")?;

        Ok(Self {
            input,
            output: flags.output.or(manifest.input.output),
            options,
        })
    }

    /// Output directory, required by commands that touch files
    pub fn output_dir(&self) -> Result<&Path> {
        self.output
            .as_deref()
            .context("No output directory given (use --output or [input] output in the manifest)")
    }

    pub fn load_graph(&self) -> Result<DeclarationGraph> {
        DeclarationGraph::from_file(&self.input)
            .with_context(|| format!("Failed to load declaration graph: {}", self.input.display()))
    }
}

/// Print diagnostics to stderr
pub fn report_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        eprintln!("{diagnostic}");
    }
}

/// Fail when any diagnostic is an error
pub fn ensure_no_errors(diagnostics: &Diagnostics) -> Result<()> {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    if errors > 0 {
        anyhow::bail!("Generation reported {errors} error(s)");
    }
    Ok(())
}
