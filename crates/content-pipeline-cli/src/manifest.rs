//! Manifest parsing and validation

use anyhow::{Context, Result};
use content_pipeline_core::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_FILE_NAME: &str = "content-pipeline.toml";

/// content-pipeline.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub generator: GeneratorSection,

    #[serde(default)]
    pub input: InputSection,

    /// Host build properties, as the compiler would pass them
    #[serde(default)]
    pub build_properties: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default)]
    pub shared_namespace: Option<String>,

    #[serde(default)]
    pub forms_enabled: Option<bool>,

    #[serde(default)]
    pub file_extension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputSection {
    /// Declaration graph, relative to the manifest
    #[serde(default)]
    pub graph: Option<PathBuf>,

    /// Output directory, relative to the manifest
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Manifest {
    /// Load manifest from a file
    ///
    /// Relative paths in `[input]` are resolved against the manifest's
    /// directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let mut manifest = Self::from_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))?;
        if let Some(dir) = path.parent() {
            manifest.input.graph = manifest.input.graph.map(|p| dir.join(p));
            manifest.input.output = manifest.input.output.map(|p| dir.join(p));
        }
        Ok(manifest)
    }

    /// Parse manifest from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Generator options described by the manifest
    ///
    /// The forms flag is on when either `[generator]` or the build
    /// properties enable it.
    pub fn options(&self) -> GeneratorOptions {
        let mut options = GeneratorOptions::from_build_properties(&self.build_properties);
        if let Some(namespace) = &self.generator.shared_namespace {
            options.shared_namespace = namespace.clone();
        }
        if let Some(forms) = self.generator.forms_enabled {
            options.forms_enabled |= forms;
        }
        if let Some(extension) = &self.generator.file_extension {
            options.file_extension = extension.clone();
        }
        options
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        self.options().validate().context("Invalid [generator] section")?;

        if self.input.graph.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            anyhow::bail!("[input] graph cannot be empty");
        }
        if self.input.output.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            anyhow::bail!("[input] output cannot be empty");
        }

        Ok(())
    }
}
