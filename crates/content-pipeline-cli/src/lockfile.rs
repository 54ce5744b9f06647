//! Lock file recording the checksum of every generated file

use anyhow::{Context, Result};
use content_pipeline_core::{CodeArtifact, GeneratorOptions};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Component, Path};

/// Name of the lock file written next to the generated files
pub const LOCK_FILE_NAME: &str = "content-pipeline.lock.json";

/// content-pipeline.lock.json structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    /// Version of the generator that wrote the files
    pub generator_version: String,

    pub shared_namespace: String,

    /// File name to `sha256:<hex>` checksum
    pub files: BTreeMap<String, String>,
}

impl LockFile {
    /// Describe a set of artifacts
    pub fn from_artifacts(artifacts: &[CodeArtifact], options: &GeneratorOptions) -> Self {
        let files = artifacts
            .iter()
            .map(|artifact| {
                (
                    artifact.file_name.clone(),
                    format!("sha256:{}", compute_sha256(artifact.source.as_bytes())),
                )
            })
            .collect();

        Self {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            shared_namespace: options.shared_namespace.clone(),
            files,
        }
    }

    /// Read the lock file in `dir`, if there is one
    pub fn read(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(LOCK_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read lock file: {}", path.display()))?;
        let lock: LockFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse lock file: {}", path.display()))?;
        lock.validate()
            .with_context(|| format!("Invalid lock file: {}", path.display()))?;
        Ok(Some(lock))
    }

    /// Every recorded name must be a bare file name inside the output directory
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.files.keys().find(|name| !is_plain_file_name(name)) {
            anyhow::bail!("'{name}' is not a file name inside the output directory");
        }
        Ok(())
    }

    /// Write the lock file into `dir`
    pub fn write(&self, dir: &Path) -> Result<()> {
        let path = dir.join(LOCK_FILE_NAME);
        let mut json = serde_json::to_string_pretty(self).context("Failed to serialize lock file")?;
        json.push('\n');
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write lock file: {}", path.display()))
    }

    /// Files recorded here but absent from `other`
    pub fn stale_files<'a>(&'a self, other: &'a LockFile) -> impl Iterator<Item = &'a str> {
        self.files
            .keys()
            .filter(|name| !other.files.contains_key(*name))
            .map(String::as_str)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Compute SHA256 hash of data and return as hex string.
pub fn compute_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify data against a `sha256:<hex>` or bare hex checksum
pub fn verify_sha256(data: &[u8], expected: &str) -> bool {
    let expected_hex = expected.strip_prefix("sha256:").unwrap_or(expected);
    compute_sha256(data) == expected_hex
}
