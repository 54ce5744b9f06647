//! `content-pipeline check`: detect drift between the graph and checked-in files

use crate::generate::generate_in_memory;
use crate::input::Invocation;
use crate::lockfile::{LockFile, compute_sha256, verify_sha256};
use anyhow::{Context, Result};
use std::fmt;

/// Result of comparing regenerated output with the output directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Files that would be generated but do not exist
    pub missing: Vec<String>,
    /// Files whose content differs from what would be generated
    pub changed: Vec<String>,
    /// Files in the lock file that would no longer be generated
    pub stale: Vec<String>,
    pub checked: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.changed.is_empty() && self.stale.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.missing {
            writeln!(f, "missing: {name}")?;
        }
        for name in &self.changed {
            writeln!(f, "changed: {name}")?;
        }
        for name in &self.stale {
            writeln!(f, "stale:   {name}")?;
        }
        Ok(())
    }
}

/// Compare regenerated output with the files on disk
pub fn compare(invocation: &Invocation) -> Result<CheckReport> {
    let output = invocation.output_dir()?;
    let generation = generate_in_memory(invocation)?;
    let expected = LockFile::from_artifacts(&generation.artifacts, &invocation.options);

    let mut report = CheckReport {
        checked: generation.artifacts.len(),
        ..CheckReport::default()
    };
    for artifact in &generation.artifacts {
        let path = output.join(&artifact.file_name);
        if !path.is_file() {
            report.missing.push(artifact.file_name.clone());
            continue;
        }
        let on_disk = std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let checksum = compute_sha256(artifact.source.as_bytes());
        if !verify_sha256(&on_disk, &checksum) {
            report.changed.push(artifact.file_name.clone());
        }
    }

    if let Some(recorded) = LockFile::read(output)? {
        report.stale = recorded
            .stale_files(&expected)
            .filter(|name| output.join(name).is_file())
            .map(str::to_string)
            .collect();
    }
    Ok(report)
}

/// Fail when the output directory is out of date
pub fn run(invocation: &Invocation) -> Result<CheckReport> {
    let report = compare(invocation)?;
    if !report.is_clean() {
        eprint!("{report}");
        anyhow::bail!(
            "Generated files are out of date ({} missing, {} changed, {} stale); run `content-pipeline generate`",
            report.missing.len(),
            report.changed.len(),
            report.stale.len()
        );
    }
    Ok(report)
}
