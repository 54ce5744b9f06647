//! Generator configuration types

use crate::error::{GenerateError, GenerateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options controlling a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Root namespace of every generated artifact
    #[serde(default = "default_shared_namespace")]
    pub shared_namespace: String,

    /// Whether the synthetic form container class is included
    #[serde(default)]
    pub forms_enabled: bool,

    /// Extension of generated files, without the leading dot
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

fn default_shared_namespace() -> String {
    "ContentPipeline".to_string()
}

fn default_file_extension() -> String {
    "cs".to_string()
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            shared_namespace: default_shared_namespace(),
            forms_enabled: false,
            file_extension: default_file_extension(),
        }
    }
}

impl GeneratorOptions {
    /// Build property that switches the form container class on
    pub const FORMS_BUILD_PROPERTY: &'static str = "build_property.ContentPipeline_EnableForms";

    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Create options from the host's build-property map
    ///
    /// Only the forms flag is read; everything else keeps its default.
    pub fn from_build_properties(properties: &BTreeMap<String, String>) -> Self {
        let forms_enabled = properties
            .get(Self::FORMS_BUILD_PROPERTY)
            .is_some_and(|value| is_feature_enabled(value));

        Self {
            forms_enabled,
            ..Self::default()
        }
    }

    /// Namespace of converter, step and service contracts
    pub fn interface_namespace(&self) -> String {
        format!("{}.Interfaces", self.shared_namespace)
    }

    /// Namespace of the per-group DTOs
    pub fn models_namespace(&self, group: &str) -> String {
        format!("{}.Models.{group}", self.shared_namespace)
    }

    /// Namespace of the per-group mapping steps
    pub fn steps_namespace(&self, group: &str) -> String {
        format!("{}.Pipelines.{group}.Steps", self.shared_namespace)
    }

    pub fn with_shared_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.shared_namespace = namespace.into();
        self
    }

    pub fn with_forms_enabled(mut self, enabled: bool) -> Self {
        self.forms_enabled = enabled;
        self
    }

    pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
        self.file_extension = extension.into();
        self
    }

    /// Check the options before a run
    pub fn validate(&self) -> GenerateResult<()> {
        if self.shared_namespace.is_empty() {
            return Err(GenerateError::ConfigError(
                "shared_namespace cannot be empty".to_string(),
            ));
        }

        let valid_segment = |segment: &str| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|c| c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        };
        if !self.shared_namespace.split('.').all(valid_segment) {
            return Err(GenerateError::ConfigError(format!(
                "shared_namespace '{}' is not a valid namespace",
                self.shared_namespace
            )));
        }

        if self.file_extension.is_empty()
            || self.file_extension.starts_with('.')
            || !self.file_extension.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(GenerateError::ConfigError(format!(
                "file_extension '{}' must be alphanumeric without a leading dot",
                self.file_extension
            )));
        }

        Ok(())
    }
}

/// Whether a build-property value switches a feature on
///
/// Accepts `enable`, `enabled` and `true` in any case.
pub fn is_feature_enabled(value: &str) -> bool {
    let value = value.trim();
    ["enable", "enabled", "true"]
        .iter()
        .any(|accepted| value.eq_ignore_ascii_case(accepted))
}

#[cfg(test)]
#[path = "options/options_tests.rs"]
mod options_tests;
