//! C# emission.
//!
//! Every artifact is a pure function of the options and the resolved
//! classes. Shared artifacts have fixed file names; per-class artifacts are
//! named through [`ArtifactNamer`] so two classes never write the same file.
//!
//! Namespace layout under the shared namespace `{ns}`:
//!
//! | Namespace | Contents |
//! |-----------|----------|
//! | `{ns}.Interfaces` | model, converter, step, pipeline and service contracts |
//! | `{ns}.Models` | `ContentPipelineModel` base class |
//! | `{ns}.Models.{Group}` | group interface and per-class DTOs |
//! | `{ns}.Properties` | `Link`, `Media`, content area models |
//! | `{ns}.Attributes` | marker attributes |
//! | `{ns}.Converters` | default converter implementations |
//! | `{ns}.Pipelines` | step base classes and `DefaultContentPipeline` |
//! | `{ns}.Pipelines.{Group}.Steps` | per-class steps |
//! | `{ns}.Services` | pipeline service and XHTML rendering |
//! | `{ns}.Entities` | `PipelineArgs`, `ContentPipelineContext` |
//! | `{ns}.JsonConverters` | polymorphic JSON writers |
//! | `{ns}.ServiceCollectionExtensions` | container registrations |

mod attributes;
mod base_models;
mod converters;
mod interfaces;
mod json;
mod model;
mod pipelines;
mod properties;
mod registrations;
mod services;
mod step;
pub mod writer;

use crate::naming::{ArtifactNamer, sanitize_identifier};
use content_pipeline_core::{
    ArtifactKind, CancellationToken, CodeArtifact, ContentClass, GenerateResult, GeneratorOptions,
};
use std::collections::BTreeSet;
use tracing::debug;

/// A shared artifact before it is given a file name
#[derive(Debug)]
pub(crate) struct SharedSource {
    stem: String,
    kind: ArtifactKind,
    source: String,
}

impl SharedSource {
    fn new(stem: impl Into<String>, kind: ArtifactKind, source: String) -> Self {
        Self {
            stem: stem.into(),
            kind,
            source,
        }
    }
}

/// Renders the artifact set for one generation run
#[derive(Debug, Clone)]
pub struct Emitter {
    options: GeneratorOptions,
    cancellation: CancellationToken,
}

impl Emitter {
    pub fn new(options: GeneratorOptions, cancellation: CancellationToken) -> Self {
        Self {
            options,
            cancellation,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Render every artifact. `classes` must already be in resolution order.
    pub fn emit_all(&self, classes: &[ContentClass]) -> GenerateResult<Vec<CodeArtifact>> {
        self.cancellation.check()?;

        let mut namer = ArtifactNamer::new(self.options.file_extension.as_str());
        let mut artifacts = Vec::new();

        let shared = [
            self.base_models(classes),
            self.interfaces(),
            self.properties(),
            self.attributes(),
            self.converters(),
            self.pipelines(),
            self.services(classes),
            self.json_converters(classes),
            self.registrations(classes),
        ];
        for source in shared.into_iter().flatten() {
            let file_name = namer.shared(&source.stem)?;
            artifacts.push(CodeArtifact::new(file_name, source.kind, source.source));
        }

        for class in classes {
            self.cancellation.check()?;

            let model_file = namer.per_class(class, ArtifactKind::Model);
            artifacts.push(CodeArtifact::new(
                model_file,
                ArtifactKind::Model,
                self.pipeline_model(class),
            ));

            let step_file = namer.per_class(class, ArtifactKind::Step);
            artifacts.push(CodeArtifact::new(
                step_file,
                ArtifactKind::Step,
                self.pipeline_step(class),
            ));
        }

        debug!(
            classes = classes.len(),
            artifacts = artifacts.len(),
            "emitted artifacts"
        );
        Ok(artifacts)
    }

    /// `{ns}.{child}`
    fn ns(&self, child: &str) -> String {
        format!("{}.{child}", self.options.shared_namespace)
    }

    fn model_type(&self, class: &ContentClass) -> String {
        format!(
            "{}.{}",
            self.options.models_namespace(&group_identifier(class)),
            class.pipeline_model_name()
        )
    }

    fn step_type(&self, class: &ContentClass) -> String {
        format!(
            "{}.{}",
            self.options.steps_namespace(&group_identifier(class)),
            class.pipeline_step_name()
        )
    }
}

/// Group as it appears in generated namespaces and type names
pub(crate) fn group_identifier(class: &ContentClass) -> String {
    sanitize_identifier(&class.group)
}

/// Distinct groups in ordinal order
pub(crate) fn distinct_groups(classes: &[ContentClass]) -> BTreeSet<String> {
    classes.iter().map(group_identifier).collect()
}

/// Content type reference as written in generated code
pub(crate) fn global(fully_qualified_name: &str) -> String {
    format!("global::{fully_qualified_name}")
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod emit_tests;
