//! Base model class and one marker interface per group

use super::writer::{SourceWriter, string_literal};
use super::{Emitter, SharedSource, distinct_groups};
use content_pipeline_core::{ArtifactKind, BASE_MODEL_DISCRIMINANT, ContentClass};

impl Emitter {
    pub(super) fn base_models(&self, classes: &[ContentClass]) -> Vec<SharedSource> {
        let mut sources = vec![SharedSource::new(
            "ContentPipelineModel",
            ArtifactKind::BaseModel,
            self.base_model(),
        )];

        for group in distinct_groups(classes) {
            sources.push(SharedSource::new(
                format!("I{group}PipelineModel"),
                ArtifactKind::GroupInterface,
                self.group_interface(&group),
            ));
        }
        sources
    }

    fn base_model(&self) -> String {
        let mut w = SourceWriter::file();
        w.usings(&[&self.ns("Interfaces")])
            .blank()
            .namespace(&self.ns("Models"))
            .summary("Base class of every generated pipeline model")
            .open("public partial class ContentPipelineModel : IContentPipelineModel")
            .line(&format!(
                "public virtual string PipelineModelType => {};",
                string_literal(BASE_MODEL_DISCRIMINANT)
            ))
            .close();
        w.finish()
    }

    fn group_interface(&self, group: &str) -> String {
        let mut w = SourceWriter::file();
        w.usings(&[&self.ns("Interfaces")])
            .blank()
            .namespace(&self.options.models_namespace(group))
            .summary(&format!("Implemented by every pipeline model in the {group} group"))
            .open(&format!(
                "public partial interface I{group}PipelineModel : IContentPipelineModel"
            ))
            .close();
        w.finish()
    }
}
