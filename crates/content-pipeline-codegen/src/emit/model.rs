//! Per-class pipeline model

use super::writer::{SourceWriter, string_literal};
use super::{Emitter, global, group_identifier};
use content_pipeline_core::ContentClass;

impl Emitter {
    /// `{Name}PipelineModel`: one settable property per mapped property
    pub fn pipeline_model(&self, class: &ContentClass) -> String {
        let group = group_identifier(class);
        let interfaces = self.ns("Interfaces");
        let properties = self.ns("Properties");

        let mut w = SourceWriter::file();
        w.usings(&["System.Collections.Generic", interfaces.as_str(), properties.as_str()])
            .blank()
            .namespace(&self.options.models_namespace(&group))
            .summary(&format!(
                "Pipeline model of <see cref=\"{}\"/>",
                global(&class.fully_qualified_name)
            ))
            .open(&format!(
                "public partial class {} : {}, I{group}PipelineModel",
                class.pipeline_model_name(),
                global(&self.ns("Models.ContentPipelineModel"))
            ))
            .line(&format!(
                "public override string PipelineModelType => {};",
                string_literal(&class.discriminant())
            ));

        for property in &class.properties {
            w.blank().line(&format!(
                "public {} {} {{ get; set; }}",
                property.exposed_type, property.name
            ));
        }

        w.close();
        w.finish()
    }
}
