//! Marker attributes consumed by the analyzer on the next build

use super::writer::SourceWriter;
use super::{Emitter, SharedSource};
use content_pipeline_core::ArtifactKind;

impl Emitter {
    pub(super) fn attributes(&self) -> Vec<SharedSource> {
        vec![
            SharedSource::new(
                "ContentPipelineIgnoreAttribute",
                ArtifactKind::Attribute,
                self.ignore_attribute(),
            ),
            SharedSource::new(
                "ContentPipelineModelAttribute",
                ArtifactKind::Attribute,
                self.model_attribute(),
            ),
            SharedSource::new(
                "ContentPipelinePropertyConverterAttribute",
                ArtifactKind::Attribute,
                self.converter_attribute(),
            ),
            SharedSource::new(
                "IContentPipelinePropertyConverterAttribute",
                ArtifactKind::Attribute,
                self.converter_attribute_marker(),
            ),
        ]
    }

    fn attribute_file(&self, usings: &[&str]) -> SourceWriter {
        let mut w = SourceWriter::file();
        w.usings(&["System"]).usings(usings).blank().namespace(&self.ns("Attributes"));
        w
    }

    fn ignore_attribute(&self) -> String {
        let mut w = self.attribute_file(&[]);
        w.summary("Excludes a property from its pipeline model")
            .line("[AttributeUsage(AttributeTargets.Property)]")
            .open("public class ContentPipelineIgnoreAttribute : Attribute")
            .close();
        w.finish()
    }

    fn model_attribute(&self) -> String {
        let mut w = self.attribute_file(&[]);
        w.summary("Opts a content class into pipeline generation")
            .line("[AttributeUsage(AttributeTargets.Class, Inherited = true)]")
            .open("public class ContentPipelineModelAttribute : Attribute")
            .open("public ContentPipelineModelAttribute(string group = \"Common\", int order = 0)")
            .line("Group = group;")
            .line("Order = order;")
            .close()
            .blank()
            .line("public string Group { get; set; }")
            .blank()
            .line("public int Order { get; set; }")
            .close();
        w.finish()
    }

    fn converter_attribute(&self) -> String {
        let interfaces = self.ns("Interfaces");
        let mut w = self.attribute_file(&[&interfaces]);
        w.summary("Replaces the default converter of a property")
            .line("[AttributeUsage(AttributeTargets.Property)]")
            .line("public class ContentPipelinePropertyConverterAttribute<TConverter> : Attribute,")
            .indent()
            .line("IContentPipelinePropertyConverterAttribute<TConverter>")
            .line("where TConverter : IContentPropertyConverter")
            .dedent()
            .open("")
            .close();
        w.finish()
    }

    fn converter_attribute_marker(&self) -> String {
        let interfaces = self.ns("Interfaces");
        let mut w = self.attribute_file(&[&interfaces]);
        w.summary("Implemented by attributes that select a property converter")
            .line("public interface IContentPipelinePropertyConverterAttribute<TConverter>")
            .indent()
            .line("where TConverter : IContentPropertyConverter")
            .dedent()
            .open("")
            .close();
        w.finish()
    }
}
