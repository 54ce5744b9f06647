//! Value types produced by the default converters

use super::writer::SourceWriter;
use super::{Emitter, SharedSource};
use content_pipeline_core::ArtifactKind;

impl Emitter {
    pub(super) fn properties(&self) -> Vec<SharedSource> {
        vec![
            SharedSource::new("Link", ArtifactKind::Property, self.link()),
            SharedSource::new("Media", ArtifactKind::Property, self.media()),
            SharedSource::new(
                "ContentAreaItemPipelineModel",
                ArtifactKind::Property,
                self.content_area_item(),
            ),
            SharedSource::new(
                "ContentAreaPipelineModel",
                ArtifactKind::Property,
                self.content_area(),
            ),
        ]
    }

    fn property_file(&self) -> SourceWriter {
        let mut w = SourceWriter::file();
        w.usings(&[&self.ns("Interfaces")])
            .blank()
            .namespace(&self.ns("Properties"));
        w
    }

    fn link(&self) -> String {
        let mut w = self.property_file();
        w.open("public partial class Link : ILinkPipelineModel")
            .line("public string? Url { get; set; }")
            .close();
        w.finish()
    }

    fn media(&self) -> String {
        let mut w = self.property_file();
        w.summary("Resolved media asset; every member is null when the asset is missing")
            .open("public partial class Media")
            .line("public string? Url { get; set; }")
            .blank()
            .line("public string? Type { get; set; }")
            .blank()
            .line("public IContentPipelineModel? Properties { get; set; }")
            .close();
        w.finish()
    }

    fn content_area_item(&self) -> String {
        let mut w = self.property_file();
        w.open("public partial class ContentAreaItemPipelineModel")
            .line("public string? DisplayOption { get; set; }")
            .blank()
            .line("public IContentPipelineModel? Content { get; set; }")
            .close();
        w.finish()
    }

    fn content_area(&self) -> String {
        let mut w = SourceWriter::file();
        w.usings(&["System.Collections.Generic"])
            .blank()
            .namespace(&self.ns("Properties"))
            .open("public partial class ContentAreaPipelineModel")
            .line("public IEnumerable<ContentAreaItemPipelineModel>? Items { get; set; }")
            .close();
        w.finish()
    }
}
