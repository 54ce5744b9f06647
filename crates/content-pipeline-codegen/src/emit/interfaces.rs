//! Contracts shared by generated and hand-written code

use super::writer::SourceWriter;
use super::{Emitter, SharedSource};
use content_pipeline_core::{ArtifactKind, WellKnownConverter};

/// `(property type, value type)` of a well-known converter contract
pub(crate) fn contract_types(converter: WellKnownConverter) -> (&'static str, &'static str) {
    match converter {
        WellKnownConverter::Block => ("ContentReference?", "IContentPipelineModel?"),
        WellKnownConverter::EmbeddedBlock => ("BlockData?", "IContentPipelineModel?"),
        WellKnownConverter::ContentReference => ("ContentReference?", "Link"),
        WellKnownConverter::ContentArea => ("ContentArea?", "ContentAreaPipelineModel?"),
        WellKnownConverter::Link => ("EPiServer.Url?", "Link?"),
        WellKnownConverter::Media => ("ContentReference?", "Media?"),
        WellKnownConverter::XhtmlString => ("XhtmlString?", "string"),
    }
}

impl Emitter {
    pub(super) fn interfaces(&self) -> Vec<SharedSource> {
        let mut sources = vec![
            SharedSource::new("IContentPipelineModel", ArtifactKind::Interface, self.model_contract()),
            SharedSource::new("ILinkPipelineModel", ArtifactKind::Interface, self.link_contract()),
            SharedSource::new(
                "IContentPropertyConverter",
                ArtifactKind::Interface,
                self.property_converter_contract(),
            ),
        ];

        for converter in WellKnownConverter::ALL {
            sources.push(SharedSource::new(
                converter.contract_name(),
                ArtifactKind::Interface,
                self.converter_contract(converter),
            ));
        }

        sources.extend([
            SharedSource::new("IEnumConverter", ArtifactKind::Interface, self.enum_converter_contract()),
            SharedSource::new("IXhtmlRenderService", ArtifactKind::Interface, self.xhtml_render_contract()),
            SharedSource::new(
                "IContentPipelineContext",
                ArtifactKind::Interface,
                self.pipeline_context_contract(),
            ),
            SharedSource::new("IContentPipelineStep", ArtifactKind::Interface, self.step_contract()),
            SharedSource::new("IContentPipeline", ArtifactKind::Interface, self.pipeline_contract()),
            SharedSource::new(
                "IContentPipelineService",
                ArtifactKind::Interface,
                self.service_contract(),
            ),
        ]);
        sources
    }

    fn interface_file<S: AsRef<str>>(&self, usings: &[S]) -> SourceWriter {
        let mut w = SourceWriter::file();
        if !usings.is_empty() {
            w.usings(usings).blank();
        }
        w.namespace(&self.options.interface_namespace());
        w
    }

    fn model_contract(&self) -> String {
        let mut w = self.interface_file::<&str>(&[]);
        w.summary("Implemented by every pipeline model")
            .open("public partial interface IContentPipelineModel")
            .summary("Tag identifying the concrete model; drives polymorphic serialization")
            .line("string PipelineModelType { get; }")
            .close();
        w.finish()
    }

    fn link_contract(&self) -> String {
        let mut w = self.interface_file::<&str>(&[]);
        w.open("public partial interface ILinkPipelineModel")
            .line("string? Url { get; set; }")
            .close();
        w.finish()
    }

    fn property_converter_contract(&self) -> String {
        let mut w = self.interface_file(&["System.Collections.Generic", "EPiServer.Core"]);
        w.summary("Marker implemented by every property converter")
            .open("public interface IContentPropertyConverter")
            .close()
            .blank()
            .summary("Turns a content property value into its pipeline model value")
            .line("public interface IContentPropertyConverter<in TProperty, out TValue> : IContentPropertyConverter")
            .open("")
            .line("TValue GetValue(")
            .indent()
            .line("TProperty property,")
            .line("IContentData content,")
            .line("string propertyName,")
            .line("IContentPipelineContext pipelineContext,")
            .line("Dictionary<string, string>? config = null);")
            .dedent()
            .close();
        w.finish()
    }

    fn converter_contract(&self, converter: WellKnownConverter) -> String {
        let properties = self.ns("Properties");
        let mut w = self.interface_file(&["EPiServer.Core", properties.as_str()]);
        let (property_type, value_type) = contract_types(converter);
        w.line(&format!(
            "public partial interface {} : IContentPropertyConverter<{property_type}, {value_type}>",
            converter.contract_name()
        ))
        .open("")
        .close();
        w.finish()
    }

    fn enum_converter_contract(&self) -> String {
        let mut w = self.interface_file(&["System"]);
        w.line("public partial interface IEnumConverter<TEnum> : IContentPropertyConverter<TEnum, string?>")
            .indent()
            .line("where TEnum : Enum")
            .dedent()
            .open("")
            .close();
        w.finish()
    }

    fn xhtml_render_contract(&self) -> String {
        let mut w = self.interface_file(&["EPiServer.Core", "Microsoft.AspNetCore.Http"]);
        w.open("public interface IXhtmlRenderService")
            .line("string RenderXhtmlString(HttpContext? context, XhtmlString? xhtmlString);")
            .close();
        w.finish()
    }

    fn pipeline_context_contract(&self) -> String {
        let mut w = self.interface_file(&["System.Globalization", "Microsoft.AspNetCore.Http"]);
        w.summary("Ambient state handed to every step and converter")
            .open("public interface IContentPipelineContext")
            .line("HttpContext HttpContext { get; }")
            .blank()
            .line("IContentPipelineService ContentPipelineService { get; }")
            .blank()
            .line("CultureInfo? Language { get; }")
            .close();
        w.finish()
    }

    fn step_contract(&self) -> String {
        let mut w = self.interface_file(&["System.Threading.Tasks", "EPiServer.Core"]);
        w.line("public interface IContentPipelineStep<in TContent, in TPipelineModel>")
            .indent()
            .line("where TContent : IContentData")
            .line("where TPipelineModel : IContentPipelineModel")
            .dedent()
            .open("")
            .summary("Steps run in ascending order")
            .line("int Order { get; }")
            .blank()
            .line("bool IsAsync { get; }")
            .blank()
            .line("void Execute(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext);")
            .blank()
            .line("Task ExecuteAsync(TContent content, TPipelineModel contentPipelineModel, IContentPipelineContext pipelineContext);")
            .close();
        w.finish()
    }

    fn pipeline_contract(&self) -> String {
        let mut w = self.interface_file(&["System.Threading.Tasks", "EPiServer.Core"]);
        w.line("public interface IContentPipeline<in TContent, TPipelineModel>")
            .indent()
            .line("where TContent : IContentData")
            .line("where TPipelineModel : IContentPipelineModel, new()")
            .dedent()
            .open("")
            .line("TPipelineModel Run(TContent content, IContentPipelineContext pipelineContext);")
            .blank()
            .line("Task<TPipelineModel> RunAsync(TContent content, IContentPipelineContext pipelineContext);")
            .close();
        w.finish()
    }

    fn service_contract(&self) -> String {
        let entities = self.ns("Entities");
        let mut w = self.interface_file(&["System.Threading.Tasks", "EPiServer.Core", entities.as_str()]);
        w.open("public interface IContentPipelineService")
            .line("IContentPipelineModel? ExecutePipeline(IContentData? content, IContentPipelineContext pipelineContext);")
            .blank()
            .line("IContentPipelineModel? ExecutePipeline(PipelineArgs pipelineArgs);")
            .blank()
            .line("Task<IContentPipelineModel?> ExecutePipelineAsync(IContentData? content, IContentPipelineContext pipelineContext);")
            .blank()
            .line("Task<IContentPipelineModel?> ExecutePipelineAsync(PipelineArgs pipelineArgs);")
            .close();
        w.finish()
    }
}
