//! Default converter implementations

use super::interfaces::contract_types;
use super::writer::SourceWriter;
use super::{Emitter, SharedSource};
use content_pipeline_core::{ArtifactKind, WellKnownConverter};

/// Constructor dependencies of each default converter
fn dependencies(converter: WellKnownConverter) -> &'static [(&'static str, &'static str)] {
    match converter {
        WellKnownConverter::Block | WellKnownConverter::ContentArea => {
            &[("IContentLoader", "contentLoader")]
        }
        WellKnownConverter::ContentReference | WellKnownConverter::Link => {
            &[("IUrlResolver", "urlResolver")]
        }
        WellKnownConverter::Media => &[("IUrlResolver", "urlResolver"), ("IContentLoader", "contentLoader")],
        WellKnownConverter::XhtmlString => &[("IXhtmlRenderService", "xhtmlRenderService")],
        WellKnownConverter::EmbeddedBlock => &[],
    }
}

/// Body of `GetValue` for each default converter
fn body(converter: WellKnownConverter) -> &'static [&'static str] {
    match converter {
        WellKnownConverter::Block => &[
            "if (ContentReference.IsNullOrEmpty(property))",
            "    return null;",
            "",
            "if (!_contentLoader.TryGet<IContentData>(property, Language(pipelineContext), out var block))",
            "    return null;",
            "",
            "return pipelineContext.ContentPipelineService.ExecutePipeline(block, pipelineContext);",
        ],
        WellKnownConverter::EmbeddedBlock => &[
            "if (property is null)",
            "    return null;",
            "",
            "return pipelineContext.ContentPipelineService.ExecutePipeline(property, pipelineContext);",
        ],
        WellKnownConverter::ContentReference => &[
            "if (ContentReference.IsNullOrEmpty(property))",
            "    return new Link();",
            "",
            "return new Link { Url = _urlResolver.GetUrl(property, pipelineContext.Language?.Name) };",
        ],
        WellKnownConverter::ContentArea => &[
            "if (property is null)",
            "    return null;",
            "",
            "var items = new List<ContentAreaItemPipelineModel>();",
            "foreach (var item in property.FilteredItems)",
            "{",
            "    if (!_contentLoader.TryGet<IContentData>(item.ContentLink, Language(pipelineContext), out var itemContent))",
            "        continue;",
            "",
            "    items.Add(new ContentAreaItemPipelineModel",
            "    {",
            "        DisplayOption = item.RenderSettings.TryGetValue(\"data-epi-content-display-option\", out var option) ? option?.ToString() : null,",
            "        Content = pipelineContext.ContentPipelineService.ExecutePipeline(itemContent, pipelineContext),",
            "    });",
            "}",
            "",
            "return new ContentAreaPipelineModel { Items = items };",
        ],
        WellKnownConverter::Link => &[
            "if (property is null)",
            "    return new Link();",
            "",
            "if (!property.IsAbsoluteUri)",
            "{",
            "    var content = _urlResolver.Route(new UrlBuilder(property.OriginalString));",
            "    if (content is not null && !ContentReference.IsNullOrEmpty(content.ContentLink))",
            "    {",
            "        var url = _urlResolver.GetUrl(content.ContentLink, pipelineContext.Language?.Name);",
            "        if (string.IsNullOrEmpty(url))",
            "            url = property.ToString();",
            "",
            "        return new Link { Url = url };",
            "    }",
            "}",
            "",
            "return new Link { Url = property.ToString() };",
        ],
        WellKnownConverter::Media => &[
            "if (ContentReference.IsNullOrEmpty(property))",
            "    return new Media();",
            "",
            "if (!_contentLoader.TryGet<IContentData>(property, Language(pipelineContext), out var media))",
            "    return new Media();",
            "",
            "return new Media",
            "{",
            "    Url = _urlResolver.GetUrl(property, pipelineContext.Language?.Name),",
            "    Type = media.GetOriginalType().Name,",
            "    Properties = pipelineContext.ContentPipelineService.ExecutePipeline(media, pipelineContext),",
            "};",
        ],
        WellKnownConverter::XhtmlString => &[
            "return _xhtmlRenderService.RenderXhtmlString(pipelineContext.HttpContext, property);",
        ],
    }
}

/// `contentLoader` becomes `_contentLoader`
fn field_name(parameter: &str) -> String {
    format!("_{parameter}")
}

impl Emitter {
    pub(super) fn converters(&self) -> Vec<SharedSource> {
        let mut sources = vec![SharedSource::new(
            "EnumConverter",
            ArtifactKind::Converter,
            self.enum_converter(),
        )];
        for converter in WellKnownConverter::ALL {
            sources.push(SharedSource::new(
                converter.implementation_name(),
                ArtifactKind::Converter,
                self.well_known_converter(converter),
            ));
        }
        sources
    }

    fn converter_file(&self) -> SourceWriter {
        let interfaces = self.ns("Interfaces");
        let properties = self.ns("Properties");
        let mut w = SourceWriter::file();
        w.usings(&[
            "System",
            "System.Collections.Generic",
            "System.Globalization",
            "EPiServer",
            "EPiServer.Core",
            "EPiServer.Web.Routing",
            interfaces.as_str(),
            properties.as_str(),
        ])
        .blank()
        .namespace(&self.ns("Converters"));
        w
    }

    fn enum_converter(&self) -> String {
        let mut w = self.converter_file();
        w.summary("Maps an enum value to its canonical name")
            .line("public class EnumConverter<TEnum> : IEnumConverter<TEnum>")
            .indent()
            .line("where TEnum : Enum")
            .dedent()
            .open("")
            .line("public string? GetValue(")
            .indent()
            .line("TEnum property,")
            .line("IContentData content,")
            .line("string propertyName,")
            .line("IContentPipelineContext pipelineContext,")
            .line("Dictionary<string, string>? config = null)")
            .dedent()
            .open("")
            .line("return property.ToString();")
            .close()
            .close();
        w.finish()
    }

    fn well_known_converter(&self, converter: WellKnownConverter) -> String {
        let name = converter.implementation_name();
        let (property_type, value_type) = contract_types(converter);
        let dependencies = dependencies(converter);
        let loads_content = dependencies.iter().any(|(ty, _)| *ty == "IContentLoader");

        let mut w = self.converter_file();
        w.open(&format!("public class {name} : {}", converter.contract_name()));

        for (ty, parameter) in dependencies {
            w.line(&format!("private readonly {ty} {};", field_name(parameter)));
        }
        if !dependencies.is_empty() {
            let parameters = dependencies
                .iter()
                .map(|(ty, parameter)| format!("{ty} {parameter}"))
                .collect::<Vec<_>>()
                .join(", ");
            w.blank().open(&format!("public {name}({parameters})"));
            for (_, parameter) in dependencies {
                w.line(&format!("{} = {parameter};", field_name(parameter)));
            }
            w.close().blank();
        }

        w.line(&format!("public {value_type} GetValue("))
            .indent()
            .line(&format!("{property_type} property,"))
            .line("IContentData content,")
            .line("string propertyName,")
            .line("IContentPipelineContext pipelineContext,")
            .line("Dictionary<string, string>? config = null)")
            .dedent()
            .open("")
            .lines(body(converter))
            .close();

        if loads_content {
            w.blank()
                .line("private static CultureInfo Language(IContentPipelineContext pipelineContext) =>")
                .indent()
                .line("pipelineContext.Language ?? CultureInfo.InvariantCulture;")
                .dedent();
        }

        w.close();
        w.finish()
    }
}
