#![allow(non_snake_case)]

use super::*;
use content_pipeline_core::{
    ContentProperty, ConverterConfig, ConverterId, ExposedType, GenerateError, StableId,
    WellKnownConverter,
};

fn class(group: &str, name: &str, id: &str, properties: Vec<ContentProperty>) -> ContentClass {
    ContentClass {
        name: name.into(),
        stable_id: StableId::parse(id).unwrap(),
        group: group.into(),
        order: 0,
        fully_qualified_name: format!("Site.Models.{name}"),
        properties,
    }
}

fn content_page() -> ContentClass {
    class(
        "Awesome",
        "ContentPage",
        "308068d7-e9b1-4958-b13b-bc612707cb85",
        vec![
            ContentProperty::passthrough("Title", ExposedType::new("string", true)),
            ContentProperty::converted(
                "Photo",
                ExposedType::new("Media", true),
                ConverterId::well_known(WellKnownConverter::Media),
            ),
            ContentProperty::converted(
                "Body",
                ExposedType::new("string", false),
                ConverterId::well_known(WellKnownConverter::XhtmlString),
            ),
            ContentProperty::converted(
                "Color",
                ExposedType::new("string", false),
                ConverterId::enumeration("Site.Models.ColorEnum"),
            ),
        ],
    )
}

fn content_block() -> ContentClass {
    class(
        "Common",
        "ContentBlock",
        "a446798f-e7f5-4f83-a9a2-b72047c7eaa1",
        vec![ContentProperty::passthrough("Heading", ExposedType::new("string", true))],
    )
}

fn emitter() -> Emitter {
    Emitter::new(GeneratorOptions::default(), CancellationToken::new())
}

fn source<'a>(artifacts: &'a [CodeArtifact], file_name: &str) -> &'a str {
    artifacts
        .iter()
        .find(|a| a.file_name == file_name)
        .map(|a| a.source.as_str())
        .unwrap_or_else(|| panic!("missing artifact {file_name}"))
}

#[test]
fn Emitter___emit_all___names_per_class_artifacts_by_group_name_and_id() {
    let artifacts = emitter().emit_all(&[content_block(), content_page()]).unwrap();

    let per_class: Vec<_> = artifacts
        .iter()
        .filter(|a| matches!(a.kind, ArtifactKind::Model | ArtifactKind::Step))
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(
        per_class,
        vec![
            "Common_ContentBlock_PipelineModel_a446798f.g.cs",
            "Common_ContentBlock_PipelineStep_a446798f.g.cs",
            "Awesome_ContentPage_PipelineModel_308068d7.g.cs",
            "Awesome_ContentPage_PipelineStep_308068d7.g.cs",
        ]
    );
}

#[test]
fn Emitter___emit_all___file_names_are_unique() {
    let artifacts = emitter().emit_all(&[content_block(), content_page()]).unwrap();

    let mut names: Vec<_> = artifacts.iter().map(|a| a.file_name.clone()).collect();
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test]
fn Emitter___emit_all___is_deterministic() {
    let classes = [content_page(), content_block()];

    let first = emitter().emit_all(&classes).unwrap();
    let second = emitter().emit_all(&classes).unwrap();

    assert_eq!(first, second);
}

#[test]
fn Emitter___emit_all___cancelled_token_aborts() {
    let token = CancellationToken::new();
    token.cancel();

    let result = Emitter::new(GeneratorOptions::default(), token).emit_all(&[content_block()]);

    assert!(matches!(result, Err(GenerateError::Cancelled)));
}

#[test]
fn Emitter___emit_all___one_group_interface_per_distinct_group() {
    let mut second_block = content_block();
    second_block.name = "OtherBlock".into();
    second_block.fully_qualified_name = "Site.Models.OtherBlock".into();

    let artifacts = emitter()
        .emit_all(&[content_page(), content_block(), second_block])
        .unwrap();

    let groups: Vec<_> = artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::GroupInterface)
        .map(|a| a.file_name.as_str())
        .collect();
    assert_eq!(
        groups,
        vec!["IAwesomePipelineModel.g.cs", "ICommonPipelineModel.g.cs"]
    );
}

#[test]
fn Emitter___pipeline_model___every_property_is_settable() {
    let code = emitter().pipeline_model(&content_page());

    assert!(code.contains("namespace ContentPipeline.Models.Awesome;"));
    assert!(code.contains(
        "public partial class ContentPagePipelineModel : global::ContentPipeline.Models.ContentPipelineModel, IAwesomePipelineModel"
    ));
    assert!(code.contains("public override string PipelineModelType => \"Awesome.ContentPage\";"));
    assert!(code.contains("public string? Title { get; set; }"));
    assert!(code.contains("public Media? Photo { get; set; }"));
    assert!(code.contains("public string Body { get; set; }"));
    assert_eq!(code.matches("{ get; set; }").count(), 4);
}

#[test]
fn Emitter___pipeline_step___injects_each_converter_once() {
    let mut page = content_page();
    page.properties.push(ContentProperty::converted(
        "Thumbnail",
        ExposedType::new("Media", true),
        ConverterId::well_known(WellKnownConverter::Media),
    ));

    let code = emitter().pipeline_step(&page);

    assert!(code.contains("namespace ContentPipeline.Pipelines.Awesome.Steps;"));
    assert_eq!(code.matches("private readonly IMediaConverter _mediaConverter;").count(), 1);
    assert!(code.contains(
        "public ContentPagePipelineStep(IMediaConverter mediaConverter, IXhtmlStringConverter xhtmlStringConverter, IEnumConverter<global::Site.Models.ColorEnum> colorEnumEnumConverter)"
    ));
    assert!(code.contains(": base(order: 1000)"));
}

#[test]
fn Emitter___pipeline_step___copies_passthrough_and_converts_the_rest() {
    let code = emitter().pipeline_step(&content_page());

    assert!(code.contains("contentPipelineModel.Title = content.Title;"));
    assert!(code.contains(
        "contentPipelineModel.Photo = _mediaConverter.GetValue(content.Photo, content, nameof(content.Photo), pipelineContext);"
    ));
    assert!(code.contains(
        "contentPipelineModel.Color = _colorEnumEnumConverter.GetValue(content.Color, content, nameof(content.Color), pipelineContext);"
    ));
}

#[test]
fn Emitter___pipeline_step___nullable_enum_is_unwrapped_before_conversion() {
    let owner = class(
        "Common",
        "Teaser",
        "a446798f-e7f5-4f83-a9a2-b72047c7eaa2",
        vec![ContentProperty::converted(
            "Color",
            ExposedType::new("string", true),
            ConverterId::enumeration("Site.Models.ColorEnum"),
        )],
    );

    let code = emitter().pipeline_step(&owner);

    assert!(code.contains("content.Color.HasValue ? _colorEnumEnumConverter.GetValue(content.Color.Value,"));
}

#[test]
fn Emitter___pipeline_step___configured_property_gets_static_dictionary() {
    let mut config = ConverterConfig::new();
    config.insert("Format".into(), "short".into());
    config.insert("Enabled".into(), "True".into());
    let owner = class(
        "Common",
        "Teaser",
        "a446798f-e7f5-4f83-a9a2-b72047c7eaa2",
        vec![
            ContentProperty::converted(
                "Flag",
                ExposedType::new("bool", false),
                ConverterId::custom("Site.Converters.CustomConverter"),
            )
            .with_config(Some(config)),
        ],
    );

    let code = emitter().pipeline_step(&owner);

    assert!(code.contains("private static readonly Dictionary<string, string> FlagConfig = new()"));
    assert!(code.contains("[\"Enabled\"] = \"True\","));
    assert!(code.contains("[\"Format\"] = \"short\","));
    assert!(code.contains("nameof(content.Flag), pipelineContext, FlagConfig);"));
    assert!(code.contains("private readonly global::Site.Converters.CustomConverter _customConverter;"));
}

#[test]
fn Emitter___services___dispatches_every_class_and_defaults_to_base_model() {
    let artifacts = emitter().emit_all(&[content_block(), content_page()]).unwrap();
    let code = source(&artifacts, "ContentPipelineService.g.cs");

    assert!(code.contains("if (contentType == typeof(global::Site.Models.ContentBlock))"));
    assert!(code.contains(
        "return _commona446798fContentBlock.Run((global::Site.Models.ContentBlock)content, pipelineContext);"
    ));
    assert!(code.contains(
        "IContentPipeline<global::Site.Models.ContentPage, global::ContentPipeline.Models.Awesome.ContentPagePipelineModel> awesome308068d7ContentPage)"
    ));
    assert!(code.contains("return new ContentPipelineModel();"));
}

#[test]
fn Emitter___services___without_classes_has_parameterless_constructor() {
    let artifacts = emitter().emit_all(&[]).unwrap();
    let code = source(&artifacts, "ContentPipelineService.g.cs");

    assert!(code.contains("public ContentPipelineService()"));
    assert!(!code.contains("contentType"));
}

#[test]
fn Emitter___json_converter___switches_on_discriminant_with_fallback() {
    let artifacts = emitter().emit_all(&[content_block(), content_page()]).unwrap();
    let code = source(&artifacts, "ContentPipelineModelJsonConverter.g.cs");

    assert!(code.contains("switch (value.PipelineModelType)"));
    assert!(code.contains("case \"Common.ContentBlock\":"));
    assert!(code.contains(
        "JsonSerializer.Serialize(writer, (global::ContentPipeline.Models.Awesome.ContentPagePipelineModel)value, options);"
    ));
    assert!(code.contains("default:"));
    assert!(code.contains("DefaultIgnoreCondition = JsonIgnoreCondition.WhenWritingNull,"));
}

#[test]
fn Emitter___json_converter___repeated_discriminant_keeps_one_case() {
    let mut twin = content_block();
    twin.stable_id = StableId::derive("Site.Other.ContentBlock");
    twin.fully_qualified_name = "Site.Other.ContentBlock".into();

    let artifacts = emitter().emit_all(&[content_block(), twin]).unwrap();
    let code = source(&artifacts, "ContentPipelineModelJsonConverter.g.cs");

    assert_eq!(code.matches("case \"Common.ContentBlock\":").count(), 1);
}

#[test]
fn Emitter___link_json_converter___has_default_branch_only() {
    let artifacts = emitter().emit_all(&[content_block()]).unwrap();
    let code = source(&artifacts, "LinkPipelineModelJsonConverter.g.cs");

    assert!(code.contains("JsonConverter<ILinkPipelineModel>"));
    assert!(!code.contains("switch"));
}

#[test]
fn Emitter___registrations___one_step_per_class_in_order() {
    let artifacts = emitter().emit_all(&[content_block(), content_page()]).unwrap();
    let code = source(&artifacts, "PipelineStepsServiceCollectionExtensions.g.cs");

    let block = code
        .find("global::ContentPipeline.Pipelines.Common.Steps.ContentBlockPipelineStep")
        .unwrap();
    let page = code
        .find("global::ContentPipeline.Pipelines.Awesome.Steps.ContentPagePipelineStep")
        .unwrap();
    assert!(block < page);
    assert_eq!(code.matches(".AddSingleton<IContentPipelineStep<").count(), 2);
}

#[test]
fn Emitter___registrations___registers_every_default_converter() {
    let artifacts = emitter().emit_all(&[]).unwrap();
    let code = source(&artifacts, "ContentPipelineServiceCollectionExtensions.g.cs");

    for converter in WellKnownConverter::ALL {
        let line = format!(
            ".AddSingleton<{}, {}>()",
            converter.contract_name(),
            converter.implementation_name()
        );
        assert!(code.contains(&line), "missing {line}");
    }
    assert!(code.contains("typeof(IEnumConverter<>), typeof(EnumConverter<>)"));
    assert!(code.contains("typeof(IContentPipeline<,>), typeof(DefaultContentPipeline<,>)"));
}

#[test]
fn Emitter___custom_namespace___flows_into_every_artifact() {
    let options = GeneratorOptions::default().with_shared_namespace("Acme.Cms");
    let artifacts = Emitter::new(options, CancellationToken::new())
        .emit_all(&[content_block()])
        .unwrap();

    for artifact in &artifacts {
        assert!(
            artifact.source.contains("namespace Acme.Cms."),
            "{} ignores the shared namespace",
            artifact.file_name
        );
    }
}

#[test]
fn Emitter___every_artifact___starts_with_nullable_context() {
    let artifacts = emitter().emit_all(&[content_page()]).unwrap();

    for artifact in &artifacts {
        assert!(artifact.source.starts_with("// <auto-generated/>\n#nullable enable\n"));
    }
}

#[test]
fn Emitter___converters___content_area_skips_unresolvable_items() {
    let artifacts = emitter().emit_all(&[]).unwrap();
    let code = source(&artifacts, "ContentAreaConverter.g.cs");

    assert!(code.contains("foreach (var item in property.FilteredItems)"));
    assert!(code.contains("continue;"));
}

#[test]
fn Emitter___converters___media_falls_back_to_empty_instance() {
    let artifacts = emitter().emit_all(&[]).unwrap();
    let code = source(&artifacts, "MediaConverter.g.cs");

    assert_eq!(code.matches("return new Media();").count(), 2);
    assert!(code.contains("public MediaConverter(IUrlResolver urlResolver, IContentLoader contentLoader)"));
}

#[test]
fn Emitter___converters___link_falls_back_to_raw_url_when_routed_url_is_empty() {
    let artifacts = emitter().emit_all(&[]).unwrap();
    let code = source(&artifacts, "LinkConverter.g.cs");

    assert!(code.contains("var url = _urlResolver.GetUrl(content.ContentLink, pipelineContext.Language?.Name);"));
    assert!(code.contains("if (string.IsNullOrEmpty(url))"));
    assert!(code.contains("url = property.ToString();"));
    assert!(code.contains("return new Link { Url = url };"));
}
