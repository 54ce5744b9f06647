#![allow(non_snake_case)]

use super::*;
use crate::graph::{AttributeUsage, DeclarationGraph, TypeDeclaration, TypeRef};
use content_pipeline_core::{Diagnostics, Severity};
use test_case::test_case;

fn graph() -> DeclarationGraph {
    DeclarationGraph::new(vec![
        TypeDeclaration::enumeration("Site.Enums", "ColorEnum"),
        TypeDeclaration::class("Site.Blocks", "TeaserBlock").with_base("BlockData"),
        TypeDeclaration::class("Site.Converters", "CustomConverter").with_interface(
            TypeRef::parse("IContentPropertyConverter<XhtmlString?, bool>").unwrap(),
        ),
        TypeDeclaration::class("Site.Converters", "DatasourceConverter").with_interface(
            TypeRef::parse("IContentPropertyConverter<Site.Datasource?, Site.Datasource?>").unwrap(),
        ),
        TypeDeclaration::class("Site.Converters", "HalfConverter")
            .with_interface(TypeRef::parse("IContentPropertyConverter").unwrap()),
    ])
}

fn property(name: &str, ty: &str) -> PropertyDeclaration {
    PropertyDeclaration::new(name, TypeRef::parse(ty).unwrap())
}

fn ui_hint(value: &str) -> AttributeUsage {
    AttributeUsage::new("UIHint").with_constructor_argument(value)
}

fn classify(property: &PropertyDeclaration) -> (Option<ContentProperty>, Diagnostics) {
    let graph = graph();
    let mut sink = Diagnostics::new();
    let classified = Classifier::new(&graph).classify("Site.Pages.StartPage", property, &mut sink);
    (classified, sink)
}

#[test_case("ContentReference", None, "Link", "IContentReferenceConverter" ; "content reference")]
#[test_case("ContentReference", Some("image"), "Media", "IMediaConverter" ; "content reference image")]
#[test_case("ContentReference", Some("mediafile"), "Media", "IMediaConverter" ; "content reference mediafile")]
#[test_case("ContentReference", Some("block"), "IContentPipelineModel", "IBlockConverter" ; "content reference block")]
#[test_case("ContentReference", Some("other"), "Link", "IContentReferenceConverter" ; "content reference other hint")]
#[test_case("PageReference", Some("image"), "Link", "IContentReferenceConverter" ; "page reference ignores hint")]
#[test_case("ContentArea", None, "ContentAreaPipelineModel", "IContentAreaConverter" ; "content area")]
#[test_case("XhtmlString", None, "string", "IXhtmlStringConverter" ; "xhtml")]
#[test_case("EPiServer.Url", None, "Link", "ILinkConverter" ; "url")]
#[test_case("ColorEnum", None, "string", "IEnumConverter<Site.Enums.ColorEnum>" ; "enum")]
#[test_case("TeaserBlock", None, "IContentPipelineModel", "IEmbeddedBlockConverter" ; "embedded block")]
#[test_case("string", None, "string", "None" ; "string passthrough")]
#[test_case("bool", None, "bool", "None" ; "bool passthrough")]
#[test_case("IList<string>", None, "IList<string>", "None" ; "generic collection passthrough")]
#[test_case("IList<ContentReference>", None, "IList<ContentReference>", "None" ; "generic of mapped type passthrough")]
fn Classifier___classify___table_rows(ty: &str, hint: Option<&str>, exposed: &str, converter: &str) {
    let mut declared = property("Prop", ty);
    if let Some(hint) = hint {
        declared = declared.with_attribute(ui_hint(hint));
    }

    let (classified, diagnostics) = classify(&declared);

    let classified = classified.unwrap();
    assert_eq!(classified.exposed_type.name, exposed);
    assert_eq!(classified.converter.to_string(), converter);
    assert!(!classified.exposed_type.nullable);
    assert!(diagnostics.is_empty());
}

#[test_case("string?", true ; "nullable marker")]
#[test_case("string", false ; "non nullable")]
#[test_case("XhtmlString?", true ; "nullable converted")]
#[test_case("ContentArea", false ; "non nullable converted")]
fn Classifier___classify___propagates_nullability(ty: &str, nullable: bool) {
    let (classified, _) = classify(&property("Prop", ty));

    assert_eq!(classified.unwrap().exposed_type.nullable, nullable);
}

#[test]
fn Classifier___classify___nullable_flag_counts_like_marker() {
    let declared = property("Title", "string").with_nullable(true);

    let (classified, _) = classify(&declared);

    assert_eq!(classified.unwrap().exposed_type.to_string(), "string?");
}

#[test]
fn Classifier___classify___ignored_property_yields_nothing() {
    let declared = property("Secret", "ContentReference")
        .with_attribute(AttributeUsage::new("ContentPipelineIgnore"))
        .with_attribute(ui_hint("image"));

    let (classified, diagnostics) = classify(&declared);

    assert!(classified.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn Classifier___classify___override_beats_ui_hint_table() {
    let declared = property("CustomMapping", "XhtmlString?")
        .with_attribute(ui_hint("image"))
        .with_attribute(
            AttributeUsage::new("ContentPipelinePropertyConverter")
                .with_type_argument(TypeRef::named("CustomConverter")),
        );

    let (classified, diagnostics) = classify(&declared);

    let classified = classified.unwrap();
    assert_eq!(classified.converter, ConverterId::custom("Site.Converters.CustomConverter"));
    assert_eq!(classified.exposed_type.to_string(), "bool");
    assert!(classified.converter_config.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn Classifier___classify___custom_attribute_carries_config() {
    let declared = property("Source", "Site.Datasource?").with_attribute(
        AttributeUsage::new("Datasource")
            .with_named_argument("DatasourceName", "news")
            .with_named_argument("Order", 3)
            .with_interface(
                TypeRef::named("IContentPipelinePropertyConverterAttribute")
                    .with_arguments(vec![TypeRef::named("Site.Converters.DatasourceConverter")]),
            ),
    );

    let (classified, _) = classify(&declared);

    let classified = classified.unwrap();
    assert_eq!(classified.exposed_type.to_string(), "Site.Datasource?");
    let config = classified.converter_config.unwrap();
    assert_eq!(config.get("DatasourceName").map(String::as_str), Some("news"));
    assert_eq!(config.get("Order").map(String::as_str), Some("3"));
}

#[test_case(AttributeUsage::new("ContentPipelinePropertyConverter") ; "no type argument")]
#[test_case(AttributeUsage::new("ContentPipelinePropertyConverter").with_type_argument(TypeRef::named("Missing")) ; "undeclared converter")]
#[test_case(AttributeUsage::new("ContentPipelinePropertyConverter").with_type_argument(TypeRef::named("HalfConverter")) ; "no two argument contract")]
fn Classifier___classify___malformed_override_warns_and_falls_back(marker: AttributeUsage) {
    let declared = property("Body", "XhtmlString").with_attribute(marker);

    let (classified, diagnostics) = classify(&declared);

    let classified = classified.unwrap();
    assert_eq!(classified.converter, ConverterId::well_known(WellKnownConverter::XhtmlString));
    let reported: Vec<_> = diagnostics.iter().collect();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].code, DiagnosticCode::MalformedConverterOverride);
    assert_eq!(reported[0].severity, Severity::Warning);
    assert_eq!(reported[0].location.to_string(), "Site.Pages.StartPage::Body");
}

#[test]
fn Classifier___classify___unknown_type_is_passthrough() {
    let (classified, _) = classify(&property("Data", "Some.Unknown.Type"));

    let classified = classified.unwrap();
    assert!(classified.converter.is_none());
    assert_eq!(classified.exposed_type.name, "Some.Unknown.Type");
}

#[test]
fn Classifier___classify___enum_resolves_in_owner_namespace() {
    let graph = DeclarationGraph::new(vec![
        TypeDeclaration::enumeration("Vendor", "ColorEnum"),
        TypeDeclaration::enumeration("Site.Pages", "ColorEnum"),
    ]);
    let mut sink = Diagnostics::new();

    let classified = Classifier::new(&graph)
        .classify("Site.Pages.StartPage", &property("Color", "ColorEnum"), &mut sink)
        .unwrap();

    assert_eq!(classified.converter, ConverterId::enumeration("Site.Pages.ColorEnum"));
}
