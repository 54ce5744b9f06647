#![allow(non_snake_case)]

use super::*;
use crate::content::{ContentArea, ContentReference, XhtmlString};
use serde_json::json;
use test_case::test_case;

#[test_case("Title", "title" ; "simple word")]
#[test_case("URLValue", "urlValue" ; "leading acronym")]
#[test_case("ID", "id" ; "all capitals")]
#[test_case("heroImage", "heroImage" ; "already camel")]
#[test_case("X", "x" ; "single letter")]
#[test_case("", "" ; "empty")]
fn camel_case___member_name___matches_web_defaults(input: &str, expected: &str) {
    assert_eq!(camel_case(input), expected);
}

#[test]
fn PipelineModel___serialize___writes_discriminant_first_and_omits_nulls() {
    let mut model = PipelineModel::new(ModelKind::Content("Awesome.ArticlePage".into()));
    model.set("Title", "Hello");
    model.set("Subtitle", PipelineValue::Null);
    model.set("HeroImage", Media::default());

    let json = model.to_json().unwrap();

    assert_eq!(
        json,
        r#"{"pipelineModelType":"Awesome.ArticlePage","title":"Hello","heroImage":{}}"#
    );
}

#[test]
fn PipelineModel___base___uses_base_discriminant() {
    let model = PipelineModel::base();

    assert_eq!(model.discriminant(), "ContentPipelineModel");
    assert_eq!(model.to_json_value().unwrap(), json!({ "pipelineModelType": "ContentPipelineModel" }));
}

#[test]
fn PipelineModel___set_twice___keeps_position_and_replaces_value() {
    let mut model = PipelineModel::base();
    model.set("A", "1");
    model.set("B", "2");
    model.set("A", "3");

    let names: Vec<_> = model.properties().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(model.get("A").and_then(PipelineValue::as_str), Some("3"));
}

#[test]
fn PipelineValue___nested_model___serializes_as_object() {
    let mut teaser = PipelineModel::new(ModelKind::Content("Common.Teaser".into()));
    teaser.set("Heading", "Hi");
    let mut page = PipelineModel::new(ModelKind::Content("Common.Page".into()));
    page.set("Teaser", teaser);
    page.set("Link", Link::new("/about/"));

    assert_eq!(
        page.to_json_value().unwrap(),
        json!({
            "pipelineModelType": "Common.Page",
            "teaser": { "pipelineModelType": "Common.Teaser", "heading": "Hi" },
            "link": { "url": "/about/" }
        })
    );
}

#[test]
fn Media___type_member___is_named_type() {
    let media = Media {
        url: Some("/globalassets/cat.jpg".into()),
        media_type: Some("ImageFile".into()),
        properties: None,
    };

    assert_eq!(
        serde_json::to_value(&media).unwrap(),
        json!({ "url": "/globalassets/cat.jpg", "type": "ImageFile" })
    );
}

#[test]
fn ContentAreaItemPipelineModel___display_option___is_camel_cased() {
    let item = ContentAreaItemPipelineModel {
        display_option: Some("wide".into()),
        content: Some(PipelineModel::base()),
    };

    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({ "displayOption": "wide", "content": { "pipelineModelType": "ContentPipelineModel" } })
    );
}

#[test]
fn PipelineValue___passthrough___copies_scalars_and_strings() {
    assert_eq!(PipelineValue::try_from(&ContentValue::Integer(4)).unwrap(), PipelineValue::Integer(4));
    assert_eq!(
        PipelineValue::try_from(&ContentValue::Enum("Red".into())).unwrap(),
        PipelineValue::String("Red".into())
    );
    assert_eq!(
        PipelineValue::try_from(&ContentValue::Xhtml(XhtmlString::new("<p/>"))).unwrap(),
        PipelineValue::String("<p/>".into())
    );
    assert_eq!(
        PipelineValue::try_from(&ContentValue::Reference(ContentReference::new(9))).unwrap(),
        PipelineValue::Json(json!(9))
    );
}

#[test]
fn PipelineValue___passthrough_area___copies_structure() {
    let value = ContentValue::Area(ContentArea::default());

    let copied = PipelineValue::try_from(&value).unwrap();

    assert_eq!(copied, PipelineValue::Json(json!({ "kind": "area", "value": { "items": [] } })));
}

#[test]
fn PipelineValue___passthrough_list___copies_each_element() {
    let value = ContentValue::List(vec![ContentValue::Integer(1), ContentValue::Null, "two".into()]);

    let copied = PipelineValue::try_from(&value).unwrap();

    assert_eq!(
        copied,
        PipelineValue::List(vec![PipelineValue::Integer(1), PipelineValue::Null, PipelineValue::String("two".into())])
    );
}
