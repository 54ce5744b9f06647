//! Attribute/metadata reader
//!
//! Picks the handful of markers the analyzer cares about out of an attribute
//! list. Unknown attributes are ignored; absence of a marker is not an error.

use crate::graph::{AttributeUsage, BaseChain, TypeRef};
use serde_json::Value;

pub const IGNORE_ATTRIBUTE: &str = "ContentPipelineIgnoreAttribute";
pub const UI_HINT_ATTRIBUTE: &str = "UIHintAttribute";
pub const PROPERTY_CONVERTER_ATTRIBUTE: &str = "ContentPipelinePropertyConverterAttribute";
pub const CONTENT_TYPE_ATTRIBUTE: &str = "ContentTypeAttribute";
pub const PIPELINE_MODEL_ATTRIBUTE: &str = "ContentPipelineModelAttribute";

/// Interface implemented by attributes that name a property converter
pub const PROPERTY_CONVERTER_MARKER_INTERFACE: &str = "IContentPipelinePropertyConverterAttribute";

/// The markers found on a single declaration
///
/// When a marker appears more than once, the last occurrence wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markers<'a> {
    pub ignore: Option<&'a AttributeUsage>,
    pub ui_hint: Option<&'a AttributeUsage>,
    pub converter_override: Option<&'a AttributeUsage>,
    pub content_type: Option<&'a AttributeUsage>,
    pub grouping: Option<&'a AttributeUsage>,
}

impl<'a> Markers<'a> {
    /// Read markers from an attribute list
    pub fn read(attributes: &'a [AttributeUsage]) -> Self {
        let mut markers = Markers::default();
        for attribute in attributes {
            if attribute.is(IGNORE_ATTRIBUTE) {
                markers.ignore = Some(attribute);
            } else if attribute.is(UI_HINT_ATTRIBUTE) {
                markers.ui_hint = Some(attribute);
            } else if attribute.is(PROPERTY_CONVERTER_ATTRIBUTE)
                || attribute
                    .interface(PROPERTY_CONVERTER_MARKER_INTERFACE)
                    .is_some()
            {
                markers.converter_override = Some(attribute);
            } else if attribute.is(CONTENT_TYPE_ATTRIBUTE) {
                markers.content_type = Some(attribute);
            } else if attribute.is(PIPELINE_MODEL_ATTRIBUTE) {
                markers.grouping = Some(attribute);
            }
        }
        markers
    }

    pub fn is_ignored(&self) -> bool {
        self.ignore.is_some()
    }

    /// The UI hint string, lower-cased
    pub fn ui_hint(&self) -> Option<String> {
        self.ui_hint
            .and_then(|hint| hint.argument(0, "UIHint"))
            .and_then(Value::as_str)
            .map(str::to_ascii_lowercase)
    }

    /// The converter type named by the override marker, if it names one
    pub fn converter_type(&self) -> Option<&'a TypeRef> {
        let attribute = self.converter_override?;
        attribute
            .interface(PROPERTY_CONVERTER_MARKER_INTERFACE)
            .and_then(|marker| marker.type_arguments.first())
            .or_else(|| attribute.type_arguments.first())
    }
}

/// Markers in effect for a class once inheritance is applied
///
/// Built once per class from its base chain; queries never walk the chain
/// again. Only the grouping marker is inherited.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveMarkers<'a> {
    pub own: Markers<'a>,
    pub grouping: Option<&'a AttributeUsage>,
    /// Fully-qualified name of the type the grouping marker was found on
    pub grouping_source: Option<&'a str>,
}

impl<'a> EffectiveMarkers<'a> {
    pub fn for_class(chain: &BaseChain<'a>) -> Self {
        let own = chain
            .types
            .first()
            .copied()
            .map(|decl| Markers::read(&decl.attributes))
            .unwrap_or_default();

        let inherited = chain.types.iter().copied().find_map(|decl| {
            Markers::read(&decl.attributes)
                .grouping
                .map(|grouping| (grouping, decl.name.as_str()))
        });

        Self {
            own,
            grouping: inherited.map(|(grouping, _)| grouping),
            grouping_source: inherited.map(|(_, source)| source),
        }
    }

    pub fn has_grouping(&self) -> bool {
        self.grouping.is_some()
    }

    pub fn content_type(&self) -> Option<&'a AttributeUsage> {
        self.own.content_type
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::graph::{DeclarationGraph, SemanticModel, TypeDeclaration};

    #[test]
    fn Markers___read___finds_known_markers_and_skips_unknown() {
        let attributes = vec![
            AttributeUsage::new("Display").with_named_argument("Order", 10),
            AttributeUsage::new("UIHint").with_constructor_argument("Image"),
            AttributeUsage::new("ContentPipelineIgnore"),
        ];

        let markers = Markers::read(&attributes);

        assert!(markers.is_ignored());
        assert_eq!(markers.ui_hint().as_deref(), Some("image"));
        assert!(markers.converter_override.is_none());
        assert!(markers.grouping.is_none());
    }

    #[test]
    fn Markers___read___last_occurrence_wins() {
        let attributes = vec![
            AttributeUsage::new("UIHint").with_constructor_argument("block"),
            AttributeUsage::new("UIHint").with_constructor_argument("mediafile"),
        ];

        let markers = Markers::read(&attributes);

        assert_eq!(markers.ui_hint().as_deref(), Some("mediafile"));
    }

    #[test]
    fn Markers___converter_type___from_generic_override_attribute() {
        let attributes = vec![
            AttributeUsage::new("ContentPipelinePropertyConverter")
                .with_type_argument(TypeRef::named("Site.CustomConverter")),
        ];

        let markers = Markers::read(&attributes);

        assert_eq!(
            markers.converter_type().map(|t| t.name.as_str()),
            Some("Site.CustomConverter")
        );
    }

    #[test]
    fn Markers___converter_type___from_custom_attribute_marker_interface() {
        let attributes = vec![
            AttributeUsage::new("Datasource")
                .with_type_argument(TypeRef::named("Site.DatasourceConverter"))
                .with_named_argument("DatasourceName", "news")
                .with_interface(
                    TypeRef::named(PROPERTY_CONVERTER_MARKER_INTERFACE)
                        .with_arguments(vec![TypeRef::named("Site.DatasourceConverter")]),
                ),
        ];

        let markers = Markers::read(&attributes);

        assert!(markers.converter_override.is_some());
        assert_eq!(
            markers.converter_type().map(|t| t.name.as_str()),
            Some("Site.DatasourceConverter")
        );
    }

    #[test]
    fn Markers___converter_type___none_without_type_argument() {
        let attributes = vec![AttributeUsage::new("ContentPipelinePropertyConverterAttribute")];

        let markers = Markers::read(&attributes);

        assert!(markers.converter_override.is_some());
        assert!(markers.converter_type().is_none());
    }

    #[test]
    fn EffectiveMarkers___for_class___inherits_grouping_from_base() {
        let graph = DeclarationGraph::new(vec![
            TypeDeclaration::class("Site", "ImageBase")
                .with_base("ImageData")
                .with_attribute(AttributeUsage::new("ContentPipelineModel").with_constructor_argument("Media")),
            TypeDeclaration::class("Site", "Jpg")
                .with_base("ImageBase")
                .with_attribute(AttributeUsage::new("ContentType").with_named_argument("GUID", "x")),
        ]);
        let jpg = graph.resolve_type("Jpg").unwrap();
        let chain = graph.base_chain(jpg);

        let markers = EffectiveMarkers::for_class(&chain);

        assert!(markers.has_grouping());
        assert_eq!(markers.grouping_source, Some("ImageBase"));
        assert!(markers.own.grouping.is_none());
        assert!(markers.content_type().is_some());
    }

    #[test]
    fn EffectiveMarkers___for_class___own_grouping_shadows_base() {
        let graph = DeclarationGraph::new(vec![
            TypeDeclaration::class("Site", "Base")
                .with_attribute(AttributeUsage::new("ContentPipelineModel").with_constructor_argument("Base")),
            TypeDeclaration::class("Site", "Leaf")
                .with_base("Base")
                .with_attribute(AttributeUsage::new("ContentPipelineModel").with_constructor_argument("Leaf")),
        ]);
        let leaf = graph.resolve_type("Leaf").unwrap();
        let chain = graph.base_chain(leaf);

        let markers = EffectiveMarkers::for_class(&chain);

        assert_eq!(markers.grouping_source, Some("Leaf"));
    }

    #[test]
    fn EffectiveMarkers___for_class___no_grouping_anywhere() {
        let graph = DeclarationGraph::new(vec![TypeDeclaration::class("Site", "Plain").with_base("PageData")]);
        let plain = graph.resolve_type("Plain").unwrap();
        let chain = graph.base_chain(plain);

        let markers = EffectiveMarkers::for_class(&chain);

        assert!(!markers.has_grouping());
    }
}
