//! Property classifier
//!
//! Maps one declared property to the type it exposes on the DTO and the
//! converter that produces it. Precedence is strict: the ignore marker, then
//! a converter override, then the declared-type table.

use crate::graph::{PropertyDeclaration, SemanticModel, TypeKind, render_argument};
use crate::markers::Markers;
use content_pipeline_core::{
    ContentProperty, ConverterConfig, ConverterId, Diagnostic, DiagnosticCode, DiagnosticSink,
    ExposedType, Location, WellKnownConverter,
};
use tracing::trace;

/// Generic converter contract every override converter must implement
pub const PROPERTY_CONVERTER_CONTRACT: &str = "IContentPropertyConverter";

/// Interface that makes a type embeddable content
pub const CONTENT_DATA_INTERFACE: &str = "IContentData";

/// Classifies properties against a semantic model
pub struct Classifier<'m> {
    model: &'m dyn SemanticModel,
}

struct Override {
    converter: ConverterId,
    exposed: ExposedType,
    config: Option<ConverterConfig>,
}

impl<'m> Classifier<'m> {
    pub fn new(model: &'m dyn SemanticModel) -> Self {
        Self { model }
    }

    /// Classify a property declared on `owner`
    ///
    /// Returns `None` only for ignored properties. A malformed override is
    /// reported to `sink` and the table decides instead.
    pub fn classify(
        &self,
        owner: &str,
        property: &PropertyDeclaration,
        sink: &mut dyn DiagnosticSink,
    ) -> Option<ContentProperty> {
        let markers = Markers::read(&property.attributes);

        if markers.is_ignored() {
            trace!(owner, property = %property.name, "ignored");
            return None;
        }

        if markers.converter_override.is_some() {
            match self.resolve_override(&markers) {
                Ok(found) => {
                    trace!(owner, property = %property.name, converter = %found.converter, "override");
                    return Some(
                        ContentProperty::converted(&property.name, found.exposed, found.converter)
                            .with_config(found.config),
                    );
                }
                Err(reason) => sink.report(Diagnostic::new(
                    DiagnosticCode::MalformedConverterOverride,
                    Location::member(owner, &property.name),
                    reason,
                )),
            }
        }

        let classified = self.classify_by_type(owner, property, markers.ui_hint().as_deref());
        trace!(
            owner,
            property = %classified.name,
            exposed = %classified.exposed_type,
            converter = %classified.converter,
            "classified"
        );
        Some(classified)
    }

    fn resolve_override(&self, markers: &Markers<'_>) -> Result<Override, String> {
        let converter = markers
            .converter_type()
            .ok_or_else(|| "converter marker does not name a converter type".to_string())?;

        let declaration = self
            .model
            .resolve_type(&converter.name)
            .ok_or_else(|| format!("converter type '{converter}' is not declared"))?;

        let contract = self
            .model
            .find_interface(&converter.name, PROPERTY_CONVERTER_CONTRACT)
            .filter(|contract| contract.type_arguments.len() == 2)
            .ok_or_else(|| {
                format!(
                    "converter type '{converter}' does not implement {PROPERTY_CONVERTER_CONTRACT}<TProperty, TValue>"
                )
            })?;

        let value_type = &contract.type_arguments[1];
        let exposed = ExposedType::new(value_type.without_nullable().to_string(), value_type.nullable);

        let converter = if converter.type_arguments.is_empty() {
            ConverterId::custom(declaration.fully_qualified_name())
        } else {
            ConverterId::custom(converter.without_nullable().to_string())
        };

        let config = markers
            .converter_override
            .filter(|attribute| !attribute.named_arguments.is_empty())
            .map(|attribute| {
                attribute
                    .named_arguments
                    .iter()
                    .map(|(key, value)| (key.clone(), render_argument(value)))
                    .collect::<ConverterConfig>()
            });

        Ok(Override {
            converter,
            exposed,
            config,
        })
    }

    fn classify_by_type(
        &self,
        owner: &str,
        property: &PropertyDeclaration,
        ui_hint: Option<&str>,
    ) -> ContentProperty {
        let declared = &property.ty;
        let nullable = property.is_nullable();
        let exposed = |name: &str| ExposedType::new(name, nullable);
        let well_known = |name: &str, converter: WellKnownConverter| {
            ContentProperty::converted(&property.name, exposed(name), ConverterId::well_known(converter))
        };
        let passthrough = || {
            ContentProperty::passthrough(&property.name, exposed(&declared.without_nullable().to_string()))
        };

        if !declared.type_arguments.is_empty() {
            return passthrough();
        }

        match (declared.simple_name(), ui_hint) {
            ("ContentReference", Some("mediafile" | "image")) => {
                well_known("Media", WellKnownConverter::Media)
            }
            ("ContentReference", Some("block")) => {
                well_known("IContentPipelineModel", WellKnownConverter::Block)
            }
            ("ContentReference" | "PageReference", _) => {
                well_known("Link", WellKnownConverter::ContentReference)
            }
            ("ContentArea", _) => {
                well_known("ContentAreaPipelineModel", WellKnownConverter::ContentArea)
            }
            ("XhtmlString", _) => well_known("string", WellKnownConverter::XhtmlString),
            ("Url", _) => well_known("Link", WellKnownConverter::Link),
            _ => {
                let scope = owner.rsplit_once('.').map_or("", |(namespace, _)| namespace);
                let resolved = self.model.resolve_type_in(&declared.name, scope);
                let lookup = resolved.map_or_else(|| declared.name.clone(), |decl| decl.fully_qualified_name());
                match resolved {
                    Some(decl) if decl.kind == TypeKind::Enum => ContentProperty::converted(
                        &property.name,
                        exposed("string"),
                        ConverterId::enumeration(decl.fully_qualified_name()),
                    ),
                    _ if self.model.implements(&lookup, CONTENT_DATA_INTERFACE) => {
                        well_known("IContentPipelineModel", WellKnownConverter::EmbeddedBlock)
                    }
                    _ => passthrough(),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "classify/classify_tests.rs"]
mod classify_tests;
