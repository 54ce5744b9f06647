//! Resolved analysis model
//!
//! These types are rebuilt from scratch on every run and never mutated after
//! construction. Classification and resolution are pure functions of the
//! declaration graph; emission is a pure function of these types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Static configuration handed to a converter at call time.
///
/// Sorted by key so emitted initializers are stable.
pub type ConverterConfig = BTreeMap<String, String>;

/// 128-bit content type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StableId(Uuid);

impl StableId {
    /// Namespace for identifiers derived from fully-qualified type names
    pub const DERIVATION_NAMESPACE: Uuid = Uuid::from_u128(0x4c0e_61b2_95a7_4d3e_8f21_0b6d_c3a9_7e54);

    /// Wrap an existing UUID
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an explicit identifier as written on a content type marker
    ///
    /// Accepts hyphenated, simple, braced and urn forms in any case.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim()).ok().map(Self)
    }

    /// Derive a reproducible identifier from a fully-qualified type name
    pub fn derive(fully_qualified_name: &str) -> Self {
        Self(Uuid::new_v5(
            &Self::DERIVATION_NAMESPACE,
            fully_qualified_name.as_bytes(),
        ))
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// All 32 hex characters, lowercase, without hyphens
    pub fn hex(&self) -> String {
        self.0.simple().to_string()
    }

    /// The first 8 hex characters, used to disambiguate artifact names
    pub fn short(&self) -> String {
        let mut hex = self.hex();
        hex.truncate(8);
        hex
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Converters the generator knows how to emit and the runtime ships by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WellKnownConverter {
    Media,
    Block,
    EmbeddedBlock,
    ContentReference,
    ContentArea,
    Link,
    XhtmlString,
}

impl WellKnownConverter {
    /// Every well-known converter, in registration order
    pub const ALL: [WellKnownConverter; 7] = [
        WellKnownConverter::Block,
        WellKnownConverter::EmbeddedBlock,
        WellKnownConverter::ContentArea,
        WellKnownConverter::Link,
        WellKnownConverter::XhtmlString,
        WellKnownConverter::ContentReference,
        WellKnownConverter::Media,
    ];

    /// Name of the converter contract (the injected interface)
    pub fn contract_name(&self) -> &'static str {
        match self {
            WellKnownConverter::Media => "IMediaConverter",
            WellKnownConverter::Block => "IBlockConverter",
            WellKnownConverter::EmbeddedBlock => "IEmbeddedBlockConverter",
            WellKnownConverter::ContentReference => "IContentReferenceConverter",
            WellKnownConverter::ContentArea => "IContentAreaConverter",
            WellKnownConverter::Link => "ILinkConverter",
            WellKnownConverter::XhtmlString => "IXhtmlStringConverter",
        }
    }

    /// Name of the default implementation
    pub fn implementation_name(&self) -> &'static str {
        match self {
            WellKnownConverter::Media => "MediaConverter",
            WellKnownConverter::Block => "BlockConverter",
            WellKnownConverter::EmbeddedBlock => "EmbeddedBlockConverter",
            WellKnownConverter::ContentReference => "ContentReferenceConverter",
            WellKnownConverter::ContentArea => "ContentAreaConverter",
            WellKnownConverter::Link => "LinkConverter",
            WellKnownConverter::XhtmlString => "XhtmlStringConverter",
        }
    }
}

/// How a property value is transformed on its way into the DTO
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConverterId {
    /// Direct copy, no transformation
    None,
    /// One of the shipped converters
    WellKnown { converter: WellKnownConverter },
    /// The generic enum converter closed over `enum_type`
    Enum { enum_type: String },
    /// A converter named by an override marker, referenced verbatim
    Custom { type_name: String },
}

impl ConverterId {
    pub fn well_known(converter: WellKnownConverter) -> Self {
        ConverterId::WellKnown { converter }
    }

    pub fn enumeration(enum_type: impl Into<String>) -> Self {
        ConverterId::Enum {
            enum_type: enum_type.into(),
        }
    }

    pub fn custom(type_name: impl Into<String>) -> Self {
        ConverterId::Custom {
            type_name: type_name.into(),
        }
    }

    /// True for the passthrough sentinel
    pub fn is_none(&self) -> bool {
        matches!(self, ConverterId::None)
    }
}

impl fmt::Display for ConverterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterId::None => write!(f, "None"),
            ConverterId::WellKnown { converter } => write!(f, "{}", converter.contract_name()),
            ConverterId::Enum { enum_type } => write!(f, "IEnumConverter<{enum_type}>"),
            ConverterId::Custom { type_name } => write!(f, "{type_name}"),
        }
    }
}

/// The DTO-facing type of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExposedType {
    /// Type name as written in generated code, without nullable marker
    pub name: String,

    /// Whether the nullable marker is appended
    #[serde(default)]
    pub nullable: bool,
}

impl ExposedType {
    pub fn new(name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            nullable,
        }
    }

    /// Parse a type as written, treating a trailing `?` as the nullable marker
    pub fn parse(written: &str) -> Self {
        let written = written.trim();
        match written.strip_suffix('?') {
            Some(name) => Self::new(name.trim_end(), true),
            None => Self::new(written, false),
        }
    }
}

impl fmt::Display for ExposedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// One mapped property of a content class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentProperty {
    pub name: String,
    pub exposed_type: ExposedType,
    pub converter: ConverterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converter_config: Option<ConverterConfig>,
}

impl ContentProperty {
    /// A property copied as-is
    pub fn passthrough(name: impl Into<String>, exposed_type: ExposedType) -> Self {
        Self {
            name: name.into(),
            exposed_type,
            converter: ConverterId::None,
            converter_config: None,
        }
    }

    /// A property transformed by `converter`
    pub fn converted(
        name: impl Into<String>,
        exposed_type: ExposedType,
        converter: ConverterId,
    ) -> Self {
        Self {
            name: name.into(),
            exposed_type,
            converter,
            converter_config: None,
        }
    }

    pub fn with_config(mut self, config: Option<ConverterConfig>) -> Self {
        self.converter_config = config;
        self
    }
}

/// One eligible content class after resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentClass {
    pub name: String,
    pub stable_id: StableId,
    pub group: String,
    #[serde(default)]
    pub order: i32,
    pub fully_qualified_name: String,
    #[serde(default)]
    pub properties: Vec<ContentProperty>,
}

impl ContentClass {
    /// Group used when no grouping marker supplies one
    pub const DEFAULT_GROUP: &'static str = "Common";

    /// First 8 hex characters of the stable identifier
    pub fn short_id(&self) -> String {
        self.stable_id.short()
    }

    /// Tag written into every generated DTO and used for serializer dispatch
    pub fn discriminant(&self) -> String {
        format!("{}.{}", self.group, self.name)
    }

    /// Simple name of the generated DTO type
    pub fn pipeline_model_name(&self) -> String {
        format!("{}PipelineModel", self.name)
    }

    /// Simple name of the generated mapping step
    pub fn pipeline_step_name(&self) -> String {
        format!("{}PipelineStep", self.name)
    }

    /// Distinct non-passthrough converters, in order of first use
    pub fn distinct_converters(&self) -> Vec<&ConverterId> {
        let mut seen: Vec<&ConverterId> = Vec::new();
        for property in &self.properties {
            if !property.converter.is_none() && !seen.contains(&&property.converter) {
                seen.push(&property.converter);
            }
        }
        seen
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&ContentProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Order of the mapping step generated for every content class
pub const CLASS_STEP_ORDER: i32 = 1000;

/// Discriminant of the base model returned for content without a pipeline
pub const BASE_MODEL_DISCRIMINANT: &str = "ContentPipelineModel";

/// Normalize a group tag: empty becomes the default, first letter upper-cased
pub fn normalize_group(raw: &str) -> String {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match chars.next() {
        None => ContentClass::DEFAULT_GROUP.to_string(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// What a generated artifact contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    BaseModel,
    GroupInterface,
    Property,
    Attribute,
    Interface,
    Converter,
    Pipeline,
    Service,
    Registration,
    JsonConverter,
    Model,
    Step,
}

impl ArtifactKind {
    /// Kind segment used in per-class file names
    pub fn file_segment(&self) -> &'static str {
        match self {
            ArtifactKind::BaseModel => "BaseModel",
            ArtifactKind::GroupInterface => "GroupInterface",
            ArtifactKind::Property => "Property",
            ArtifactKind::Attribute => "Attribute",
            ArtifactKind::Interface => "Interface",
            ArtifactKind::Converter => "Converter",
            ArtifactKind::Pipeline => "Pipeline",
            ArtifactKind::Service => "Service",
            ArtifactKind::Registration => "Registration",
            ArtifactKind::JsonConverter => "JsonConverter",
            ArtifactKind::Model => "PipelineModel",
            ArtifactKind::Step => "PipelineStep",
        }
    }
}

/// A named unit of generated source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeArtifact {
    pub file_name: String,
    pub kind: ArtifactKind,
    pub source: String,
}

impl CodeArtifact {
    pub fn new(file_name: impl Into<String>, kind: ArtifactKind, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            source: source.into(),
        }
    }
}
