//! Pipeline models and the values they hold
//!
//! [`PipelineModel`] is the dynamic counterpart of a generated DTO: it carries
//! the discriminant of its class and the mapped property values in
//! declaration order. It serializes the way the generated JSON converters
//! write a DTO:
//!
//! - `pipelineModelType` first, holding the discriminant
//! - property names camel-cased
//! - null properties omitted

use crate::content::ContentValue;
use crate::error::{PipelineError, PipelineResult};
use content_pipeline_core::BASE_MODEL_DISCRIMINANT;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Name of the JSON member holding the discriminant
pub const MODEL_TYPE_FIELD: &str = "pipelineModelType";

/// Resolved link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Resolved media asset; the default value is the empty sentinel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Media {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Box<PipelineModel>>,
}

impl Media {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.media_type.is_none() && self.properties.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAreaItemPipelineModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PipelineModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentAreaPipelineModel {
    pub items: Vec<ContentAreaItemPipelineModel>,
}

/// Value of one property of a pipeline model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PipelineValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Link(Link),
    Media(Media),
    ContentArea(ContentAreaPipelineModel),
    Model(Box<PipelineModel>),
    List(Vec<PipelineValue>),
    /// Copied structure with no dedicated model
    Json(serde_json::Value),
}

impl PipelineValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PipelineValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PipelineValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl TryFrom<&ContentValue> for PipelineValue {
    type Error = PipelineError;

    /// Passthrough copy of a raw value
    fn try_from(value: &ContentValue) -> PipelineResult<Self> {
        Ok(match value {
            ContentValue::Null => PipelineValue::Null,
            ContentValue::Bool(b) => PipelineValue::Bool(*b),
            ContentValue::Integer(i) => PipelineValue::Integer(*i),
            ContentValue::Float(f) => PipelineValue::Float(*f),
            ContentValue::String(s) | ContentValue::Enum(s) | ContentValue::Url(s) => {
                PipelineValue::String(s.clone())
            }
            ContentValue::Xhtml(markup) => PipelineValue::String(markup.as_str().to_string()),
            ContentValue::Reference(reference) => PipelineValue::Json(reference.id().into()),
            ContentValue::List(values) => PipelineValue::List(
                values
                    .iter()
                    .map(PipelineValue::try_from)
                    .collect::<PipelineResult<_>>()?,
            ),
            ContentValue::Area(_) | ContentValue::Block(_) => PipelineValue::Json(serde_json::to_value(value)?),
        })
    }
}

impl From<String> for PipelineValue {
    fn from(value: String) -> Self {
        PipelineValue::String(value)
    }
}

impl From<&str> for PipelineValue {
    fn from(value: &str) -> Self {
        PipelineValue::String(value.to_string())
    }
}

impl From<Link> for PipelineValue {
    fn from(value: Link) -> Self {
        PipelineValue::Link(value)
    }
}

impl From<Media> for PipelineValue {
    fn from(value: Media) -> Self {
        PipelineValue::Media(value)
    }
}

impl From<PipelineModel> for PipelineValue {
    fn from(value: PipelineModel) -> Self {
        PipelineValue::Model(Box::new(value))
    }
}

/// Which DTO a model stands for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// The shared base model, used for content without a class pipeline
    Base,
    /// The DTO of one content class, keyed by its discriminant
    Content(String),
}

impl ModelKind {
    pub fn discriminant(&self) -> &str {
        match self {
            ModelKind::Base => BASE_MODEL_DISCRIMINANT,
            ModelKind::Content(discriminant) => discriminant,
        }
    }
}

/// A pipeline model under construction or returned from a run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineModel {
    kind: ModelKind,
    properties: Vec<(String, PipelineValue)>,
}

impl Default for PipelineModel {
    fn default() -> Self {
        Self::base()
    }
}

impl PipelineModel {
    pub fn new(kind: ModelKind) -> Self {
        Self {
            kind,
            properties: Vec::new(),
        }
    }

    pub fn base() -> Self {
        Self::new(ModelKind::Base)
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn discriminant(&self) -> &str {
        self.kind.discriminant()
    }

    /// Set a property, keeping the position of an earlier assignment
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PipelineValue>) {
        let name = name.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.properties.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PipelineValue> {
        self.properties
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &PipelineValue)> {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_value(&self) -> PipelineResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for PipelineModel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present: Vec<_> = self.properties.iter().filter(|(_, v)| !v.is_null()).collect();
        let mut map = serializer.serialize_map(Some(present.len() + 1))?;
        map.serialize_entry(MODEL_TYPE_FIELD, self.discriminant())?;
        for (name, value) in present {
            map.serialize_entry(&camel_case(name), value)?;
        }
        map.end()
    }
}

/// Camel-case a member name the way the web serializer defaults do
///
/// A leading run of capitals is lowered as a unit, except for the capital
/// that starts the next word: `URLValue` becomes `urlValue`.
pub fn camel_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    if !chars.first().is_some_and(|c| c.is_uppercase()) {
        return name.to_string();
    }

    let mut out: Vec<char> = chars.clone();
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }
        let next_is_lower = chars.get(i + 1).is_some_and(|c| !c.is_uppercase());
        if i > 0 && next_is_lower {
            if chars[i + 1] == ' ' {
                out[i] = lower(chars[i]);
            }
            break;
        }
        out[i] = lower(chars[i]);
    }
    out.into_iter().collect()
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
#[path = "values/values_tests.rs"]
mod values_tests;
