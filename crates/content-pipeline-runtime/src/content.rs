//! Content instances handed to a pipeline
//!
//! A [`ContentItem`] is a loaded instance of a content class: its exact
//! type name, its reference and the raw values of its properties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to a stored content item; `0` is the empty reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentReference(pub u64);

impl ContentReference {
    pub const EMPTY: ContentReference = ContentReference(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rich-text markup as stored, before rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct XhtmlString(pub String);

impl XhtmlString {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One entry of a content area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAreaItem {
    pub reference: ContentReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_option: Option<String>,
}

impl ContentAreaItem {
    pub fn new(reference: ContentReference) -> Self {
        Self {
            reference,
            display_option: None,
        }
    }

    pub fn with_display_option(mut self, option: impl Into<String>) -> Self {
        self.display_option = Some(option.into());
        self
    }
}

/// Ordered list of referenced content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentArea {
    pub items: Vec<ContentAreaItem>,
}

impl ContentArea {
    pub fn new(items: Vec<ContentAreaItem>) -> Self {
        Self { items }
    }
}

/// Raw value of a content property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ContentValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Canonical variant name of an enum value
    Enum(String),
    Url(String),
    Reference(ContentReference),
    Area(ContentArea),
    Xhtml(XhtmlString),
    /// Block embedded directly in its owner
    Block(Box<ContentItem>),
    List(Vec<ContentValue>),
}

impl ContentValue {
    /// Short name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentValue::Null => "null",
            ContentValue::Bool(_) => "bool",
            ContentValue::Integer(_) => "integer",
            ContentValue::Float(_) => "float",
            ContentValue::String(_) => "string",
            ContentValue::Enum(_) => "enum",
            ContentValue::Url(_) => "url",
            ContentValue::Reference(_) => "reference",
            ContentValue::Area(_) => "content area",
            ContentValue::Xhtml(_) => "xhtml",
            ContentValue::Block(_) => "block",
            ContentValue::List(_) => "list",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ContentValue::Null)
    }
}

impl From<&str> for ContentValue {
    fn from(value: &str) -> Self {
        ContentValue::String(value.to_string())
    }
}

impl From<String> for ContentValue {
    fn from(value: String) -> Self {
        ContentValue::String(value)
    }
}

impl From<bool> for ContentValue {
    fn from(value: bool) -> Self {
        ContentValue::Bool(value)
    }
}

impl From<i64> for ContentValue {
    fn from(value: i64) -> Self {
        ContentValue::Integer(value)
    }
}

impl From<ContentReference> for ContentValue {
    fn from(value: ContentReference) -> Self {
        ContentValue::Reference(value)
    }
}

impl From<ContentArea> for ContentValue {
    fn from(value: ContentArea) -> Self {
        ContentValue::Area(value)
    }
}

impl From<XhtmlString> for ContentValue {
    fn from(value: XhtmlString) -> Self {
        ContentValue::Xhtml(value)
    }
}

impl From<ContentItem> for ContentValue {
    fn from(value: ContentItem) -> Self {
        ContentValue::Block(Box::new(value))
    }
}

/// A loaded content instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Fully-qualified name of the exact content class
    pub content_type: String,
    #[serde(default)]
    pub reference: ContentReference,
    #[serde(default)]
    pub properties: BTreeMap<String, ContentValue>,
}

impl ContentItem {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            reference: ContentReference::EMPTY,
            properties: BTreeMap::new(),
        }
    }

    pub fn with_reference(mut self, reference: ContentReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Value of a property; absent properties read as null
    pub fn property(&self, name: &str) -> &ContentValue {
        const NULL: &ContentValue = &ContentValue::Null;
        self.properties.get(name).unwrap_or(NULL)
    }

    /// Simple name of the content type, as exposed on media
    pub fn type_name(&self) -> &str {
        match self.content_type.rsplit_once('.') {
            Some((_, simple)) => simple,
            None => &self.content_type,
        }
    }
}
