//! Declaration graph: the semantic facts the analyzer reads.
//!
//! The analyzer never looks at source text. It reads type declarations,
//! their attributes and their properties through the [`SemanticModel`] trait.
//! [`DeclarationGraph`] is the in-memory implementation, loaded from JSON or
//! TOML.
//!
//! # Format
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "name": "ContentBlock",
//!       "namespace": "Site.Blocks",
//!       "base_type": "BlockData",
//!       "attributes": [
//!         { "name": "ContentType", "named_arguments": { "GUID": "a446798f-e7f5-4f83-a9a2-b72047c7eaa1" } },
//!         { "name": "ContentPipelineModel", "constructor_arguments": ["Common"] }
//!       ],
//!       "properties": [
//!         { "name": "Header", "type": "string", "nullable": true },
//!         { "name": "Text", "type": "XhtmlString?" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Type references are written the way they appear in C#: `IList<string>`,
//! `Site.Enums.ColorEnum`, `XhtmlString?`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Upper bound on base-chain and interface walks
pub const MAX_HIERARCHY_DEPTH: usize = 64;

/// Framework content types that are usually not part of a graph, with the
/// interfaces they are known to implement.
const FRAMEWORK_TYPES: &[(&str, &[&str])] = &[
    ("ContentData", &["IContentData"]),
    ("BlockData", &["IContentData"]),
    ("PageData", &["IContentData", "IContent"]),
    ("MediaData", &["IContentData", "IContent"]),
    ("ImageData", &["IContentData", "IContent"]),
    ("VideoData", &["IContentData", "IContent"]),
];

/// Result type alias for graph loading
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while loading a declaration graph
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("failed to read declaration graph: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON declaration graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML declaration graph: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid type reference '{text}': {reason}")]
    InvalidTypeRef { text: String, reason: String },

    #[error("unsupported declaration graph format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),
}

impl From<GraphError> for content_pipeline_core::GenerateError {
    fn from(err: GraphError) -> Self {
        content_pipeline_core::GenerateError::InvalidGraph(err.to_string())
    }
}

/// A reference to a type as written at a use site
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    /// Simple or qualified name, without generic arguments
    pub name: String,
    pub type_arguments: Vec<TypeRef>,
    /// Trailing `?` marker
    pub nullable: bool,
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeRef>) -> Self {
        self.type_arguments = arguments;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Parse a type as written in C#
    pub fn parse(text: &str) -> GraphResult<Self> {
        let mut parser = TypeRefParser { text, pos: 0 };
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos != text.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }

    /// Last segment of the name
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// The same reference without the nullable marker
    pub fn without_nullable(&self) -> TypeRef {
        Self {
            nullable: false,
            ..self.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for TypeRef {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TypeRef::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

struct TypeRefParser<'a> {
    text: &'a str,
    pos: usize,
}

impl TypeRefParser<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, reason: &str) -> GraphError {
        GraphError::InvalidTypeRef {
            text: self.text.to_string(),
            reason: format!("{reason} at offset {}", self.pos),
        }
    }

    fn parse_type(&mut self) -> GraphResult<TypeRef> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '.' | ':') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }

        let written = &self.text[start..self.pos];
        let mut name = written
            .strip_prefix("global::")
            .unwrap_or(written)
            .to_string();
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }

        self.skip_whitespace();
        let mut type_arguments = Vec::new();
        if self.eat('<') {
            loop {
                type_arguments.push(self.parse_type()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        self.skip_whitespace();
        while self.eat('[') {
            self.skip_whitespace();
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            name.push_str("[]");
            self.skip_whitespace();
        }

        let nullable = self.eat('?');

        Ok(TypeRef {
            name,
            type_arguments,
            nullable,
        })
    }
}

fn simple_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((_, simple)) => simple,
        None => name,
    }
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Struct,
}

/// One attribute applied to a type or property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeUsage {
    /// Attribute class name, with or without the `Attribute` suffix
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructor_arguments: Vec<Value>,

    /// Named arguments in declaration order
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub named_arguments: Map<String, Value>,

    /// Interfaces implemented by the attribute class
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
}

impl AttributeUsage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
            constructor_arguments: Vec::new(),
            named_arguments: Map::new(),
            interfaces: Vec::new(),
        }
    }

    pub fn with_type_argument(mut self, argument: TypeRef) -> Self {
        self.type_arguments.push(argument);
        self
    }

    pub fn with_constructor_argument(mut self, value: impl Into<Value>) -> Self {
        self.constructor_arguments.push(value.into());
        self
    }

    pub fn with_named_argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named_arguments.insert(name.into(), value.into());
        self
    }

    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Whether this is an instance of `class_name` (given with the suffix)
    pub fn is(&self, class_name: &str) -> bool {
        let simple = simple_name(&self.name);
        simple == class_name
            || class_name
                .strip_suffix("Attribute")
                .is_some_and(|bare| bare == simple)
    }

    /// The first interface of the attribute class with the given simple name
    pub fn interface(&self, simple: &str) -> Option<&TypeRef> {
        self.interfaces.iter().find(|i| i.simple_name() == simple)
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named_arguments.get(name)
    }

    /// A constructor argument by position, falling back to a named argument
    pub fn argument(&self, position: usize, name: &str) -> Option<&Value> {
        self.constructor_arguments
            .get(position)
            .or_else(|| self.named(name))
    }
}

/// Render an attribute argument the way the host prints it
pub fn render_argument(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_argument)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// A property declared on a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeRef,

    #[serde(default)]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeUsage>,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            attributes: Vec::new(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeUsage) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Nullable either by flag or by a `?` on the written type
    pub fn is_nullable(&self) -> bool {
        self.nullable || self.ty.nullable
    }
}

/// A declared type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeUsage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyDeclaration>,
}

impl TypeDeclaration {
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind: TypeKind::Class,
            is_abstract: false,
            base_type: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn enumeration(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Enum,
            ..Self::class(namespace, name)
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(TypeRef::named(base));
        self
    }

    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeUsage) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn fully_qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Declared inside the CMS framework itself
    pub fn is_framework_type(&self) -> bool {
        self.namespace
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("episerver"))
    }
}

/// The base chain of a type, most-derived first
#[derive(Debug, Clone)]
pub struct BaseChain<'a> {
    pub types: Vec<&'a TypeDeclaration>,
    /// The chain looped back on itself and was truncated
    pub cycle: bool,
    /// Base type referenced by the last entry but not declared in the graph
    pub unresolved_root: Option<&'a TypeRef>,
}

impl<'a> BaseChain<'a> {
    /// Root-most declared type first
    pub fn root_first(&self) -> impl Iterator<Item = &'a TypeDeclaration> + '_ {
        self.types.iter().rev().copied()
    }
}

/// Read access to declared types
pub trait SemanticModel {
    /// All declarations, in declaration order
    fn class_declarations(&self) -> &[TypeDeclaration];

    /// Look up a declaration by fully-qualified name, or by simple name when
    /// exactly one declaration carries it
    fn resolve_type(&self, name: &str) -> Option<&TypeDeclaration>;

    /// Look up `name` as written inside `namespace`: the namespace and its
    /// parents first, innermost wins, then [`SemanticModel::resolve_type`]
    fn resolve_type_in(&self, name: &str, namespace: &str) -> Option<&TypeDeclaration> {
        let name = name.strip_prefix("global::").unwrap_or(name);
        let mut scope = namespace;
        while !scope.is_empty() {
            let candidate = format!("{scope}.{name}");
            if let Some(decl) = self
                .resolve_type(&candidate)
                .filter(|decl| decl.fully_qualified_name() == candidate)
            {
                return Some(decl);
            }
            scope = scope.rsplit_once('.').map_or("", |(parent, _)| parent);
        }
        self.resolve_type(name)
    }

    fn base_type(&self, decl: &TypeDeclaration) -> Option<&TypeDeclaration> {
        decl.base_type
            .as_ref()
            .and_then(|base| self.resolve_type_in(&base.name, &decl.namespace))
    }

    /// Walk the base chain, stopping at undeclared bases and cycles
    fn base_chain<'a>(&'a self, decl: &'a TypeDeclaration) -> BaseChain<'a> {
        let mut chain = BaseChain {
            types: vec![decl],
            cycle: false,
            unresolved_root: None,
        };
        let mut visited = HashSet::from([decl.fully_qualified_name()]);
        let mut current = decl;

        while let Some(base_ref) = current.base_type.as_ref() {
            let Some(base) = self.resolve_type_in(&base_ref.name, &current.namespace) else {
                chain.unresolved_root = Some(base_ref);
                break;
            };
            if !visited.insert(base.fully_qualified_name()) || visited.len() > MAX_HIERARCHY_DEPTH {
                chain.cycle = true;
                break;
            }
            chain.types.push(base);
            current = base;
        }

        chain
    }

    /// Find an interface by simple name on a type, its bases and its
    /// interfaces' bases
    fn find_interface(&self, type_name: &str, interface: &str) -> Option<TypeRef> {
        let mut pending = vec![type_name.to_string()];
        let mut visited = HashSet::new();

        while let Some(name) = pending.pop() {
            if visited.len() >= MAX_HIERARCHY_DEPTH || !visited.insert(name.clone()) {
                continue;
            }

            let simple = simple_name(&name);
            let known = FRAMEWORK_TYPES
                .iter()
                .find(|(framework, _)| *framework == simple)
                .is_some_and(|(_, interfaces)| interfaces.contains(&interface));
            if known {
                return Some(TypeRef::named(interface));
            }

            let Some(decl) = self.resolve_type(&name) else {
                continue;
            };
            let scoped = |written: &TypeRef| {
                self.resolve_type_in(&written.name, &decl.namespace)
                    .map_or_else(|| written.name.clone(), TypeDeclaration::fully_qualified_name)
            };
            for implemented in &decl.interfaces {
                if implemented.simple_name() == interface {
                    return Some(implemented.clone());
                }
                pending.push(scoped(implemented));
            }
            if let Some(base) = &decl.base_type {
                pending.push(scoped(base));
            }
        }

        None
    }

    fn implements(&self, type_name: &str, interface: &str) -> bool {
        self.find_interface(type_name, interface).is_some()
    }
}

/// In-memory declaration graph
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct DeclarationGraph {
    types: Vec<TypeDeclaration>,
    by_name: HashMap<String, usize>,
    /// `None` when several declarations share the simple name
    by_simple_name: HashMap<String, Option<usize>>,
}

#[derive(Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    types: Vec<TypeDeclaration>,
}

impl From<GraphDocument> for DeclarationGraph {
    fn from(document: GraphDocument) -> Self {
        DeclarationGraph::new(document.types)
    }
}

impl From<DeclarationGraph> for GraphDocument {
    fn from(graph: DeclarationGraph) -> Self {
        GraphDocument { types: graph.types }
    }
}

impl DeclarationGraph {
    /// Build a graph; on duplicate fully-qualified names the first
    /// declaration wins lookups
    pub fn new(types: Vec<TypeDeclaration>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_simple_name = HashMap::new();
        for (index, decl) in types.iter().enumerate() {
            by_name.entry(decl.fully_qualified_name()).or_insert(index);
            by_simple_name
                .entry(decl.name.clone())
                .and_modify(|slot: &mut Option<usize>| *slot = None)
                .or_insert(Some(index));
        }
        Self {
            types,
            by_name,
            by_simple_name,
        }
    }

    pub fn from_json(text: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml(text: &str) -> GraphResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a graph, choosing the format from the file extension
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json(&text),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml(&text),
            _ => Err(GraphError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn types(&self) -> &[TypeDeclaration] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SemanticModel for DeclarationGraph {
    fn class_declarations(&self) -> &[TypeDeclaration] {
        &self.types
    }

    fn resolve_type(&self, name: &str) -> Option<&TypeDeclaration> {
        let name = name.strip_prefix("global::").unwrap_or(name);
        self.by_name
            .get(name)
            .copied()
            .or_else(|| self.by_simple_name.get(simple_name(name)).copied().flatten())
            .and_then(|index| self.types.get(index))
    }
}
