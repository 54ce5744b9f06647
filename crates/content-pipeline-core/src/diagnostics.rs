//! Diagnostics reported during analysis
//!
//! Malformed markers never abort a run. The analyzer reports a [`Diagnostic`]
//! to a [`DiagnosticSink`] and carries on with a default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Stable diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Grouping marker group argument is not a string
    MalformedGroup,
    /// Grouping marker order argument is not an integer
    MalformedOrder,
    /// Content type GUID could not be parsed
    MalformedStableId,
    /// Property converter override could not be resolved
    MalformedConverterOverride,
    /// Base chain loops back on itself
    InheritanceCycle,
    /// Two classes declare the same explicit GUID
    DuplicateStableId,
    /// A base type is referenced but not declared
    UnresolvedBaseType,
    /// Two classes map to the same pipeline model name
    DuplicateDiscriminant,
    /// Two distinct groups share one generated namespace and interface
    GroupIdentifierCollision,
}

impl DiagnosticCode {
    /// The `CPxxxx` identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::MalformedGroup => "CP0001",
            DiagnosticCode::MalformedOrder => "CP0002",
            DiagnosticCode::MalformedStableId => "CP0003",
            DiagnosticCode::MalformedConverterOverride => "CP0004",
            DiagnosticCode::InheritanceCycle => "CP0005",
            DiagnosticCode::DuplicateStableId => "CP0006",
            DiagnosticCode::UnresolvedBaseType => "CP0007",
            DiagnosticCode::DuplicateDiscriminant => "CP0008",
            DiagnosticCode::GroupIdentifierCollision => "CP0009",
        }
    }

    /// Severity the code is reported at
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::InheritanceCycle | DiagnosticCode::DuplicateDiscriminant => {
                Severity::Error
            }
            DiagnosticCode::UnresolvedBaseType => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a diagnostic points: a type, optionally narrowed to a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member: Option<String>,
}

impl Location {
    pub fn type_level(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: None,
        }
    }

    pub fn member(type_name: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            member: Some(member.into()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}::{}", self.type_name, member),
            None => write!(f, "{}", self.type_name),
        }
    }
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    /// Create a diagnostic at the code's default severity
    pub fn new(code: DiagnosticCode, location: Location, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.default_severity(),
            message: message.into(),
            location,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} ({})",
            self.severity, self.code, self.message, self.location
        )
    }
}

/// Receiver of diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collecting sink that mirrors every diagnostic to `tracing`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics with the given code
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.code == code)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => tracing::error!(
                code = %diagnostic.code,
                location = %diagnostic.location,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => tracing::warn!(
                code = %diagnostic.code,
                location = %diagnostic.location,
                "{}",
                diagnostic.message
            ),
            Severity::Info => tracing::debug!(
                code = %diagnostic.code,
                location = %diagnostic.location,
                "{}",
                diagnostic.message
            ),
        }
        self.items.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
