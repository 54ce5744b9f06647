//! Error types for pipeline execution

use thiserror::Error;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline composition and execution
///
/// A failing step or converter aborts the run; no partially mapped model is
/// returned.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A class property names a converter nobody registered
    #[error("no converter registered for {converter} (needed by {content_type}::{property})")]
    MissingConverter {
        converter: String,
        content_type: String,
        property: String,
    },

    /// An extra step was registered for a class the service does not know
    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    /// A converter received a value of the wrong shape
    #[error("{converter} cannot convert {property}: expected {expected}, found {found}")]
    UnexpectedValue {
        converter: &'static str,
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A converter failed for its own reasons
    #[error("converter {converter} failed on {property}: {message}")]
    ConverterFailed {
        converter: String,
        property: String,
        message: String,
    },

    /// A step failed
    #[error("step failed: {0}")]
    StepFailed(String),

    /// Nested pipelines went deeper than the configured limit
    #[error("nested pipeline depth exceeded the limit of {0}")]
    RecursionLimit(usize),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),
}

impl PipelineError {
    /// Whether the error was raised while composing the service rather than
    /// while running it
    pub fn is_composition_error(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingConverter { .. } | PipelineError::UnknownContentType(_)
        )
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::SerializationError(err.to_string())
    }
}
