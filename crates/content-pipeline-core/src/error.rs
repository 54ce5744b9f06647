//! Error types for analysis and emission

use thiserror::Error;

/// Result type alias for generator operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generator operations
///
/// Malformed markers and unclassifiable properties are not errors; they are
/// reported as diagnostics and recovered locally. These variants abort a run.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The run was cancelled by the host
    #[error("generation cancelled")]
    Cancelled,

    /// The declaration graph is structurally unusable
    #[error("invalid declaration graph: {0}")]
    InvalidGraph(String),

    /// Generator options failed validation
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Two generated artifacts ended up with the same file name
    #[error("duplicate artifact name: {0}")]
    DuplicateArtifact(String),
}

impl GenerateError {
    /// Whether the host should simply re-invoke the run later
    pub fn is_cancellation(&self) -> bool {
        matches!(self, GenerateError::Cancelled)
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::SerializationError(err.to_string())
    }
}
