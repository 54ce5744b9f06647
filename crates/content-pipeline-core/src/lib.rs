//! content-pipeline-core - Shared types for the content pipeline generator
//!
//! This crate provides the foundational types used by both the generator and
//! the pipeline runtime:
//! - [`ContentClass`] and [`ContentProperty`], the resolved analysis model
//! - [`ConverterId`] and [`ExposedType`], the classification result of a property
//! - [`CodeArtifact`], the unit of emitted source text
//! - [`GeneratorOptions`] for generator configuration
//! - [`Diagnostics`] and [`CancellationToken`] for host integration
//! - [`GenerateError`] for error handling

mod cancellation;
mod diagnostics;
mod error;
mod model;
mod options;

pub use cancellation::CancellationToken;
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Diagnostics, Location, Severity};
pub use error::{GenerateError, GenerateResult};
pub use model::{
    ArtifactKind, BASE_MODEL_DISCRIMINANT, CLASS_STEP_ORDER, CodeArtifact, ContentClass, ContentProperty,
    ConverterConfig, ConverterId, ExposedType, StableId, WellKnownConverter, normalize_group,
};
pub use options::{GeneratorOptions, is_feature_enabled};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CancellationToken, CodeArtifact, ContentClass, ContentProperty, ConverterId, Diagnostic,
        DiagnosticSink, Diagnostics, ExposedType, GenerateError, GenerateResult,
        GeneratorOptions, StableId, WellKnownConverter,
    };
}
