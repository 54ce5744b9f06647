//! # content-pipeline
//!
//! Maps annotated CMS content classes to serializable pipeline models.
//!
//! content-pipeline works in two halves:
//! - a generator that reads a declaration graph of content classes and emits
//!   the C# models, mapping steps, converters, JSON writers and DI
//!   registrations the host compiles
//! - a runtime that executes the same resolved classes in Rust, against
//!   capability traits standing in for the CMS
//!
//! ## Generating sources
//!
//! ```ignore
//! use content_pipeline::prelude::*;
//!
//! let graph = DeclarationGraph::from_file("declarations.json".as_ref())?;
//! let generation = generate(&graph, &GeneratorOptions::default(), &CancellationToken::new())?;
//! for artifact in &generation.artifacts {
//!     std::fs::write(out_dir.join(&artifact.file_name), &artifact.source)?;
//! }
//! ```
//!
//! ## Running pipelines
//!
//! ```ignore
//! use content_pipeline::prelude::*;
//!
//! let service = ContentPipelineService::builder(generation.classes)
//!     .converters(ConverterRegistry::with_defaults(&capabilities))
//!     .build()?;
//! let json = service.execute(&item, Some("en"))?.to_json()?;
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`content_pipeline_core`] - Resolved class model, options, diagnostics
//! - [`content_pipeline_codegen`] - Analysis and C# emission
//! - [`content_pipeline_runtime`] - Pipeline execution and default converters

// Re-export core types
pub use content_pipeline_core::{
    ArtifactKind, CancellationToken, CodeArtifact, ContentClass, ContentProperty, ConverterId,
    Diagnostic, DiagnosticCode, DiagnosticSink, Diagnostics, ExposedType, GenerateError,
    GenerateResult, GeneratorOptions, Severity, StableId, WellKnownConverter,
};

// Re-export the generator
pub use content_pipeline_codegen::{
    DeclarationGraph, Emitter, Generation, SemanticModel, TypeDeclaration, generate,
    resolve_classes,
};

// Re-export the runtime
pub use content_pipeline_runtime::{
    Capabilities, ContentItem, ContentLoader, ContentPipelineService, ContentPipelineServiceBuilder,
    ContentReference, ContentValue, ConverterRegistry, InMemoryContent, PipelineArgs,
    PipelineContext, PipelineError, PipelineModel, PipelineResult, PipelineStep, PipelineValue,
    PropertyConverter, UrlResolver, XhtmlRenderer,
};

// Re-export common dependencies that hosts need
pub use async_trait::async_trait;
pub use serde;
pub use serde_json;
pub use tracing;

/// The generator crates, for access beyond the re-exports
pub mod codegen {
    pub use content_pipeline_codegen::*;
}

/// The runtime crate, for access beyond the re-exports
pub mod runtime {
    pub use content_pipeline_runtime::*;
}

/// Prelude module for convenient imports.
///
/// Use `use content_pipeline::prelude::*;` to import commonly used types.
///
/// This includes:
/// - Generation: `DeclarationGraph`, `generate`, `GeneratorOptions`, `CancellationToken`
/// - Runtime: `ContentPipelineService`, `ConverterRegistry`, `Capabilities`, `PipelineStep`
/// - Common deps: `async_trait`, `Serialize`, `Deserialize`
pub mod prelude {
    pub use content_pipeline_codegen::prelude::*;
    pub use content_pipeline_runtime::prelude::*;

    pub use crate::async_trait;

    // Serde derives
    pub use serde::{Deserialize, Serialize};
}
