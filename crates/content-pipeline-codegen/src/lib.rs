//! content-pipeline-codegen - Compile-time generator for content pipelines
//!
//! This crate provides:
//! - [`graph`]: the declaration graph and the [`SemanticModel`] queries the
//!   analyzer runs against it
//! - [`classify`] and [`resolve`]: the analysis producing
//!   [`ContentClass`](content_pipeline_core::ContentClass) values
//! - [`emit`]: the C# artifact families
//! - [`generate`], the single entry point hosts call

pub mod classify;
pub mod driver;
pub mod emit;
pub mod graph;
pub mod markers;
pub mod naming;
pub mod resolve;

pub use classify::Classifier;
pub use driver::{Generation, forms_container_class, generate, resolve_classes};
pub use emit::Emitter;
pub use graph::{
    AttributeUsage, DeclarationGraph, GraphError, GraphResult, PropertyDeclaration, SemanticModel,
    TypeDeclaration, TypeKind, TypeRef,
};
pub use resolve::Resolver;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DeclarationGraph, Emitter, Generation, SemanticModel, TypeDeclaration, generate,
        resolve_classes,
    };
    pub use content_pipeline_core::prelude::*;
}
