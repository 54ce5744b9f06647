//! content-pipeline-runtime - Executes content pipelines over resolved classes
//!
//! This crate provides:
//! - [`ContentPipelineService`], composed by [`ContentPipelineServiceBuilder`]
//!   from resolved [`ContentClass`](content_pipeline_core::ContentClass) values
//! - [`PipelineStep`] and the per-class [`PropertyMappingStep`]
//! - [`PropertyConverter`], the shipped converters and a [`ConverterRegistry`]
//! - [`PipelineModel`], serialized the way the generated JSON converters write
//! - Capability traits ([`ContentLoader`], [`UrlResolver`], [`XhtmlRenderer`])
//!   standing in for the host CMS
//!
//! # Example
//!
//! ```ignore
//! use content_pipeline_runtime::prelude::*;
//!
//! let registry = ConverterRegistry::with_defaults(&Capabilities::from_store(store));
//! let service = ContentPipelineService::builder(classes)
//!     .converters(registry)
//!     .build()?;
//! let model = service.execute(&item, Some("en"))?;
//! println!("{}", model.to_json()?);
//! ```

pub mod capabilities;
pub mod content;
pub mod converter;
pub mod converters;
mod error;
pub mod pipeline;
pub mod registry;
pub mod service;
pub mod values;

pub use capabilities::{Capabilities, ContentLoader, InMemoryContent, RawXhtmlRenderer, UrlResolver, XhtmlRenderer};
pub use content::{ContentArea, ContentAreaItem, ContentItem, ContentReference, ContentValue, XhtmlString};
pub use converter::{ConversionRequest, PropertyConverter};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{PipelineContext, PipelineStep, PropertyMappingStep};
pub use registry::ConverterRegistry;
pub use service::{ContentPipelineService, ContentPipelineServiceBuilder, DEFAULT_MAX_DEPTH, PipelineArgs};
pub use values::{
    ContentAreaItemPipelineModel, ContentAreaPipelineModel, Link, Media, ModelKind, PipelineModel, PipelineValue,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Capabilities, ContentItem, ContentPipelineService, ContentReference, ContentValue, ConverterRegistry,
        InMemoryContent, PipelineContext, PipelineError, PipelineModel, PipelineResult, PipelineStep,
        PipelineValue, PropertyConverter,
    };
}
