//! The property converter contract

use crate::content::{ContentItem, ContentValue};
use crate::error::PipelineResult;
use crate::pipeline::PipelineContext;
use crate::values::PipelineValue;
use content_pipeline_core::ConverterConfig;

/// Everything a converter may consult besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct ConversionRequest<'a> {
    /// The content item owning the property
    pub content: &'a ContentItem,
    /// Name of the property being converted
    pub property: &'a str,
    /// Per-property configuration from the override marker
    pub config: Option<&'a ConverterConfig>,
    pub context: &'a PipelineContext<'a>,
}

impl<'a> ConversionRequest<'a> {
    pub fn language(&self) -> Option<&'a str> {
        self.context.language()
    }

    /// Look up a configuration value
    pub fn config_value(&self, key: &str) -> Option<&'a str> {
        self.config.and_then(|config| config.get(key)).map(String::as_str)
    }
}

/// Transforms a raw property value into its pipeline shape
///
/// Converters are shared by every step that needs them and must not keep
/// per-request state.
pub trait PropertyConverter: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &'static str;

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue>;
}
