//! Pipeline steps and the per-run context

use crate::content::ContentItem;
use crate::converter::{ConversionRequest, PropertyConverter};
use crate::error::{PipelineError, PipelineResult};
use crate::registry::ConverterRegistry;
use crate::service::ContentPipelineService;
use crate::values::{PipelineModel, PipelineValue};
use async_trait::async_trait;
use content_pipeline_core::{CLASS_STEP_ORDER, ContentClass, ConverterConfig};
use std::sync::Arc;
use tracing::trace;

/// State shared by every step of one run
#[derive(Debug, Clone, Copy)]
pub struct PipelineContext<'s> {
    service: &'s ContentPipelineService,
    language: Option<&'s str>,
    depth: usize,
}

impl<'s> PipelineContext<'s> {
    pub(crate) fn root(service: &'s ContentPipelineService, language: Option<&'s str>) -> Self {
        Self {
            service,
            language,
            depth: 0,
        }
    }

    pub fn service(&self) -> &'s ContentPipelineService {
        self.service
    }

    pub fn language(&self) -> Option<&'s str> {
        self.language
    }

    /// Nesting level; zero for the content item a run was started for
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run the pipeline for nested content, one level deeper
    pub fn execute_pipeline(&self, content: &ContentItem) -> PipelineResult<PipelineModel> {
        let depth = self.depth + 1;
        let limit = self.service.max_depth();
        if depth > limit {
            return Err(PipelineError::RecursionLimit(limit));
        }
        let nested = Self { depth, ..*self };
        self.service.run(content, &nested)
    }
}

/// One unit of work applied to a pipeline model
///
/// Steps run in ascending [`order`](PipelineStep::order). The synchronous
/// pipeline calls [`execute`](PipelineStep::execute); the asynchronous one
/// awaits [`execute_async`](PipelineStep::execute_async), which defaults to
/// the synchronous body.
#[async_trait]
pub trait PipelineStep: Send + Sync {
    fn order(&self) -> i32;

    fn is_async(&self) -> bool {
        false
    }

    fn execute(
        &self,
        content: &ContentItem,
        model: &mut PipelineModel,
        context: &PipelineContext<'_>,
    ) -> PipelineResult<()>;

    async fn execute_async(
        &self,
        content: &ContentItem,
        model: &mut PipelineModel,
        context: &PipelineContext<'_>,
    ) -> PipelineResult<()> {
        self.execute(content, model, context)
    }
}

struct PropertyMapping {
    name: String,
    converter: Option<Arc<dyn PropertyConverter>>,
    config: Option<ConverterConfig>,
}

/// Copies or converts every mapped property of one content class
pub struct PropertyMappingStep {
    content_type: String,
    mappings: Vec<PropertyMapping>,
}

impl PropertyMappingStep {
    /// Bind every property of `class` to its converter
    ///
    /// Fails when a property names a converter the registry does not hold.
    pub fn new(class: &ContentClass, registry: &ConverterRegistry) -> PipelineResult<Self> {
        let mut mappings = Vec::with_capacity(class.properties.len());
        for property in &class.properties {
            let converter = if property.converter.is_none() {
                None
            } else {
                let converter = registry.get(&property.converter).ok_or_else(|| {
                    PipelineError::MissingConverter {
                        converter: property.converter.to_string(),
                        content_type: class.fully_qualified_name.clone(),
                        property: property.name.clone(),
                    }
                })?;
                Some(converter)
            };
            mappings.push(PropertyMapping {
                name: property.name.clone(),
                converter,
                config: property.converter_config.clone(),
            });
        }

        Ok(Self {
            content_type: class.fully_qualified_name.clone(),
            mappings,
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

#[async_trait]
impl PipelineStep for PropertyMappingStep {
    fn order(&self) -> i32 {
        CLASS_STEP_ORDER
    }

    fn execute(
        &self,
        content: &ContentItem,
        model: &mut PipelineModel,
        context: &PipelineContext<'_>,
    ) -> PipelineResult<()> {
        for mapping in &self.mappings {
            let raw = content.property(&mapping.name);
            let value = match &mapping.converter {
                None => PipelineValue::try_from(raw)?,
                Some(converter) => {
                    trace!(property = %mapping.name, converter = converter.name(), "converting");
                    let request = ConversionRequest {
                        content,
                        property: &mapping.name,
                        config: mapping.config.as_ref(),
                        context,
                    };
                    converter.convert(raw, &request)?
                }
            };
            model.set(mapping.name.as_str(), value);
        }
        Ok(())
    }
}
