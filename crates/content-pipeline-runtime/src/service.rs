//! The composed pipeline service

use crate::content::ContentItem;
use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::{PipelineContext, PipelineStep, PropertyMappingStep};
use crate::registry::ConverterRegistry;
use crate::values::{ModelKind, PipelineModel};
use content_pipeline_core::ContentClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Nesting depth allowed for block and media pipelines
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Input of one service invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineArgs {
    #[serde(default)]
    pub content: Option<ContentItem>,
    #[serde(default)]
    pub language: Option<String>,
}

impl PipelineArgs {
    pub fn new(content: ContentItem) -> Self {
        Self {
            content: Some(content),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

struct ClassPipeline {
    kind: ModelKind,
    steps: Vec<Arc<dyn PipelineStep>>,
}

/// Runs the pipeline matching a content item's exact type
///
/// Shared steps run first, in ascending order, then the class steps in
/// ascending order. Steps with equal order keep their registration order.
/// Content without a class pipeline yields the base model after the shared
/// steps.
pub struct ContentPipelineService {
    pipelines: BTreeMap<String, ClassPipeline>,
    shared: Vec<Arc<dyn PipelineStep>>,
    max_depth: usize,
}

impl ContentPipelineService {
    pub fn builder(classes: impl IntoIterator<Item = ContentClass>) -> ContentPipelineServiceBuilder {
        ContentPipelineServiceBuilder::new(classes)
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether a class pipeline exists for `content_type`
    pub fn handles(&self, content_type: &str) -> bool {
        self.pipelines.contains_key(content_type)
    }

    /// Content types with a class pipeline, sorted
    pub fn content_types(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }

    /// Run the pipeline for `content`
    pub fn execute(&self, content: &ContentItem, language: Option<&str>) -> PipelineResult<PipelineModel> {
        self.run(content, &PipelineContext::root(self, language))
    }

    /// Run the pipeline for `content`, awaiting each step in turn
    pub async fn execute_async(
        &self,
        content: &ContentItem,
        language: Option<&str>,
    ) -> PipelineResult<PipelineModel> {
        let context = PipelineContext::root(self, language);
        let (mut model, steps) = self.prepare(content);
        for step in self.shared.iter().chain(steps) {
            step.execute_async(content, &mut model, &context).await?;
        }
        Ok(model)
    }

    /// Run the pipeline for the content carried by `args`, if any
    pub fn execute_args(&self, args: &PipelineArgs) -> PipelineResult<Option<PipelineModel>> {
        match &args.content {
            Some(content) => self.execute(content, args.language.as_deref()).map(Some),
            None => Ok(None),
        }
    }

    pub async fn execute_args_async(&self, args: &PipelineArgs) -> PipelineResult<Option<PipelineModel>> {
        match &args.content {
            Some(content) => self
                .execute_async(content, args.language.as_deref())
                .await
                .map(Some),
            None => Ok(None),
        }
    }

    pub(crate) fn run(&self, content: &ContentItem, context: &PipelineContext<'_>) -> PipelineResult<PipelineModel> {
        let (mut model, steps) = self.prepare(content);
        for step in self.shared.iter().chain(steps) {
            step.execute(content, &mut model, context)?;
        }
        Ok(model)
    }

    /// Fresh model and class steps for the exact type of `content`
    fn prepare(&self, content: &ContentItem) -> (PipelineModel, &[Arc<dyn PipelineStep>]) {
        let Some(pipeline) = self.pipelines.get(&content.content_type) else {
            trace!(content_type = %content.content_type, "no class pipeline, using base model");
            return (PipelineModel::base(), &[]);
        };
        trace!(content_type = %content.content_type, "running class pipeline");
        (PipelineModel::new(pipeline.kind.clone()), pipeline.steps.as_slice())
    }
}

impl std::fmt::Debug for ContentPipelineService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentPipelineService")
            .field("content_types", &self.pipelines.keys().collect::<Vec<_>>())
            .field("shared_steps", &self.shared.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Composes a [`ContentPipelineService`] from resolved classes
///
/// Each class gets a [`PropertyMappingStep`] bound to converters from the
/// registry. Nothing is global: two services built from different
/// registries never share converters.
pub struct ContentPipelineServiceBuilder {
    classes: Vec<ContentClass>,
    registry: ConverterRegistry,
    shared: Vec<Arc<dyn PipelineStep>>,
    class_steps: Vec<(String, Arc<dyn PipelineStep>)>,
    max_depth: usize,
}

impl ContentPipelineServiceBuilder {
    pub fn new(classes: impl IntoIterator<Item = ContentClass>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
            registry: ConverterRegistry::new(),
            shared: Vec::new(),
            class_steps: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn converters(mut self, registry: ConverterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Add a step run for every content item
    pub fn shared_step(mut self, step: impl PipelineStep + 'static) -> Self {
        self.shared.push(Arc::new(step));
        self
    }

    /// Add a step run for one content type, next to its mapping step
    pub fn class_step(mut self, content_type: impl Into<String>, step: impl PipelineStep + 'static) -> Self {
        self.class_steps.push((content_type.into(), Arc::new(step)));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> PipelineResult<ContentPipelineService> {
        let mut pipelines = BTreeMap::new();
        for class in &self.classes {
            let mapping = PropertyMappingStep::new(class, &self.registry)?;
            debug!(
                content_type = %class.fully_qualified_name,
                discriminant = %class.discriminant(),
                properties = class.properties.len(),
                "composed class pipeline"
            );
            pipelines.insert(
                class.fully_qualified_name.clone(),
                ClassPipeline {
                    kind: ModelKind::Content(class.discriminant()),
                    steps: vec![Arc::new(mapping) as Arc<dyn PipelineStep>],
                },
            );
        }

        for (content_type, step) in self.class_steps {
            let pipeline = pipelines
                .get_mut(&content_type)
                .ok_or_else(|| PipelineError::UnknownContentType(content_type.clone()))?;
            pipeline.steps.push(step);
        }

        for pipeline in pipelines.values_mut() {
            pipeline.steps.sort_by_key(|step| step.order());
        }
        let mut shared = self.shared;
        shared.sort_by_key(|step| step.order());

        debug!(
            classes = pipelines.len(),
            shared_steps = shared.len(),
            max_depth = self.max_depth,
            "pipeline service built"
        );
        Ok(ContentPipelineService {
            pipelines,
            shared,
            max_depth: self.max_depth,
        })
    }
}

#[cfg(test)]
#[path = "service/service_tests.rs"]
mod service_tests;
