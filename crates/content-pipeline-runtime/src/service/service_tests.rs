#![allow(non_snake_case)]

use super::*;
use crate::capabilities::{Capabilities, InMemoryContent};
use crate::content::ContentReference;
use crate::values::PipelineValue;
use async_trait::async_trait;
use content_pipeline_core::{ContentProperty, ConverterId, ExposedType, StableId, WellKnownConverter};
use parking_lot::Mutex;

type Log = Arc<Mutex<Vec<&'static str>>>;

struct Recording {
    name: &'static str,
    order: i32,
    asynchronous: bool,
    log: Log,
}

impl Recording {
    fn new(name: &'static str, order: i32, log: &Log) -> Self {
        Self {
            name,
            order,
            asynchronous: false,
            log: log.clone(),
        }
    }

    fn asynchronous(mut self) -> Self {
        self.asynchronous = true;
        self
    }
}

#[async_trait]
impl PipelineStep for Recording {
    fn order(&self) -> i32 {
        self.order
    }

    fn is_async(&self) -> bool {
        self.asynchronous
    }

    fn execute(
        &self,
        _content: &ContentItem,
        model: &mut PipelineModel,
        _context: &PipelineContext<'_>,
    ) -> PipelineResult<()> {
        self.log.lock().push(self.name);
        model.set(self.name, "ran");
        Ok(())
    }

    async fn execute_async(
        &self,
        content: &ContentItem,
        model: &mut PipelineModel,
        context: &PipelineContext<'_>,
    ) -> PipelineResult<()> {
        if self.asynchronous {
            tokio::task::yield_now().await;
        }
        self.execute(content, model, context)
    }
}

struct Failing;

impl PipelineStep for Failing {
    fn order(&self) -> i32 {
        0
    }

    fn execute(&self, _: &ContentItem, _: &mut PipelineModel, _: &PipelineContext<'_>) -> PipelineResult<()> {
        Err(PipelineError::StepFailed("boom".into()))
    }
}

fn class(fqn: &str, properties: Vec<ContentProperty>) -> ContentClass {
    let name = fqn.rsplit('.').next().unwrap_or(fqn).to_string();
    ContentClass {
        name,
        stable_id: StableId::derive(fqn),
        group: ContentClass::DEFAULT_GROUP.to_string(),
        order: 0,
        fully_qualified_name: fqn.to_string(),
        properties,
    }
}

fn ordered_service(log: &Log) -> ContentPipelineService {
    ContentPipelineService::builder([class("Site.Page", vec![])])
        .shared_step(Recording::new("shared-20", 20, log))
        .shared_step(Recording::new("shared-10", 10, log).asynchronous())
        .shared_step(Recording::new("shared-10b", 10, log))
        .class_step("Site.Page", Recording::new("class-2000", 2000, log).asynchronous())
        .class_step("Site.Page", Recording::new("class-5", 5, log))
        .build()
        .unwrap()
}

const EXPECTED_ORDER: [&str; 5] = ["shared-10", "shared-10b", "shared-20", "class-5", "class-2000"];

#[test]
fn ContentPipelineService___execute___runs_shared_then_class_steps_in_order() {
    let log = Log::default();
    let service = ordered_service(&log);

    let model = service.execute(&ContentItem::new("Site.Page"), None).unwrap();

    assert_eq!(*log.lock(), EXPECTED_ORDER);
    assert_eq!(model.discriminant(), "Common.Page");
}

#[tokio::test]
async fn ContentPipelineService___execute_async___preserves_step_order() {
    let log = Log::default();
    let service = ordered_service(&log);

    let model = service.execute_async(&ContentItem::new("Site.Page"), None).await.unwrap();

    assert_eq!(*log.lock(), EXPECTED_ORDER);
    assert_eq!(model.len(), EXPECTED_ORDER.len());
}

#[test]
fn ContentPipelineService___unknown_content_type___yields_base_model_after_shared_steps() {
    let log = Log::default();
    let service = ordered_service(&log);

    let model = service.execute(&ContentItem::new("Site.Unknown"), None).unwrap();

    assert_eq!(*log.lock(), ["shared-10", "shared-10b", "shared-20"]);
    assert_eq!(model.kind(), &ModelKind::Base);
}

#[test]
fn ContentPipelineService___failing_step___propagates_error() {
    let log = Log::default();
    let service = ContentPipelineService::builder([class("Site.Page", vec![])])
        .shared_step(Failing)
        .class_step("Site.Page", Recording::new("never", 1, &log))
        .build()
        .unwrap();

    let err = service.execute(&ContentItem::new("Site.Page"), None).unwrap_err();

    assert!(matches!(err, PipelineError::StepFailed(_)));
    assert!(log.lock().is_empty());
}

#[test]
fn ContentPipelineServiceBuilder___step_for_unknown_class___is_composition_error() {
    let log = Log::default();

    let err = ContentPipelineService::builder([class("Site.Page", vec![])])
        .class_step("Site.Other", Recording::new("x", 1, &log))
        .build()
        .unwrap_err();

    assert!(matches!(err, PipelineError::UnknownContentType(ref t) if t == "Site.Other"));
    assert!(err.is_composition_error());
}

#[test]
fn ContentPipelineServiceBuilder___unregistered_custom_converter___is_composition_error() {
    let page = class(
        "Site.Page",
        vec![ContentProperty::converted(
            "Flag",
            ExposedType::new("bool", false),
            ConverterId::custom("Site.Converters.FlagConverter"),
        )],
    );

    let err = ContentPipelineService::builder([page]).build().unwrap_err();

    assert!(matches!(err, PipelineError::MissingConverter { ref property, .. } if property == "Flag"));
}

#[test]
fn ContentPipelineService___self_referencing_block___hits_recursion_limit() {
    let mut store = InMemoryContent::new();
    store.insert(
        ContentItem::new("Site.Loop")
            .with_reference(ContentReference::new(1))
            .with_property("Next", ContentReference::new(1)),
    );
    let registry = ConverterRegistry::with_defaults(&Capabilities::from_store(Arc::new(store)));
    let looping = class(
        "Site.Loop",
        vec![ContentProperty::converted(
            "Next",
            ExposedType::new("IContentPipelineModel", true),
            ConverterId::well_known(WellKnownConverter::Block),
        )],
    );
    let service = ContentPipelineService::builder([looping])
        .converters(registry)
        .max_depth(3)
        .build()
        .unwrap();

    let root = ContentItem::new("Site.Loop").with_property("Next", ContentReference::new(1));
    let err = service.execute(&root, None).unwrap_err();

    assert!(matches!(err, PipelineError::RecursionLimit(3)));
}

#[test]
fn ContentPipelineService___execute_args_without_content___returns_none() {
    let service = ContentPipelineService::builder(Vec::new()).build().unwrap();

    assert!(service.execute_args(&PipelineArgs::default()).unwrap().is_none());
}

#[test]
fn ContentPipelineService___execute_args___passes_content_through() {
    let page = class(
        "Site.Page",
        vec![ContentProperty::passthrough("Title", ExposedType::new("string", true))],
    );
    let service = ContentPipelineService::builder([page]).build().unwrap();
    let args = PipelineArgs::new(ContentItem::new("Site.Page").with_property("Title", "Hi")).with_language("en");

    let model = service.execute_args(&args).unwrap().unwrap();

    assert_eq!(model.get("Title"), Some(&PipelineValue::String("Hi".into())));
}

#[test]
fn ContentPipelineService___is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ContentPipelineService>();
}
