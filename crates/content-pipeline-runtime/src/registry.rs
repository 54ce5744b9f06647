//! Explicit converter registration

use crate::capabilities::Capabilities;
use crate::converter::PropertyConverter;
use crate::converters::{
    BlockConverter, ContentAreaConverter, ContentReferenceConverter, EmbeddedBlockConverter,
    EnumConverter, LinkConverter, MediaConverter, XhtmlStringConverter,
};
use content_pipeline_core::{ConverterId, WellKnownConverter};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Converters keyed by the identifier classes refer to them by
///
/// Every enum type shares the generic enum converter unless a dedicated one
/// is registered under its own [`ConverterId::Enum`] key.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    converters: BTreeMap<ConverterId, Arc<dyn PropertyConverter>>,
    enum_fallback: Option<Arc<dyn PropertyConverter>>,
}

impl ConverterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped converters bound to `capabilities`
    pub fn with_defaults(capabilities: &Capabilities) -> Self {
        let mut registry = Self::new();
        for converter in WellKnownConverter::ALL {
            let implementation: Arc<dyn PropertyConverter> = match converter {
                WellKnownConverter::Media => Arc::new(MediaConverter::new(
                    capabilities.urls.clone(),
                    capabilities.loader.clone(),
                )),
                WellKnownConverter::Block => Arc::new(BlockConverter::new(capabilities.loader.clone())),
                WellKnownConverter::EmbeddedBlock => Arc::new(EmbeddedBlockConverter),
                WellKnownConverter::ContentReference => {
                    Arc::new(ContentReferenceConverter::new(capabilities.urls.clone()))
                }
                WellKnownConverter::ContentArea => {
                    Arc::new(ContentAreaConverter::new(capabilities.loader.clone()))
                }
                WellKnownConverter::Link => Arc::new(LinkConverter::new(capabilities.urls.clone())),
                WellKnownConverter::XhtmlString => {
                    Arc::new(XhtmlStringConverter::new(capabilities.xhtml.clone()))
                }
            };
            registry.converters.insert(ConverterId::well_known(converter), implementation);
        }
        registry.enum_fallback = Some(Arc::new(EnumConverter));
        registry
    }

    /// Register or replace the converter for `id`
    pub fn register(&mut self, id: ConverterId, converter: Arc<dyn PropertyConverter>) -> &mut Self {
        self.converters.insert(id, converter);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, id: ConverterId, converter: impl PropertyConverter + 'static) -> Self {
        self.register(id, Arc::new(converter));
        self
    }

    /// Converter for `id`; `None` for the passthrough sentinel and for
    /// unregistered identifiers
    pub fn get(&self, id: &ConverterId) -> Option<Arc<dyn PropertyConverter>> {
        if id.is_none() {
            return None;
        }
        match self.converters.get(id) {
            Some(converter) => Some(converter.clone()),
            None if matches!(id, ConverterId::Enum { .. }) => self.enum_fallback.clone(),
            None => None,
        }
    }

    pub fn contains(&self, id: &ConverterId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty() && self.enum_fallback.is_none()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("converters", &self.converters.keys().collect::<Vec<_>>())
            .field("enum_fallback", &self.enum_fallback.is_some())
            .finish()
    }
}
