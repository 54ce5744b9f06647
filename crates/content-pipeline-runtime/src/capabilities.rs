//! Host capabilities the default converters call into
//!
//! The CMS owns content storage, routing and rich-text rendering. The
//! converters only see these traits, so a host plugs its own services in
//! and tests use [`InMemoryContent`].

use crate::content::{ContentItem, ContentReference, XhtmlString};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Loads content by reference
pub trait ContentLoader: Send + Sync {
    /// Load the item behind `reference`, or `None` when it cannot be resolved
    fn try_get(&self, reference: ContentReference, language: Option<&str>) -> Option<ContentItem>;
}

/// Maps between content references and public URLs
pub trait UrlResolver: Send + Sync {
    /// Friendly URL of a content item
    fn get_url(&self, reference: ContentReference, language: Option<&str>) -> Option<String>;

    /// Content routed to by a relative URL
    fn route(&self, url: &str) -> Option<ContentReference>;
}

/// Renders stored rich text into markup fit for output
pub trait XhtmlRenderer: Send + Sync {
    fn render(&self, markup: &XhtmlString, language: Option<&str>) -> String;
}

/// Renderer that emits stored markup unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct RawXhtmlRenderer;

impl XhtmlRenderer for RawXhtmlRenderer {
    fn render(&self, markup: &XhtmlString, _language: Option<&str>) -> String {
        markup.as_str().to_string()
    }
}

/// The capability bundle handed to [`ConverterRegistry::with_defaults`](crate::ConverterRegistry::with_defaults)
#[derive(Clone)]
pub struct Capabilities {
    pub loader: Arc<dyn ContentLoader>,
    pub urls: Arc<dyn UrlResolver>,
    pub xhtml: Arc<dyn XhtmlRenderer>,
}

impl Capabilities {
    pub fn new(
        loader: Arc<dyn ContentLoader>,
        urls: Arc<dyn UrlResolver>,
        xhtml: Arc<dyn XhtmlRenderer>,
    ) -> Self {
        Self { loader, urls, xhtml }
    }

    /// Use one store for loading and routing, rendering rich text raw
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: ContentLoader + UrlResolver + 'static,
    {
        Self {
            loader: store.clone(),
            urls: store,
            xhtml: Arc::new(RawXhtmlRenderer),
        }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}

/// Content store held in memory
///
/// Languages are ignored; every item has at most one URL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    items: BTreeMap<ContentReference, ContentItem>,
    urls: BTreeMap<ContentReference, String>,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `item` under its own reference
    pub fn insert(&mut self, item: ContentItem) -> &mut Self {
        self.items.insert(item.reference, item);
        self
    }

    /// Store `item` and publish it at `url`
    pub fn insert_routed(&mut self, item: ContentItem, url: impl Into<String>) -> &mut Self {
        self.urls.insert(item.reference, url.into());
        self.insert(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ContentLoader for InMemoryContent {
    fn try_get(&self, reference: ContentReference, _language: Option<&str>) -> Option<ContentItem> {
        if reference.is_empty() {
            return None;
        }
        self.items.get(&reference).cloned()
    }
}

impl UrlResolver for InMemoryContent {
    fn get_url(&self, reference: ContentReference, _language: Option<&str>) -> Option<String> {
        self.urls.get(&reference).cloned()
    }

    fn route(&self, url: &str) -> Option<ContentReference> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        self.urls
            .iter()
            .find(|(_, published)| published.as_str() == path)
            .map(|(reference, _)| *reference)
    }
}
