//! The shipped property converters
//!
//! | Converter | Input | Output |
//! |-----------|-------|--------|
//! | [`ContentReferenceConverter`] | reference | [`Link`] |
//! | [`MediaConverter`] | reference | [`Media`], empty when unresolvable |
//! | [`BlockConverter`] | reference | nested model or null |
//! | [`EmbeddedBlockConverter`] | block | nested model or null |
//! | [`ContentAreaConverter`] | content area | [`ContentAreaPipelineModel`] |
//! | [`LinkConverter`] | URL | [`Link`] |
//! | [`XhtmlStringConverter`] | rich text | rendered string |
//! | [`EnumConverter`] | enum value | variant name |

use crate::capabilities::{ContentLoader, UrlResolver, XhtmlRenderer};
use crate::content::{ContentReference, ContentValue};
use crate::converter::{ConversionRequest, PropertyConverter};
use crate::error::{PipelineError, PipelineResult};
use crate::values::{ContentAreaItemPipelineModel, ContentAreaPipelineModel, Link, Media, PipelineValue};
use std::sync::Arc;
use tracing::trace;

fn unexpected(
    converter: &'static str,
    request: &ConversionRequest<'_>,
    expected: &'static str,
    found: &ContentValue,
) -> PipelineError {
    PipelineError::UnexpectedValue {
        converter,
        property: request.property.to_string(),
        expected,
        found: found.kind_name(),
    }
}

/// Extract a reference; null reads as the empty reference
fn reference(
    converter: &'static str,
    value: &ContentValue,
    request: &ConversionRequest<'_>,
) -> PipelineResult<ContentReference> {
    match value {
        ContentValue::Null => Ok(ContentReference::EMPTY),
        ContentValue::Reference(reference) => Ok(*reference),
        other => Err(unexpected(converter, request, "reference", other)),
    }
}

/// Whether `url` carries a scheme
fn is_absolute(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

pub struct ContentReferenceConverter {
    urls: Arc<dyn UrlResolver>,
}

impl ContentReferenceConverter {
    pub fn new(urls: Arc<dyn UrlResolver>) -> Self {
        Self { urls }
    }
}

impl PropertyConverter for ContentReferenceConverter {
    fn name(&self) -> &'static str {
        "ContentReferenceConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        let reference = reference(self.name(), value, request)?;
        if reference.is_empty() {
            return Ok(Link::default().into());
        }
        Ok(Link {
            url: self.urls.get_url(reference, request.language()),
        }
        .into())
    }
}

/// Never fails on missing media; an unresolvable asset yields the empty sentinel
pub struct MediaConverter {
    urls: Arc<dyn UrlResolver>,
    loader: Arc<dyn ContentLoader>,
}

impl MediaConverter {
    pub fn new(urls: Arc<dyn UrlResolver>, loader: Arc<dyn ContentLoader>) -> Self {
        Self { urls, loader }
    }
}

impl PropertyConverter for MediaConverter {
    fn name(&self) -> &'static str {
        "MediaConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        let reference = reference(self.name(), value, request)?;
        if reference.is_empty() {
            return Ok(Media::default().into());
        }
        let Some(media) = self.loader.try_get(reference, request.language()) else {
            trace!(property = request.property, %reference, "media not found");
            return Ok(Media::default().into());
        };

        Ok(Media {
            url: self.urls.get_url(reference, request.language()),
            media_type: Some(media.type_name().to_string()),
            properties: Some(Box::new(request.context.execute_pipeline(&media)?)),
        }
        .into())
    }
}

pub struct BlockConverter {
    loader: Arc<dyn ContentLoader>,
}

impl BlockConverter {
    pub fn new(loader: Arc<dyn ContentLoader>) -> Self {
        Self { loader }
    }
}

impl PropertyConverter for BlockConverter {
    fn name(&self) -> &'static str {
        "BlockConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        let reference = reference(self.name(), value, request)?;
        if reference.is_empty() {
            return Ok(PipelineValue::Null);
        }
        match self.loader.try_get(reference, request.language()) {
            Some(block) => Ok(request.context.execute_pipeline(&block)?.into()),
            None => Ok(PipelineValue::Null),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedBlockConverter;

impl PropertyConverter for EmbeddedBlockConverter {
    fn name(&self) -> &'static str {
        "EmbeddedBlockConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        match value {
            ContentValue::Null => Ok(PipelineValue::Null),
            ContentValue::Block(block) => Ok(request.context.execute_pipeline(block)?.into()),
            other => Err(unexpected(self.name(), request, "block", other)),
        }
    }
}

/// Items that cannot be loaded are skipped; the rest keep their order
pub struct ContentAreaConverter {
    loader: Arc<dyn ContentLoader>,
}

impl ContentAreaConverter {
    pub fn new(loader: Arc<dyn ContentLoader>) -> Self {
        Self { loader }
    }
}

impl PropertyConverter for ContentAreaConverter {
    fn name(&self) -> &'static str {
        "ContentAreaConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        let area = match value {
            ContentValue::Null => return Ok(PipelineValue::Null),
            ContentValue::Area(area) => area,
            other => return Err(unexpected(self.name(), request, "content area", other)),
        };

        let mut items = Vec::with_capacity(area.items.len());
        for item in &area.items {
            let Some(content) = self.loader.try_get(item.reference, request.language()) else {
                trace!(property = request.property, reference = %item.reference, "skipping unresolvable item");
                continue;
            };
            items.push(ContentAreaItemPipelineModel {
                display_option: item.display_option.clone(),
                content: Some(request.context.execute_pipeline(&content)?),
            });
        }
        Ok(PipelineValue::ContentArea(ContentAreaPipelineModel { items }))
    }
}

/// Relative URLs are routed to content and replaced by its friendly URL;
/// anything else, including routed content without a URL, falls back to the
/// URL as written
pub struct LinkConverter {
    urls: Arc<dyn UrlResolver>,
}

impl LinkConverter {
    pub fn new(urls: Arc<dyn UrlResolver>) -> Self {
        Self { urls }
    }
}

impl PropertyConverter for LinkConverter {
    fn name(&self) -> &'static str {
        "LinkConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        let url = match value {
            ContentValue::Null => return Ok(Link::default().into()),
            ContentValue::Url(url) | ContentValue::String(url) => url,
            other => return Err(unexpected(self.name(), request, "url", other)),
        };

        if !is_absolute(url)
            && let Some(reference) = self.urls.route(url).filter(|r| !r.is_empty())
            && let Some(friendly) = self
                .urls
                .get_url(reference, request.language())
                .filter(|friendly| !friendly.is_empty())
        {
            return Ok(Link::new(friendly).into());
        }
        Ok(Link::new(url.as_str()).into())
    }
}

pub struct XhtmlStringConverter {
    renderer: Arc<dyn XhtmlRenderer>,
}

impl XhtmlStringConverter {
    pub fn new(renderer: Arc<dyn XhtmlRenderer>) -> Self {
        Self { renderer }
    }
}

impl PropertyConverter for XhtmlStringConverter {
    fn name(&self) -> &'static str {
        "XhtmlStringConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        match value {
            ContentValue::Null => Ok(PipelineValue::String(String::new())),
            ContentValue::Xhtml(markup) => Ok(self.renderer.render(markup, request.language()).into()),
            other => Err(unexpected(self.name(), request, "xhtml", other)),
        }
    }
}

/// Maps an enum value to its variant name
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumConverter;

impl PropertyConverter for EnumConverter {
    fn name(&self) -> &'static str {
        "EnumConverter"
    }

    fn convert(&self, value: &ContentValue, request: &ConversionRequest<'_>) -> PipelineResult<PipelineValue> {
        match value {
            ContentValue::Null => Ok(PipelineValue::Null),
            ContentValue::Enum(variant) => Ok(variant.as_str().into()),
            other => Err(unexpected(self.name(), request, "enum", other)),
        }
    }
}
