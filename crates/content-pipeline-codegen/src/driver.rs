//! Generation entry point
//!
//! Validates options, resolves every eligible class, adds the form
//! container when forms are enabled, and renders the artifact set.

use crate::emit::Emitter;
use crate::graph::SemanticModel;
use crate::resolve::Resolver;
use content_pipeline_core::{
    CancellationToken, CodeArtifact, ContentClass, Diagnostics, GenerateResult, GeneratorOptions,
    StableId,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fully-qualified name of the synthetic form container class
pub const FORM_CONTAINER_TYPE: &str = "EPiServer.Forms.Implementation.Elements.FormContainerBlock";

/// Content type GUID of the form container
pub const FORM_CONTAINER_GUID: &str = "02EC61FF-819F-4978-ADD6-A097F5BD944E";

/// Everything one run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub classes: Vec<ContentClass>,
    pub artifacts: Vec<CodeArtifact>,
    pub diagnostics: Diagnostics,
}

impl Generation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

/// The form container class. Its properties come from the forms package,
/// so none are mapped.
pub fn forms_container_class() -> ContentClass {
    ContentClass {
        name: "FormContainerBlock".to_string(),
        stable_id: StableId::parse(FORM_CONTAINER_GUID)
            .unwrap_or_else(|| StableId::derive(FORM_CONTAINER_TYPE)),
        group: "Form".to_string(),
        order: 4000,
        fully_qualified_name: FORM_CONTAINER_TYPE.to_string(),
        properties: Vec::new(),
    }
}

/// Resolve the classes of one run without emitting anything
pub fn resolve_classes(
    model: &dyn SemanticModel,
    options: &GeneratorOptions,
    cancellation: &CancellationToken,
) -> GenerateResult<(Vec<ContentClass>, Diagnostics)> {
    options.validate()?;

    let mut diagnostics = Diagnostics::new();
    let mut classes = Resolver::new(model, cancellation.clone()).resolve_all(&mut diagnostics)?;

    if options.forms_enabled
        && !classes
            .iter()
            .any(|class| class.fully_qualified_name == FORM_CONTAINER_TYPE)
    {
        classes.push(forms_container_class());
        classes.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.fully_qualified_name.cmp(&b.fully_qualified_name))
        });
    }

    Ok((classes, diagnostics))
}

/// Run analysis and emission
pub fn generate(
    model: &dyn SemanticModel,
    options: &GeneratorOptions,
    cancellation: &CancellationToken,
) -> GenerateResult<Generation> {
    let (classes, diagnostics) = resolve_classes(model, options, cancellation)?;

    let artifacts = Emitter::new(options.clone(), cancellation.clone()).emit_all(&classes)?;

    info!(
        classes = classes.len(),
        artifacts = artifacts.len(),
        diagnostics = diagnostics.len(),
        namespace = %options.shared_namespace,
        "generation complete"
    );

    Ok(Generation {
        classes,
        artifacts,
        diagnostics,
    })
}
