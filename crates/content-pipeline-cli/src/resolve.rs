//! `content-pipeline resolve`: dump the resolved class model

use crate::input::{Invocation, ensure_no_errors, report_diagnostics};
use anyhow::{Context, Result};
use content_pipeline_codegen::resolve_classes;
use content_pipeline_core::CancellationToken;

/// Resolved classes as JSON
pub fn run(invocation: &Invocation, pretty: bool) -> Result<String> {
    let graph = invocation.load_graph()?;
    let (classes, diagnostics) = resolve_classes(&graph, &invocation.options, &CancellationToken::new())
        .with_context(|| format!("Failed to resolve {}", invocation.input.display()))?;

    report_diagnostics(&diagnostics);
    ensure_no_errors(&diagnostics)?;

    let json = if pretty {
        serde_json::to_string_pretty(&classes)
    } else {
        serde_json::to_string(&classes)
    };
    json.context("Failed to serialize resolved classes")
}
