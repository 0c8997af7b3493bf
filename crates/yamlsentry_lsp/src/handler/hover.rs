//! Hover handler: rule explanation and documentation link.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;

use yamlsentry_core::Diagnostic as SentryDiagnostic;

use crate::state::SharedState;

/// Handles the `textDocument/hover` request.
pub async fn handle_hover(state: &SharedState, params: HoverParams) -> Result<Option<Hover>> {
    let uri = &params.text_document_position_params.text_document.uri;
    let line = params.text_document_position_params.position.line;

    let diagnostics = state.last_diagnostics(uri);
    Ok(hover_markdown(&diagnostics, line).map(|value| Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: None,
    }))
}

/// Renders every diagnostic on a 0-based line, or `None` when there are none.
pub fn hover_markdown(diagnostics: &[SentryDiagnostic], line: u32) -> Option<String> {
    let sections: Vec<String> = diagnostics
        .iter()
        .filter(|diag| diag.line.saturating_sub(1) == line)
        .map(|diag| {
            let body = diag.detailed_explanation.as_deref().unwrap_or(&diag.message);
            let mut section = format!("**{}** ({})\n\n{}", diag.rule, diag.source, body);
            if let Some(url) = &diag.documentation_url {
                section.push_str(&format!("\n\n[Documentation]({url})"));
            }
            section
        })
        .collect();

    (!sections.is_empty()).then(|| sections.join("\n\n---\n\n"))
}
