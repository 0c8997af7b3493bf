//! Code action handler: inline suppression, ignore-file entries and tool fixes.

use std::collections::{BTreeSet, HashMap};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::debug;

use yamlsentry_core::{Diagnostic as SentryDiagnostic, Source, inline_suppression};

use super::commands::WorkspaceCommand;
use crate::conversion::{end_of_line, to_lsp_diagnostic};
use crate::state::SharedState;

/// Handles the `textDocument/codeAction` request.
pub async fn handle_code_action(
    state: &SharedState,
    params: CodeActionParams,
) -> Result<Option<CodeActionResponse>> {
    debug!("Code action request: {}", params.text_document.uri);

    let wants_quickfix = params
        .context
        .only
        .as_ref()
        .is_none_or(|only| only.contains(&CodeActionKind::QUICKFIX));
    if !wants_quickfix {
        return Ok(None);
    }

    let uri = &params.text_document.uri;
    let text = state.document_text(uri);
    let diagnostics = state.last_diagnostics(uri);

    Ok(Some(build_code_actions(
        uri,
        text.as_deref(),
        &diagnostics,
        &params.range,
    )))
}

/// Builds quick fixes for the diagnostics on the lines of `range`.
///
/// Each diagnostic gets an inline suppression when its tool has one and an
/// ignore-file entry for ansible-lint. Fixable diagnostics add one
/// "fix with tool" command per tool.
pub fn build_code_actions(
    uri: &Url,
    text: Option<&str>,
    diagnostics: &[SentryDiagnostic],
    range: &Range,
) -> Vec<CodeActionOrCommand> {
    let mut actions = Vec::new();
    let mut fix_tools = BTreeSet::new();

    let on_requested_lines = diagnostics.iter().filter(|diag| {
        let line = diag.line.saturating_sub(1);
        range.start.line <= line && line <= range.end.line
    });

    for diag in on_requested_lines {
        let lsp_diagnostic = to_lsp_diagnostic(diag, text);

        if let Some(text) = text
            && let Some(comment) = inline_suppression(diag.source, &diag.rule)
        {
            let position = end_of_line(text, diag.line.saturating_sub(1));
            let edit = TextEdit {
                range: Range::new(position, position),
                new_text: format!("  {comment}"),
            };
            actions.push(CodeActionOrCommand::CodeAction(CodeAction {
                title: format!("Suppress `{}` on this line", diag.rule),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![lsp_diagnostic.clone()]),
                edit: Some(WorkspaceEdit {
                    changes: Some(HashMap::from([(uri.clone(), vec![edit])])),
                    ..Default::default()
                }),
                ..Default::default()
            }));
        }

        if diag.source == Source::AnsibleLint {
            let command = WorkspaceCommand::IgnoreRule {
                uri: uri.clone(),
                rule: diag.rule.clone(),
            };
            let title = format!("Add `{}` to ignore file", diag.rule);
            actions.push(CodeActionOrCommand::CodeAction(CodeAction {
                title: title.clone(),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![lsp_diagnostic.clone()]),
                command: Some(command.to_command(title)),
                ..Default::default()
            }));
        }

        // yamllint has no fix mode.
        if diag.fixable && diag.source != Source::Yamllint && fix_tools.insert(diag.source) {
            let command = WorkspaceCommand::Fix {
                uri: uri.clone(),
                tool: diag.source,
            };
            let title = format!("Fix with {}", diag.source.display_name());
            actions.push(CodeActionOrCommand::CodeAction(CodeAction {
                title: title.clone(),
                kind: Some(CodeActionKind::QUICKFIX),
                diagnostics: Some(vec![lsp_diagnostic]),
                command: Some(command.to_command(title)),
                ..Default::default()
            }));
        }
    }

    actions
}
