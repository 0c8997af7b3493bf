//! Initialize and shutdown handlers.

use std::sync::atomic::Ordering;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tracing::{error, info, warn};

use super::commands::{FIX_COMMAND, IGNORE_RULE_COMMAND};
use super::files::config_file_watchers;
use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `initialize` LSP request.
pub async fn handle_initialize(
    state: &BackendState,
    params: InitializeParams,
) -> Result<InitializeResult> {
    info!("yamlsentry LSP server initializing...");

    let dynamic_watch = params
        .capabilities
        .workspace
        .as_ref()
        .and_then(|w| w.did_change_watched_files.as_ref())
        .and_then(|w| w.dynamic_registration)
        .unwrap_or(false);
    state
        .watch_registration
        .store(dynamic_watch, Ordering::Relaxed);

    let root = params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| folder.uri.clone())
        .or(params.root_uri)
        .and_then(|uri| uri.to_file_path().ok());

    if let Some(path) = root {
        match state.workspace_root.write() {
            Ok(mut root) => {
                *root = Some(path);
            }
            Err(e) => {
                error!("Workspace root lock poisoned: {}", e);
                return Ok(InitializeResult::default());
            }
        }

        reload_config(state);
    }

    Ok(InitializeResult {
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    change: Some(TextDocumentSyncKind::FULL),
                    save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                        include_text: Some(false),
                    })),
                    ..Default::default()
                },
            )),
            code_action_provider: Some(CodeActionProviderCapability::Options(CodeActionOptions {
                code_action_kinds: Some(vec![CodeActionKind::QUICKFIX]),
                resolve_provider: Some(false),
                work_done_progress_options: Default::default(),
            })),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![IGNORE_RULE_COMMAND.to_string(), FIX_COMMAND.to_string()],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        },
        server_info: Some(ServerInfo {
            name: "yamlsentry-lsp".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
    })
}

/// Handles the `initialized` LSP notification.
///
/// Registers config-file watchers when the client supports it.
pub async fn handle_initialized(state: &BackendState, client: &tower_lsp::Client) {
    client
        .log_message(MessageType::INFO, "yamlsentry LSP server initialized!")
        .await;

    if !state.watch_registration.load(Ordering::Relaxed) {
        return;
    }

    let options = DidChangeWatchedFilesRegistrationOptions {
        watchers: config_file_watchers(),
    };
    let registration = Registration {
        id: "yamlsentry-config-watcher".to_string(),
        method: "workspace/didChangeWatchedFiles".to_string(),
        register_options: serde_json::to_value(options).ok(),
    };
    if let Err(e) = client.register_capability(vec![registration]).await {
        warn!("Failed to register config watcher: {}", e);
    }
}

/// Handles the `shutdown` LSP request.
pub async fn handle_shutdown(state: &BackendState) -> Result<()> {
    info!("yamlsentry LSP server shutting down...");
    if let Some(checker) = state.checker()
        && let Err(e) = checker.save_cache()
    {
        warn!("Failed to save cache: {}", e);
    }
    Ok(())
}
