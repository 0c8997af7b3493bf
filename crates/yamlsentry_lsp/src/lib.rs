//! yamlsentry LSP Server
//!
//! Language Server Protocol implementation for yamlsentry.
//! Runs yamllint, ansible-lint and pre-commit on open and save and publishes
//! their findings as editor diagnostics.

mod config;
pub mod conversion;
pub mod handler;
mod state;

use std::sync::Arc;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info};

use crate::conversion::to_lsp_diagnostic;
use crate::handler::WorkspaceCommand;
use crate::state::{BackendState, SharedState};

/// The LSP backend for yamlsentry.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state
    state: SharedState,
}

impl Backend {
    /// Creates a new backend with the given client.
    ///
    /// The checker is created during `initialize`, once the workspace root
    /// is known.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(BackendState::new()),
        }
    }

    /// Runs the checker on a document's file and publishes the results.
    async fn validate_document(&self, uri: &Url, version: Option<i32>) {
        debug!("Validating document: {}", uri);

        let path = match uri.to_file_path() {
            Ok(p) => p,
            Err(_) => {
                debug!("Skipping validation for non-file URI: {}", uri);
                return;
            }
        };

        let Some(checker) = self.state.checker() else {
            debug!("Checker not available, skipping validation");
            return;
        };

        let result = match checker.check_file(&path).await {
            Ok(result) => result,
            Err(e) => {
                error!("Check error: {}", e);
                return;
            }
        };

        for failure in &result.failures {
            self.client
                .log_message(
                    MessageType::WARNING,
                    format!("{}: {}", failure.tool, failure.message),
                )
                .await;
        }
        if let Err(e) = checker.save_cache() {
            debug!("Failed to save cache: {}", e);
        }

        // Tools may report other files, e.g. included roles.
        let diagnostics: Vec<_> = result
            .diagnostics
            .into_iter()
            .filter(|d| d.file == result.path)
            .collect();

        let text = self.state.document_text(uri);
        let lsp_diagnostics = diagnostics
            .iter()
            .map(|d| to_lsp_diagnostic(d, text.as_deref()))
            .collect();

        match self.state.diagnostics.write() {
            Ok(mut stored) => {
                stored.insert(uri.clone(), diagnostics);
            }
            Err(e) => error!("Diagnostics lock poisoned: {}", e),
        }

        self.client
            .publish_diagnostics(uri.clone(), lsp_diagnostics, version)
            .await;
    }

    /// Revalidates every open document.
    async fn validate_open_documents(&self) {
        for uri in self.state.open_documents() {
            self.validate_document(&uri, None).await;
        }
    }

    /// Carries out an ignore-file edit or a tool fix.
    async fn run_command(&self, command: &WorkspaceCommand) -> std::result::Result<(), String> {
        let checker = self
            .state
            .checker()
            .ok_or_else(|| "No workspace configuration loaded".to_string())?;
        let path = command
            .uri()
            .to_file_path()
            .map_err(|_| format!("Not a file: {}", command.uri()))?;

        match command {
            WorkspaceCommand::IgnoreRule { rule, .. } => {
                let mut ignore = checker.ignore_file().map_err(|e| e.to_string())?;
                if ignore.add(&path, rule) {
                    ignore.save().map_err(|e| e.to_string())?;
                    checker.invalidate(&path);
                    info!("Added {} for {} to {}", rule, path.display(), ignore.path().display());
                }
            }
            WorkspaceCommand::Fix { tool, .. } => {
                checker
                    .fix_file(&path, *tool)
                    .await
                    .map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handler::handle_initialize(&self.state, params).await
    }

    async fn initialized(&self, _: InitializedParams) {
        handler::handle_initialized(&self.state, &self.client).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handler::handle_shutdown(&self.state).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let (uri, version) = handler::handle_did_open(&self.state, params).await;
        self.validate_document(&uri, version).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handler::handle_did_change(&self.state, params).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let (uri, version) = handler::handle_did_save(&self.state, params).await;
        self.validate_document(&uri, version).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = handler::handle_did_close(&self.state, params).await;
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        if handler::handle_did_change_watched_files(&self.state, params).await {
            self.validate_open_documents().await;
        }
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        handler::handle_code_action(&self.state, params).await
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        handler::handle_hover(&self.state, params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        debug!("Execute command: {}", params.command);

        let Some(command) = WorkspaceCommand::parse(&params) else {
            return Err(tower_lsp::jsonrpc::Error::invalid_params(format!(
                "Unsupported command or arguments: {}",
                params.command
            )));
        };

        if let Err(message) = self.run_command(&command).await {
            error!("{} failed: {}", params.command, message);
            self.client.show_message(MessageType::ERROR, message).await;
            return Ok(None);
        }

        self.validate_document(command.uri(), None).await;
        Ok(None)
    }
}

/// Starts the LSP server.
///
/// This function does not return unless an error occurs or the server shuts down.
pub async fn run() {
    info!("yamlsentry LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
