//! Document lifecycle handlers (open, change, save, close).
//!
//! The linters read files from disk, so only open and save trigger
//! validation. Changes are tracked to keep ranges and hover text current.

use tower_lsp::lsp_types::*;
use tracing::{debug, error};

use crate::state::{DocumentData, SharedState};

/// Handles the `textDocument/didOpen` notification.
pub async fn handle_did_open(
    state: &SharedState,
    params: DidOpenTextDocumentParams,
) -> (Url, Option<i32>) {
    debug!("Document opened: {}", params.text_document.uri);

    match state.documents.write() {
        Ok(mut docs) => {
            docs.insert(
                params.text_document.uri.clone(),
                DocumentData {
                    text: params.text_document.text,
                    version: params.text_document.version,
                },
            );
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }

    (params.text_document.uri, Some(params.text_document.version))
}

/// Handles the `textDocument/didChange` notification.
pub async fn handle_did_change(state: &SharedState, params: DidChangeTextDocumentParams) {
    debug!("Document changed: {}", params.text_document.uri);

    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    match state.documents.write() {
        Ok(mut docs) => {
            docs.insert(
                params.text_document.uri,
                DocumentData {
                    text: change.text,
                    version: params.text_document.version,
                },
            );
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }
}

/// Handles the `textDocument/didSave` notification.
pub async fn handle_did_save(
    state: &SharedState,
    params: DidSaveTextDocumentParams,
) -> (Url, Option<i32>) {
    debug!("Document saved: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    let version = match state.documents.read() {
        Ok(docs) => docs.get(&uri).map(|d| d.version),
        Err(e) => {
            error!("Documents lock poisoned: {}", e);
            None
        }
    };
    (uri, version)
}

/// Handles the `textDocument/didClose` notification.
pub async fn handle_did_close(state: &SharedState, params: DidCloseTextDocumentParams) -> Url {
    debug!("Document closed: {}", params.text_document.uri);

    let uri = params.text_document.uri;
    match state.documents.write() {
        Ok(mut docs) => {
            docs.remove(&uri);
        }
        Err(e) => error!("Documents lock poisoned: {}", e),
    }
    match state.diagnostics.write() {
        Ok(mut diags) => {
            diags.remove(&uri);
        }
        Err(e) => error!("Diagnostics lock poisoned: {}", e),
    }

    uri
}
