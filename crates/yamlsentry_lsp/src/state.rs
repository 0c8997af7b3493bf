//! LSP Backend state management.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

use tower_lsp::lsp_types::Url;

use yamlsentry_core::{Checker, Diagnostic};

/// Document content and version cache.
#[derive(Debug)]
pub(crate) struct DocumentData {
    pub text: String,
    pub version: i32,
}

/// Shared backend state.
pub(crate) struct BackendState {
    /// Document contents cache.
    pub documents: RwLock<HashMap<Url, DocumentData>>,
    /// Diagnostics from the last validation of each document.
    pub diagnostics: RwLock<HashMap<Url, Vec<Diagnostic>>>,
    /// Checker instance (None until a workspace root is known).
    pub checker: RwLock<Option<Arc<Checker>>>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    /// Whether the client lets us register file watchers.
    pub watch_registration: AtomicBool,
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("documents", &"<HashMap<Url, DocumentData>>")
            .field("checker", &"<Option<Checker>>")
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

impl BackendState {
    /// Creates a new empty state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            diagnostics: RwLock::new(HashMap::new()),
            checker: RwLock::new(None),
            workspace_root: RwLock::new(None),
            watch_registration: AtomicBool::new(false),
        }
    }

    /// Returns a handle to the current checker.
    pub fn checker(&self) -> Option<Arc<Checker>> {
        self.checker.read().ok().and_then(|guard| guard.clone())
    }

    /// Returns the stored text of an open document.
    pub fn document_text(&self, uri: &Url) -> Option<String> {
        let docs = self.documents.read().ok()?;
        docs.get(uri).map(|d| d.text.clone())
    }

    /// Returns the diagnostics last published for a document.
    pub fn last_diagnostics(&self, uri: &Url) -> Vec<Diagnostic> {
        self.diagnostics
            .read()
            .ok()
            .and_then(|diags| diags.get(uri).cloned())
            .unwrap_or_default()
    }

    /// Returns the URIs of all open documents.
    pub fn open_documents(&self) -> Vec<Url> {
        self.documents
            .read()
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for BackendState {
    fn default() -> Self {
        Self::new()
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<BackendState>;
