//! Watched files handler.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use yamlsentry_core::CheckerConfig;

use crate::config::reload_config;
use crate::state::BackendState;

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns true when the configuration was reloaded.
pub async fn handle_did_change_watched_files(
    state: &BackendState,
    params: DidChangeWatchedFilesParams,
) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let config_changed = params.changes.iter().any(|change| {
        let path = change.uri.path();
        CheckerConfig::CONFIG_FILES
            .iter()
            .any(|name| path.ends_with(name))
    });

    if config_changed {
        info!("Configuration file changed, reloading...");
        reload_config(state);
    }
    config_changed
}

/// One watcher per config file name, anywhere in the workspace.
pub fn config_file_watchers() -> Vec<FileSystemWatcher> {
    CheckerConfig::CONFIG_FILES
        .iter()
        .map(|name| FileSystemWatcher {
            glob_pattern: GlobPattern::String(format!("**/{name}")),
            kind: None,
        })
        .collect()
}
