//! Configuration management for LSP server.

use std::sync::Arc;

use tracing::{error, info};

use yamlsentry_core::{Checker, CheckerConfig};

use crate::state::BackendState;

/// Rebuilds the checker from the configuration nearest the workspace root.
///
/// An invalid configuration leaves no checker, so nothing is validated until
/// it is fixed.
pub fn reload_config(state: &BackendState) {
    let root = match state.workspace_root.read() {
        Ok(guard) => match guard.as_ref() {
            Some(root) => root.clone(),
            None => return,
        },
        Err(e) => {
            error!("Workspace root lock poisoned: {}", e);
            return;
        }
    };

    let checker = match CheckerConfig::load_or_default(&root) {
        Ok(config) => {
            info!("Loaded configuration for {}", root.display());
            Some(Arc::new(Checker::new(config, &root)))
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
            None
        }
    };

    match state.checker.write() {
        Ok(mut guard) => *guard = checker,
        Err(e) => error!("Checker lock poisoned: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reload_without_root_keeps_no_checker() {
        let state = BackendState::new();
        reload_config(&state);
        assert!(state.checker().is_none());
    }

    #[test]
    fn test_reload_builds_checker_for_root() {
        let dir = tempfile::tempdir().unwrap();
        let state = BackendState::new();
        *state.workspace_root.write().unwrap() = Some(dir.path().to_path_buf());

        reload_config(&state);

        let checker = state.checker().unwrap();
        assert_eq!(checker.root(), dir.path());
    }

    #[test]
    fn test_invalid_config_drops_checker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".yamlsentry.json"), r#"{"cache": "yes"}"#).unwrap();
        let state = BackendState::new();
        *state.workspace_root.write().unwrap() = Some(dir.path().to_path_buf());

        reload_config(&state);

        assert!(state.checker().is_none());
    }
}
