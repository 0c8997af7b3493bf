//! LSP request/notification handlers.

mod code_action;
mod commands;
mod documents;
mod files;
mod hover;
mod initialize;

pub use code_action::{build_code_actions, handle_code_action};
pub use commands::{FIX_COMMAND, IGNORE_RULE_COMMAND, WorkspaceCommand};
pub use documents::{handle_did_change, handle_did_close, handle_did_open, handle_did_save};
pub use files::{config_file_watchers, handle_did_change_watched_files};
pub use hover::{handle_hover, hover_markdown};
pub use initialize::{handle_initialize, handle_initialized, handle_shutdown};
