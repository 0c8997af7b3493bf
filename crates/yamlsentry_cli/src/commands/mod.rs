//! Subcommand implementations

mod check;
mod explain;
mod ignore;
mod init;
mod lsp;
mod parse;

pub use check::run_check;
pub use explain::run_explain;
pub use ignore::run_ignore;
pub use init::run_init;
pub use lsp::run_lsp;
pub use parse::run_parse;
