//! # yamlsentry_core
//!
//! Checker engine for yamlsentry.
//!
//! This crate provides:
//! - The `Checker` orchestrator that runs yamllint, ansible-lint and pre-commit
//! - Configuration loading and validation
//! - Tool discovery and subprocess execution
//! - File discovery, ignore files and SARIF output
//!
//! ## Example
//!
//! ```rust,ignore
//! use yamlsentry_core::{Checker, CheckerConfig};
//!
//! let config = CheckerConfig::load_or_default(&root)?;
//! let checker = Checker::new(config, &root);
//!
//! let files = checker.discover(&[])?;
//! let outcome = checker.check_files(&files).await;
//! for result in outcome.results {
//!     println!("{}: {} issues", result.path.display(), result.diagnostics.len());
//! }
//! ```

mod aggregator;
mod checker;
mod config;
mod error;
pub mod file_finder;
pub mod formatters;
mod ignore;
mod result;
pub mod runner;

pub use aggregator::Aggregator;
pub use checker::{CheckFilesResult, Checker};
pub use config::{CheckerConfig, DEFAULT_TIMEOUT_SECS, ToolConfig, default_check_group};
pub use error::CheckError;
pub use file_finder::FileFinder;
pub use formatters::generate_sarif;
pub use ignore::{IgnoreFile, inline_suppression};
pub use result::{CheckResult, CheckSummary, ToolFailure};
pub use runner::{ExecutionResult, ToolCommand, ToolLocator};

pub use yamlsentry_diagnostic::{Diagnostic, RuleInfo, Severity, Source};
pub use yamlsentry_parser::Dialect;
