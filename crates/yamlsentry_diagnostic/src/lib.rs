//! # yamlsentry_diagnostic
//!
//! Diagnostic data model for yamlsentry.
//!
//! This crate provides:
//! - The normalized `Diagnostic` record every linter finding is turned into
//! - `Severity` normalization from the linters' heterogeneous vocabularies
//! - The closed set of tool `Source`s
//! - Static rule metadata: fixability, elaboration hints, documentation links
//!
//! ## Example
//!
//! ```rust
//! use yamlsentry_diagnostic::{Diagnostic, Severity, Source};
//!
//! let diag = Diagnostic::new("/work/main.yml", "yaml[truthy]", "Truthy value", Source::AnsibleLint)
//!     .with_position(5, 3)
//!     .with_severity(Severity::Warning);
//!
//! assert!(diag.fixable);
//! assert_eq!(diag.line, 5);
//! ```

mod diagnostic;
pub mod rules;
mod severity;
mod source;

pub use diagnostic::{Diagnostic, UNKNOWN};
pub use rules::RuleInfo;
pub use severity::Severity;
pub use source::{Source, UnknownSource};
