//! # yamlsentry_parser
//!
//! Turns the captured text output of yamllint, ansible-lint and pre-commit
//! into [`Diagnostic`]s.
//!
//! This crate provides:
//! - A sanitizer that strips terminal escape sequences
//! - A classifier that guesses which [`Dialect`] the output is in
//! - One [`DialectParser`] per dialect: structured JSON, column-based, and
//!   hook transcript
//!
//! ## Architecture
//!
//! ```text
//! raw output -> sanitize -> classify (unless overridden) -> dialect parser -> Vec<Diagnostic>
//! ```
//!
//! Parsing never fails. Lines that match no known shape are dropped, and
//! malformed JSON falls back to the column parser.
//!
//! ## Example
//!
//! ```rust
//! use yamlsentry_diagnostic::Source;
//! use yamlsentry_parser::{PathResolver, parse};
//!
//! let output = "main.yml:12:1: [yaml[trailing-spaces]] Trailing spaces\n";
//! let diagnostics = parse(output, &PathResolver::new("/work"), Source::AnsibleLint);
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].line, 12);
//! ```

mod classify;
mod column;
mod error;
mod hook;
mod path;
mod sanitize;
mod structured;
mod traits;

pub use classify::{Dialect, classify};
pub use column::ColumnParser;
pub use error::ParseError;
pub use hook::HookParser;
pub use path::{PathResolver, normalize};
pub use sanitize::{STRAY_FRAGMENTS, sanitize};
pub use structured::StructuredParser;
pub use traits::DialectParser;

use tracing::debug;
use yamlsentry_diagnostic::{Diagnostic, Source};

/// Returns the parser for a dialect.
pub fn parser_for(dialect: Dialect) -> &'static dyn DialectParser {
    match dialect {
        Dialect::Structured => &StructuredParser,
        Dialect::ColumnBased => &ColumnParser,
        Dialect::HookTranscript => &HookParser,
    }
}

/// Sanitizes, classifies and parses linter output.
pub fn parse(text: &str, resolver: &PathResolver, source: Source) -> Vec<Diagnostic> {
    parse_with(text, resolver, source, None)
}

/// Like [`parse`], with an optional dialect that bypasses classification.
pub fn parse_with(
    text: &str,
    resolver: &PathResolver,
    source: Source,
    dialect: Option<Dialect>,
) -> Vec<Diagnostic> {
    let clean = sanitize(text);
    if clean.trim().is_empty() {
        return Vec::new();
    }

    let Some(dialect) = dialect.or_else(|| classify(&clean)) else {
        return Vec::new();
    };

    let diagnostics = parser_for(dialect).parse(&clean, resolver, source);
    debug!(
        "Parsed {} diagnostic(s) from {} output as {}",
        diagnostics.len(),
        source,
        dialect
    );
    diagnostics
}
