//! Dialect parser trait definition.

use yamlsentry_diagnostic::{Diagnostic, Source};

use crate::{Dialect, PathResolver};

/// Trait for turning one output dialect into diagnostics.
///
/// Implementations never fail: lines they do not recognize are dropped.
///
/// # Example
///
/// ```rust,ignore
/// use yamlsentry_parser::{ColumnParser, DialectParser, PathResolver};
/// use yamlsentry_diagnostic::Source;
///
/// let resolver = PathResolver::new("/work");
/// let diagnostics = ColumnParser.parse(
///     "main.yml:3:1: [truthy] Truthy value",
///     &resolver,
///     Source::Yamllint,
/// );
/// ```
pub trait DialectParser {
    /// Returns the dialect this parser handles.
    fn dialect(&self) -> Dialect;

    /// Parses sanitized output into diagnostics.
    ///
    /// # Arguments
    ///
    /// * `text` - Output with escape sequences already removed
    /// * `resolver` - Resolves reported paths against the tool's working directory
    /// * `source` - The tool that produced the output
    fn parse(&self, text: &str, resolver: &PathResolver, source: Source) -> Vec<Diagnostic>;
}
