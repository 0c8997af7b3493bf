//! Parse error types.

use thiserror::Error;
use yamlsentry_diagnostic::UnknownSource;

/// Errors raised while interpreting user-supplied parser options.
///
/// Malformed linter output is never an error: unrecognized lines are
/// dropped and the parsers return fewer diagnostics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The requested dialect name is not recognized.
    #[error("Unknown dialect '{0}' (expected structured, column or hook)")]
    UnknownDialect(String),

    /// The requested tool name is not recognized.
    #[error("Unknown tool '{0}' (expected yamllint, ansible-lint or pre-commit)")]
    UnknownTool(String),
}

impl ParseError {
    /// Creates a new unknown dialect error.
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Self::UnknownDialect(name.into())
    }

    /// Creates a new unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }
}

impl From<UnknownSource> for ParseError {
    fn from(err: UnknownSource) -> Self {
        Self::UnknownTool(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParseError::unknown_dialect("xml");
        assert!(err.to_string().contains("'xml'"));

        let err: ParseError = "flake8"
            .parse::<yamlsentry_diagnostic::Source>()
            .unwrap_err()
            .into();
        assert_eq!(err, ParseError::unknown_tool("flake8"));
    }
}
