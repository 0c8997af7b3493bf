//! Checker error types.

use std::time::Duration;

use thiserror::Error;
use yamlsentry_diagnostic::Source;

/// Errors that can occur while checking files.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tool's executable could not be found.
    #[error("{tool} not found; install it or set tools.{tool}.path in the config")]
    ToolNotFound {
        /// The missing tool.
        tool: Source,
    },

    /// The tool ran but exited with a code that signals a crash.
    #[error("{tool} failed with {}: {stderr}", exit_description(.code))]
    ExecutionFailed {
        /// The failing tool.
        tool: Source,
        /// Exit code, or `None` when killed by a signal.
        code: Option<i32>,
        /// Start of the tool's stderr.
        stderr: String,
    },

    /// The tool did not finish in time and was killed.
    #[error("{tool} timed out after {}s", .timeout.as_secs())]
    Timeout {
        /// The slow tool.
        tool: Source,
        /// The limit that was exceeded.
        timeout: Duration,
    },

    /// The tool has no automatic fix mode.
    #[error("{0} cannot fix files automatically")]
    FixUnsupported(Source),

    /// File error.
    #[error("File error: {0}")]
    File(String),

    /// Parser option error.
    #[error("Parse error: {0}")]
    Parse(#[from] yamlsentry_parser::ParseError),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] yamlsentry_cache::CacheError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

impl CheckError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a tool-not-found error.
    pub fn tool_not_found(tool: Source) -> Self {
        Self::ToolNotFound { tool }
    }

    /// Returns the tool this error concerns, if any.
    pub fn tool(&self) -> Option<Source> {
        match self {
            Self::ToolNotFound { tool }
            | Self::ExecutionFailed { tool, .. }
            | Self::Timeout { tool, .. } => Some(*tool),
            Self::FixUnsupported(tool) => Some(*tool),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CheckError::ExecutionFailed {
            tool: Source::AnsibleLint,
            code: Some(3),
            stderr: "Traceback".to_string(),
        };
        assert_eq!(err.to_string(), "ansible-lint failed with exit code 3: Traceback");

        let err = CheckError::ExecutionFailed {
            tool: Source::Yamllint,
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("a signal"));

        let err = CheckError::Timeout {
            tool: Source::PreCommit,
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "pre-commit timed out after 30s");
    }

    #[test]
    fn test_error_tool() {
        assert_eq!(
            CheckError::tool_not_found(Source::Yamllint).tool(),
            Some(Source::Yamllint)
        );
        assert_eq!(CheckError::config("bad").tool(), None);
    }
}
