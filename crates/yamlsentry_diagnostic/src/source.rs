//! The linters a diagnostic can originate from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The external tool that reported a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Source {
    /// The YAML style checker.
    #[serde(rename = "yamllint")]
    Yamllint,
    /// The Ansible-specific linter.
    #[serde(rename = "ansible-lint")]
    AnsibleLint,
    /// The pre-commit hook runner.
    #[serde(rename = "pre-commit")]
    PreCommit,
}

impl Source {
    /// All supported tools, in the order they are run.
    pub const ALL: [Source; 3] = [Source::Yamllint, Source::AnsibleLint, Source::PreCommit];

    /// Returns the tool identifier (also its executable name).
    pub fn id(&self) -> &'static str {
        match self {
            Self::Yamllint => "yamllint",
            Self::AnsibleLint => "ansible-lint",
            Self::PreCommit => "pre-commit",
        }
    }

    /// Returns a human-readable tool name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Yamllint => "yamllint",
            Self::AnsibleLint => "Ansible Lint",
            Self::PreCommit => "pre-commit",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a tool identifier is not one of the supported tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl fmt::Display for UnknownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown tool '{}' (expected yamllint, ansible-lint or pre-commit)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSource {}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yamllint" => Ok(Self::Yamllint),
            "ansible-lint" | "ansible_lint" | "ansiblelint" => Ok(Self::AnsibleLint),
            "pre-commit" | "pre_commit" | "precommit" => Ok(Self::PreCommit),
            _ => Err(UnknownSource(s.to_string())),
        }
    }
}
