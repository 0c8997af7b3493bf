//! Severity levels and their normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
///
/// Declaration order doubles as sort order: errors first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Info - informational message.
    Info,
}

impl Severity {
    /// Maps a code-climate severity (`info`, `minor`, `major`, `critical`,
    /// `blocker`) onto the three-valued scale.
    ///
    /// Only `critical` and `major` are errors and only `info` is info;
    /// everything else, unknown strings included, is a warning.
    pub fn from_codeclimate(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" | "major" => Self::Error,
            "info" => Self::Info,
            _ => Self::Warning,
        }
    }

    /// Maps any severity word a supported tool is known to print.
    ///
    /// Total: unrecognized input is a warning.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" | "err" | "fatal" | "critical" | "major" | "blocker" | "failed"
            | "failure" => Self::Error,
            "info" | "information" | "note" | "hint" | "passed" | "skipped" => Self::Info,
            _ => Self::Warning,
        }
    }

    /// Returns the lowercase name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
