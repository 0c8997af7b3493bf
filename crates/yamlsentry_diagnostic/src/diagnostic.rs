//! Diagnostic types for linter findings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{Severity, Source, rules};

/// Placeholder used when a tool omits a rule or message.
pub const UNKNOWN: &str = "unknown";

/// A normalized finding reported by one of the external linters.
///
/// Field order matters: the derived `Ord` sorts by file, then position,
/// then tool and rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// File the finding refers to.
    pub file: PathBuf,

    /// 1-based line number.
    pub line: u32,

    /// 1-based column number.
    pub column: u32,

    /// The tool that reported the finding.
    pub source: Source,

    /// Rule identifier, verbatim as the tool printed it.
    pub rule: String,

    /// Human-readable explanation.
    pub message: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Whether an automatic remedy is known for the rule.
    #[serde(default)]
    pub fixable: bool,

    /// Message extended with a rule-specific hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_explanation: Option<String>,

    /// Link to the rule's documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// UI grouping label assigned by the orchestrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_group: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic at line 1, column 1.
    ///
    /// Empty rules and messages are replaced by [`UNKNOWN`]. Fixability,
    /// elaboration and documentation link are derived from the rule.
    pub fn new(
        file: impl Into<PathBuf>,
        rule: impl Into<String>,
        message: impl Into<String>,
        source: Source,
    ) -> Self {
        let rule = non_empty(rule.into());
        let message = non_empty(message.into());

        let fixable = rules::is_fixable(&rule);
        let detailed_explanation = rules::hint(&rule).map(|_| rules::elaborate(&rule, &message));
        let documentation_url = rules::documentation_url(&rule, source);

        Self {
            file: file.into(),
            line: 1,
            column: 1,
            source,
            rule,
            message,
            severity: Severity::default(),
            fixable,
            detailed_explanation,
            documentation_url,
            check_group: None,
        }
    }

    /// Sets line and column. Zero values are clamped to 1.
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = line.max(1);
        self.column = column.max(1);
        self
    }

    /// Sets the line, keeping the column.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line.max(1);
        self
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Overrides the catalogue-derived fixability.
    pub fn with_fixable(mut self, fixable: bool) -> Self {
        self.fixable = fixable;
        self
    }

    /// Replaces the documentation link.
    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    /// Sets the check group.
    pub fn with_check_group(mut self, group: impl Into<String>) -> Self {
        self.check_group = Some(group.into());
        self
    }

    /// Returns true for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

fn non_empty(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}
