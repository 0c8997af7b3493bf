//! Check result types.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use yamlsentry_diagnostic::{Diagnostic, Severity, Source};

/// A tool that could not produce diagnostics for a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailure {
    /// The tool that failed.
    pub tool: Source,
    /// Human-readable reason.
    pub message: String,
}

/// Result of checking a single file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Path to the checked file.
    pub path: PathBuf,

    /// Merged diagnostics from every tool.
    pub diagnostics: Vec<Diagnostic>,

    /// Whether the result was loaded from cache.
    pub from_cache: bool,

    /// Time spent in each tool.
    #[serde(skip)]
    pub timings: Vec<(Source, Duration)>,

    /// Tools that failed to run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<ToolFailure>,
}

impl CheckResult {
    /// Creates a new check result.
    pub fn new(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            diagnostics,
            ..Self::default()
        }
    }

    /// Creates a cached check result.
    pub fn cached(path: PathBuf, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            path,
            diagnostics,
            from_cache: true,
            ..Self::default()
        }
    }

    /// Returns true if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Counts diagnostics of one severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Summary of checking multiple files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Total files processed.
    pub files_checked: usize,

    /// Files loaded from cache.
    pub files_from_cache: usize,

    /// Total diagnostics found.
    pub total_diagnostics: usize,

    /// Error-severity diagnostics.
    pub errors: usize,

    /// Warning-severity diagnostics.
    pub warnings: usize,

    /// Info-severity diagnostics.
    pub infos: usize,

    /// Files with at least one error.
    pub files_with_errors: usize,

    /// Tool failures across all files.
    pub tool_failures: usize,
}

impl CheckSummary {
    /// Creates a summary from results.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            summary.files_checked += 1;
            if result.from_cache {
                summary.files_from_cache += 1;
            }
            summary.total_diagnostics += result.diagnostics.len();
            summary.errors += result.count(Severity::Error);
            summary.warnings += result.count(Severity::Warning);
            summary.infos += result.count(Severity::Info);
            if result.has_errors() {
                summary.files_with_errors += 1;
            }
            summary.tool_failures += result.failures.len();
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn diag(severity: Severity) -> Diagnostic {
        Diagnostic::new("/w/a.yml", "truthy", "msg", Source::Yamllint).with_severity(severity)
    }

    #[test]
    fn test_check_result_new() {
        let result = CheckResult::new(PathBuf::from("a.yml"), vec![diag(Severity::Warning)]);
        assert!(!result.has_errors());
        assert!(!result.from_cache);
    }

    #[test]
    fn test_check_result_cached() {
        let result = CheckResult::cached(PathBuf::from("a.yml"), vec![diag(Severity::Error)]);
        assert!(result.from_cache);
        assert!(result.has_errors());
    }

    #[test]
    fn test_check_summary() {
        let mut failed = CheckResult::new(PathBuf::from("c.yml"), vec![]);
        failed.failures.push(ToolFailure {
            tool: Source::PreCommit,
            message: "pre-commit not found".to_string(),
        });

        let results = vec![
            CheckResult::new(
                PathBuf::from("a.yml"),
                vec![diag(Severity::Error), diag(Severity::Info)],
            ),
            CheckResult::cached(PathBuf::from("b.yml"), vec![diag(Severity::Warning)]),
            failed,
        ];

        let summary = CheckSummary::from_results(&results);

        assert_eq!(summary.files_checked, 3);
        assert_eq!(summary.files_from_cache, 1);
        assert_eq!(summary.total_diagnostics, 3);
        assert_eq!((summary.errors, summary.warnings, summary.infos), (1, 1, 1));
        assert_eq!(summary.files_with_errors, 1);
        assert_eq!(summary.tool_failures, 1);
    }
}
