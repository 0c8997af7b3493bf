//! Turning captured tool output into one ordered diagnostic list.

use std::path::PathBuf;

use yamlsentry_diagnostic::{Diagnostic, Source};
use yamlsentry_parser::{Dialect, PathResolver, parse_with};

use crate::ExecutionResult;

/// Parses execution results relative to a project root.
#[derive(Debug, Clone)]
pub struct Aggregator {
    resolver: PathResolver,
}

impl Aggregator {
    /// Creates an aggregator resolving relative paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(root),
        }
    }

    /// Parses one tool's output.
    ///
    /// The parsed list is also stored in `execution.diagnostics`.
    pub fn parse_execution(
        &self,
        execution: &mut ExecutionResult,
        source: Source,
        dialect: Option<Dialect>,
        check_group: Option<&str>,
    ) -> Vec<Diagnostic> {
        let combined = execution.combined_output();
        let mut diagnostics = parse_with(&combined, &self.resolver, source, dialect);

        if let Some(group) = check_group {
            for diagnostic in &mut diagnostics {
                diagnostic.check_group = Some(group.to_string());
            }
        }

        execution.diagnostics = diagnostics.clone();
        diagnostics
    }

    /// Flattens per-tool lists, orders by file, position, tool and rule,
    /// and drops exact duplicates.
    pub fn merge(lists: impl IntoIterator<Item = Vec<Diagnostic>>) -> Vec<Diagnostic> {
        let mut merged: Vec<Diagnostic> = lists.into_iter().flatten().collect();
        // Field order of `Diagnostic` puts file, line, column, source and
        // rule first, and keeps exact duplicates adjacent.
        merged.sort();
        merged.dedup();
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use yamlsentry_diagnostic::Severity;

    fn execution(tool: Source, stdout: &str, stderr: &str) -> ExecutionResult {
        ExecutionResult::new(tool, stdout, stderr, Some(1), Duration::from_millis(5))
    }

    #[test]
    fn test_parse_execution_writes_back() {
        let aggregator = Aggregator::new("/work");
        let mut exec = execution(
            Source::Yamllint,
            "site.yml:3:1: [warning] truthy value should be one of [false, true] (truthy)\n",
            "",
        );

        let diagnostics =
            aggregator.parse_execution(&mut exec, Source::Yamllint, None, Some("YAML style"));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].check_group.as_deref(), Some("YAML style"));
        assert_eq!(exec.diagnostics, diagnostics);
    }

    #[test]
    fn test_parse_execution_reads_stderr() {
        let aggregator = Aggregator::new("/work");
        let mut exec = execution(
            Source::PreCommit,
            "check yaml.....Failed\n- hook id: check-yaml\n- exit code: 1\n",
            "while scanning a simple key\n  in \"site.yml\", line 4, column 1\n",
        );

        let diagnostics = aggregator.parse_execution(&mut exec, Source::PreCommit, None, None);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].message, "while scanning a simple key");
        assert!(diagnostics[0].check_group.is_none());
    }

    #[test]
    fn test_parse_execution_hook_transcript_after_log_lines() {
        let aggregator = Aggregator::new("/work");
        let mut exec = execution(
            Source::PreCommit,
            "[WARNING] Unstaged files detected.\n\
             [INFO] Stashing unstaged files to /home/dev/.cache/pre-commit/patch1.\n\
             trim trailing whitespace.................................................Failed\n\
             - hook id: trailing-whitespace\n\
             - exit code: 1\n\
             - files were modified by this hook\n\
             \n\
             Fixing tasks/main.yml\n\
             \n\
             [INFO] Restored changes from /home/dev/.cache/pre-commit/patch1.\n",
            "",
        );

        let diagnostics = aggregator.parse_execution(&mut exec, Source::PreCommit, None, None);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "trailing-whitespace");
        assert_eq!(diagnostics[0].file, PathBuf::from("/work/tasks/main.yml"));
        assert!(diagnostics[0].fixable);
    }

    #[test]
    fn test_parse_execution_empty_output() {
        let aggregator = Aggregator::new("/work");
        let mut exec = execution(Source::AnsibleLint, "", "  \n");

        let diagnostics = aggregator.parse_execution(&mut exec, Source::AnsibleLint, None, None);

        assert!(diagnostics.is_empty());
        assert!(exec.diagnostics.is_empty());
    }

    #[test]
    fn test_parse_execution_dialect_override() {
        let aggregator = Aggregator::new("/work");
        let mut exec = execution(
            Source::AnsibleLint,
            "site.yml:2:1: [load-failure] Failed to load\n",
            "",
        );

        let diagnostics = aggregator.parse_execution(
            &mut exec,
            Source::AnsibleLint,
            Some(Dialect::ColumnBased),
            None,
        );

        assert_eq!(diagnostics[0].rule, "load-failure");
    }

    #[test]
    fn test_merge_orders_and_dedups() {
        let a = Diagnostic::new("/w/b.yml", "truthy", "x", Source::Yamllint).with_position(2, 1);
        let b = Diagnostic::new("/w/a.yml", "fqcn", "y", Source::AnsibleLint).with_position(9, 1);
        let c = Diagnostic::new("/w/a.yml", "truthy", "z", Source::Yamllint).with_position(9, 1);

        let merged = Aggregator::merge(vec![vec![a.clone(), b.clone()], vec![c.clone(), a.clone()]]);

        assert_eq!(merged, vec![c, b, a]);
    }
}
