//! Static rule metadata.
//!
//! Fixability, elaboration hints and documentation links are pure functions
//! of the rule identifier. The tables are plain `const` slices; lookups scan
//! them in declaration order.

use serde::Serialize;

use crate::{Source, UNKNOWN};

/// Rules with a known automatic remedy.
///
/// Matching is a substring test in both directions, so `yaml[truthy]` and
/// `truthy` both hit the same entry.
pub const FIXABLE_RULES: &[&str] = &[
    // yamllint
    "trailing-spaces",
    "truthy",
    "new-line-at-end-of-file",
    "new-lines",
    "empty-lines",
    "indentation",
    "key-order",
    "comments",
    "comments-indentation",
    "document-start",
    "braces",
    "brackets",
    "colons",
    "commas",
    "hyphens",
    // ansible-lint
    "yaml[trailing-spaces]",
    "yaml[truthy]",
    "name[missing]",
    "name[casing]",
    "fqcn",
    "no-free-form",
    "jinja[spacing]",
    "deprecated-local-action",
    "partial-become",
    // pre-commit fixer hooks
    "trailing-whitespace",
    "end-of-file-fixer",
    "mixed-line-ending",
    "fix-byte-order-marker",
    "pretty-format-json",
];

/// Hints appended to messages, keyed by a substring of the rule.
///
/// First match wins, so more specific keys come first.
pub const HINTS: &[(&str, &str)] = &[
    (
        "load-failure",
        "The file could not be parsed as YAML. Check indentation and quoting around the reported line.",
    ),
    (
        "syntax-check",
        "Ansible rejected the playbook structure. Run `ansible-playbook --syntax-check` for details.",
    ),
    (
        "trailing-spaces",
        "Remove the whitespace at the end of the line.",
    ),
    (
        "trailing-whitespace",
        "Remove the whitespace at the end of the line.",
    ),
    (
        "truthy",
        "Use `true` or `false`. Values like `yes`, `no`, `on` and `off` are ambiguous between YAML versions.",
    ),
    (
        "new-line-at-end-of-file",
        "Add a single newline character at the end of the file.",
    ),
    (
        "end-of-file-fixer",
        "Files should end with exactly one newline.",
    ),
    (
        "line-length",
        "Split long lines with YAML folded (`>`) or literal (`|`) block scalars.",
    ),
    (
        "indentation",
        "Use a consistent number of spaces per indentation level.",
    ),
    (
        "document-start",
        "Start the document with `---`.",
    ),
    (
        "key-duplicates",
        "A mapping defines the same key twice; only the last value is kept.",
    ),
    (
        "name[missing]",
        "Give every task a `name:` so its purpose shows up in the play output.",
    ),
    (
        "name[casing]",
        "Task and play names should start with an uppercase letter.",
    ),
    (
        "fqcn",
        "Use the fully-qualified collection name, e.g. `ansible.builtin.copy` instead of `copy`.",
    ),
    (
        "no-changed-when",
        "Commands should declare `changed_when` so reruns report changes accurately.",
    ),
    (
        "risky-file-permissions",
        "Set an explicit `mode:` on modules that create files.",
    ),
    (
        "var-naming",
        "Variable names should be lowercase snake_case and must not collide with reserved names.",
    ),
    (
        "no-free-form",
        "Pass module arguments as a mapping instead of a free-form string.",
    ),
    (
        "jinja",
        "Jinja expressions should have a single space inside the braces: `{{ var }}`.",
    ),
    (
        "schema",
        "The file does not match the expected Ansible schema for its type.",
    ),
    (
        "check-yaml",
        "The hook could not load the file as YAML.",
    ),
];

/// Whether the rule has a known automatic remedy.
pub fn is_fixable(rule: &str) -> bool {
    if rule.is_empty() || rule == UNKNOWN {
        return false;
    }
    FIXABLE_RULES
        .iter()
        .any(|entry| rule == *entry || rule.contains(entry) || entry.contains(rule))
}

/// Returns the first hint whose key appears in the rule.
pub fn hint(rule: &str) -> Option<&'static str> {
    HINTS
        .iter()
        .find(|(key, _)| rule.contains(key))
        .map(|(_, hint)| *hint)
}

/// Appends the rule's hint to the message, or returns the message unchanged.
pub fn elaborate(rule: &str, message: &str) -> String {
    match hint(rule) {
        Some(hint) => format!("{message}\n\n{hint}"),
        None => message.to_string(),
    }
}

/// Returns the rule name without any bracketed subtype.
pub fn base_rule(rule: &str) -> &str {
    rule.split('[').next().unwrap_or(rule).trim()
}

/// Builds the documentation link for a rule reported by `source`.
pub fn documentation_url(rule: &str, source: Source) -> Option<String> {
    let base = base_rule(rule);
    if base.is_empty() || base == UNKNOWN {
        return None;
    }

    let url = match source {
        Source::Yamllint => format!(
            "https://yamllint.readthedocs.io/en/stable/rules.html#module-yamllint.rules.{base}"
        ),
        Source::AnsibleLint => format!("https://ansible.readthedocs.io/projects/lint/rules/{base}/"),
        Source::PreCommit => format!("https://github.com/pre-commit/pre-commit-hooks#{base}"),
    };
    Some(url)
}

/// Everything known about a rule, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub rule: String,
    pub source: Source,
    pub fixable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl RuleInfo {
    /// Looks up all metadata for a rule.
    pub fn resolve(rule: &str, source: Source) -> Self {
        let rule = rule.trim();
        Self {
            rule: rule.to_string(),
            source,
            fixable: is_fixable(rule),
            hint: hint(rule),
            documentation_url: documentation_url(rule, source),
        }
    }
}
