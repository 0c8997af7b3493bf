//! Parser for pre-commit run transcripts.
//!
//! A transcript is a sequence of blocks, one per hook:
//!
//! ```text
//! check yaml...............................................................Failed
//! - hook id: check-yaml
//! - exit code: 1
//!
//! while parsing a block mapping
//!   in "tasks/main.yml", line 1, column 1
//! ```
//!
//! Free-text lines accumulate as context and become the message of the next
//! located record.

use std::sync::LazyLock;

use regex::Regex;
use yamlsentry_diagnostic::{Diagnostic, Severity, Source, UNKNOWN};

use crate::column::parse_number;
use crate::{Dialect, DialectParser, PathResolver};

static HOOK_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*hook id:\s*(\S+)").expect("Invalid hook id regex"));

static METADATA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*(?:files were modified by this hook|exit code:|duration:)")
        .expect("Invalid metadata regex")
});

/// `<hook name>.....[(reason)]<status>`, the dotted leader pre-commit prints.
static STATUS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.{3,}(?:\(.*\))?(?:Passed|Failed|Skipped)$").expect("Invalid status regex")
});

static FIXING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Fixing\s+(.+)$").expect("Invalid fixing regex"));

/// `in "<path>", line N[, column M]`, as printed by YAML loaders.
static LOCATED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^in "([^"]+)", line (\d+)(?:, column (\d+))?"#).expect("Invalid located regex")
});

static COLUMN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+?):(\d+):(\d+):\s*(.+)$").expect("Invalid column regex")
});

static FILE_MESSAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+?\.(?:yaml|yml|json|toml|j2|jinja2|cfg|ini|md|py|sh|txt)):\s*(.+)$")
        .expect("Invalid file message regex")
});

static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-=.*]+$").expect("Invalid separator regex"));

const SYNTAX_ERROR_MESSAGE: &str = "YAML syntax error";

/// Message for a `Fixing <path>` line, by hook.
fn fixing_message(hook: Option<&str>) -> &'static str {
    match hook {
        Some("trailing-whitespace") => "Trailing whitespace removed",
        Some("end-of-file-fixer") => "Newline appended at end of file",
        Some("mixed-line-ending") => "Line endings normalized",
        _ => "File modified by hook",
    }
}

/// Parser for the hook-transcript dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct HookParser;

impl HookParser {
    /// Creates a new hook parser.
    pub fn new() -> Self {
        Self
    }
}

impl DialectParser for HookParser {
    fn dialect(&self) -> Dialect {
        Dialect::HookTranscript
    }

    fn parse(&self, text: &str, resolver: &PathResolver, source: Source) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut current_hook: Option<String> = None;
        let mut context: Vec<String> = Vec::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || SEPARATOR_REGEX.is_match(line) {
                continue;
            }

            if let Some(caps) = HOOK_ID_REGEX.captures(line) {
                current_hook = Some(caps[1].to_string());
                context.clear();
                continue;
            }

            if METADATA_REGEX.is_match(line) {
                continue;
            }

            if STATUS_REGEX.is_match(line) {
                context.clear();
                continue;
            }

            let rule = current_hook.as_deref().unwrap_or(UNKNOWN);

            if let Some(caps) = FIXING_REGEX.captures(line) {
                diagnostics.push(
                    Diagnostic::new(
                        resolver.resolve_normalized(&caps[1]),
                        rule,
                        fixing_message(current_hook.as_deref()),
                        source,
                    )
                    .with_severity(Severity::Info)
                    .with_fixable(current_hook.is_some()),
                );
                continue;
            }

            if let Some(caps) = LOCATED_REGEX.captures(line) {
                let message = if context.is_empty() {
                    SYNTAX_ERROR_MESSAGE.to_string()
                } else {
                    context.join(" ")
                };
                let column = caps.get(3).map_or(1, |m| parse_number(m.as_str()));

                diagnostics.push(
                    Diagnostic::new(resolver.resolve_normalized(&caps[1]), rule, message, source)
                        .with_position(parse_number(&caps[2]), column)
                        .with_severity(Severity::Error),
                );
                context.clear();
                continue;
            }

            if let Some(caps) = COLUMN_REGEX.captures(line) {
                diagnostics.push(
                    Diagnostic::new(resolver.resolve_normalized(&caps[1]), rule, &caps[4], source)
                        .with_position(parse_number(&caps[2]), parse_number(&caps[3]))
                        .with_severity(Severity::Warning),
                );
                continue;
            }

            if let Some(caps) = FILE_MESSAGE_REGEX.captures(line) {
                diagnostics.push(
                    Diagnostic::new(resolver.resolve_normalized(&caps[1]), rule, &caps[2], source)
                        .with_severity(Severity::Warning),
                );
                continue;
            }

            context.push(line.to_string());
        }

        diagnostics
    }
}
