//! Parser for `path:line:col` style output.
//!
//! Handles yamllint's parsable format and ansible-lint's pep8 format,
//! including the two-line variant where a rule header precedes one
//! location line.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;
use yamlsentry_diagnostic::{Diagnostic, Severity, Source};

use crate::{Dialect, DialectParser, PathResolver};

/// `path:line:col: [rule] message`
static SINGLE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(\d+):(\d+):\s*\[(.+?)\]\s+(.*)$").expect("Invalid single-line regex")
});

/// `rule[type]: message (warning)`
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w.-]+(?:\[[\w.-]+\])?):\s+(.+?)\s+\((warning|error)\)$")
        .expect("Invalid header regex")
});

/// `path:line[:col] rest`
static LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+?):(\d+)(?::(\d+))?:?(?:\s+(.*))?$").expect("Invalid location regex")
});

/// `message (rule)`, as yamllint appends the rule name.
static TRAILING_RULE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s*\(([\w.\[\]-]+)\)$").expect("Invalid trailing rule regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum ColumnState {
    Idle,
    AwaitingLocation { rule: String, message: String },
}

/// Parser for the column-based dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnParser;

impl ColumnParser {
    /// Creates a new column parser.
    pub fn new() -> Self {
        Self
    }

    fn single_line(caps: &Captures<'_>, resolver: &PathResolver, source: Source) -> Diagnostic {
        let token = caps[4].trim();
        let message = caps[5].trim();

        let level = token.to_ascii_lowercase();
        if (level == "error" || level == "warning")
            && let Some(trailing) = TRAILING_RULE_REGEX.captures(message)
        {
            return Diagnostic::new(resolver.resolve(&caps[1]), &trailing[2], &trailing[1], source)
                .with_position(parse_number(&caps[2]), parse_number(&caps[3]))
                .with_severity(Severity::normalize(&level));
        }

        Diagnostic::new(resolver.resolve(&caps[1]), token, message, source)
            .with_position(parse_number(&caps[2]), parse_number(&caps[3]))
            .with_severity(Severity::Warning)
    }
}

impl DialectParser for ColumnParser {
    fn dialect(&self) -> Dialect {
        Dialect::ColumnBased
    }

    fn parse(&self, text: &str, resolver: &PathResolver, source: Source) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let mut state = ColumnState::Idle;

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = SINGLE_LINE_REGEX.captures(line) {
                diagnostics.push(Self::single_line(&caps, resolver, source));
                continue;
            }

            if let Some(caps) = HEADER_REGEX.captures(line) {
                state = ColumnState::AwaitingLocation {
                    rule: caps[1].to_string(),
                    message: caps[2].trim().to_string(),
                };
                continue;
            }

            if let ColumnState::AwaitingLocation { rule, message } = &state
                && let Some(caps) = LOCATION_REGEX.captures(line)
            {
                let rest = caps.get(4).map_or("", |m| m.as_str().trim());
                let full_message = if rest.is_empty() {
                    message.clone()
                } else {
                    format!("{message}: {rest}")
                };
                let column = caps.get(3).map_or(1, |m| parse_number(m.as_str()));

                diagnostics.push(
                    Diagnostic::new(resolver.resolve(&caps[1]), rule.as_str(), full_message, source)
                        .with_position(parse_number(&caps[2]), column)
                        .with_severity(Severity::Warning),
                );
                state = ColumnState::Idle;
                continue;
            }

            debug!("Ignoring unrecognized line: {}", line);
        }

        diagnostics
    }
}

/// Parses a decimal line or column number, saturating on overflow.
pub(crate) fn parse_number(digits: &str) -> u32 {
    digits.parse::<u64>().map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX))
}
