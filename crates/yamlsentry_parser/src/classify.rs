//! Output dialect detection.

use std::fmt;
use std::str::FromStr;

use yamlsentry_diagnostic::Source;

use crate::ParseError;

/// Words that only appear in hook-runner transcripts.
const HOOK_STATUS_WORDS: &[&str] = &["Passed", "Failed", "Skipped"];

/// Log prefixes a hook runner prints before its transcript.
const LOG_PREFIXES: &[&str] = &["[INFO]", "[WARNING]", "[ERROR]"];

/// The textual output shapes the linters produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// A JSON array of code-climate issues.
    Structured,
    /// `path:line:col: [rule] message` lines, optionally with two-line headers.
    ColumnBased,
    /// The multi-section transcript of a hook runner.
    HookTranscript,
}

impl Dialect {
    /// Returns the short name used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::ColumnBased => "column",
            Self::HookTranscript => "hook",
        }
    }

    /// The dialect a tool always prints, if it only has one.
    pub fn default_for(source: Source) -> Option<Self> {
        match source {
            Source::PreCommit => Some(Self::HookTranscript),
            Source::Yamllint | Source::AnsibleLint => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" | "json" | "codeclimate" => Ok(Self::Structured),
            "column" | "column-based" | "pep8" | "parsable" => Ok(Self::ColumnBased),
            "hook" | "hook-transcript" | "pre-commit" => Ok(Self::HookTranscript),
            _ => Err(ParseError::unknown_dialect(s)),
        }
    }
}

/// Guesses the dialect of already-sanitized output.
///
/// Returns `None` for whitespace-only text. A leading `[` or `{` wins over
/// hook status words, so JSON that mentions `Failed` is still structured.
/// Leading `[INFO]`/`[WARNING]`/`[ERROR]` log lines are not JSON.
pub fn classify(text: &str) -> Option<Dialect> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let first = trimmed
        .lines()
        .map(str::trim_start)
        .find(|line| !line.is_empty() && !is_log_line(line))
        .unwrap_or_default();
    if first.starts_with('[') || first.starts_with('{') {
        return Some(Dialect::Structured);
    }

    if HOOK_STATUS_WORDS.iter().any(|word| trimmed.contains(word)) {
        return Some(Dialect::HookTranscript);
    }

    Some(Dialect::ColumnBased)
}

fn is_log_line(line: &str) -> bool {
    LOG_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("  \n\t ", None)]
    #[case("[]", Some(Dialect::Structured))]
    #[case("  {\"a\": 1}", Some(Dialect::Structured))]
    #[case("[{\"description\": \"Failed to load\"}]", Some(Dialect::Structured))]
    #[case("trim trailing whitespace....Failed", Some(Dialect::HookTranscript))]
    #[case("check yaml.........Passed", Some(Dialect::HookTranscript))]
    #[case("main.yml:1:1: [truthy] Truthy value", Some(Dialect::ColumnBased))]
    #[case("random noise", Some(Dialect::ColumnBased))]
    #[case(
        "[WARNING] Unstaged files detected.\n[INFO] Stashing unstaged files to /tmp/patch.\ncheck yaml.....Failed",
        Some(Dialect::HookTranscript)
    )]
    #[case("[INFO] Initializing environment for hooks.\n[]", Some(Dialect::Structured))]
    #[case("[INFO] Restored changes from /tmp/patch.", Some(Dialect::ColumnBased))]
    fn test_classify(#[case] input: &str, #[case] expected: Option<Dialect>) {
        assert_eq!(classify(input), expected);
    }

    #[rstest]
    #[case("structured", Dialect::Structured)]
    #[case("JSON", Dialect::Structured)]
    #[case("column", Dialect::ColumnBased)]
    #[case("pep8", Dialect::ColumnBased)]
    #[case("hook", Dialect::HookTranscript)]
    #[case("pre-commit", Dialect::HookTranscript)]
    fn test_dialect_from_str(#[case] input: &str, #[case] expected: Dialect) {
        assert_eq!(input.parse::<Dialect>(), Ok(expected));
    }

    #[rstest]
    #[case(Source::PreCommit, Some(Dialect::HookTranscript))]
    #[case(Source::Yamllint, None)]
    #[case(Source::AnsibleLint, None)]
    fn test_default_for(#[case] source: Source, #[case] expected: Option<Dialect>) {
        assert_eq!(Dialect::default_for(source), expected);
    }

    #[test]
    fn test_dialect_from_str_unknown() {
        assert_eq!(
            "xml".parse::<Dialect>(),
            Err(ParseError::unknown_dialect("xml"))
        );
    }

    #[test]
    fn test_dialect_display_round_trips() {
        for dialect in [
            Dialect::Structured,
            Dialect::ColumnBased,
            Dialect::HookTranscript,
        ] {
            assert_eq!(dialect.to_string().parse::<Dialect>(), Ok(dialect));
        }
    }
}
