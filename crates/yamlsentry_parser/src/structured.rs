//! Parser for code-climate JSON reports.

use serde_json::{Map, Value};
use tracing::debug;
use yamlsentry_diagnostic::{Diagnostic, Severity, Source};

use crate::{ColumnParser, Dialect, DialectParser, PathResolver};

/// Parser for the structured (JSON) dialect.
///
/// Only the first JSON value is read, so stderr noise appended after the
/// report does not break parsing. Anything that is not a JSON array is
/// handed to the [`ColumnParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredParser;

impl StructuredParser {
    /// Creates a new structured parser.
    pub fn new() -> Self {
        Self
    }

    fn issue(
        issue: &Map<String, Value>,
        resolver: &PathResolver,
        source: Source,
    ) -> Option<Diagnostic> {
        if !issue.contains_key("type") && !issue.contains_key("check_name") {
            return None;
        }

        let rule = str_field(issue, "check_name").unwrap_or_default();
        let message = str_field(issue, "description").unwrap_or_default();
        let severity = Severity::from_codeclimate(str_field(issue, "severity").unwrap_or_default());

        let location = issue.get("location");
        let path = location
            .and_then(|loc| loc.get("path"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let (line, column) = location.map_or((1, 1), position);

        let mut diagnostic = Diagnostic::new(resolver.resolve(path), rule, message, source)
            .with_position(line, column)
            .with_severity(severity);

        if let Some(url) = str_field(issue, "url").filter(|url| !url.is_empty()) {
            diagnostic = diagnostic.with_documentation_url(url);
        }

        Some(diagnostic)
    }
}

impl DialectParser for StructuredParser {
    fn dialect(&self) -> Dialect {
        Dialect::Structured
    }

    fn parse(&self, text: &str, resolver: &PathResolver, source: Source) -> Vec<Diagnostic> {
        let value = serde_json::Deserializer::from_str(text)
            .into_iter::<Value>()
            .next();

        let issues = match value {
            Some(Ok(Value::Array(issues))) => issues,
            Some(Ok(_)) => {
                debug!("Structured output is not an array, falling back to column parser");
                return ColumnParser.parse(text, resolver, source);
            }
            Some(Err(e)) => {
                debug!("Structured output is not JSON ({}), falling back to column parser", e);
                return ColumnParser.parse(text, resolver, source);
            }
            None => return Vec::new(),
        };

        issues
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|issue| Self::issue(issue, resolver, source))
            .collect()
    }
}

fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

/// Extracts `(line, column)` from a code-climate location.
///
/// `lines.begin` may be a bare number or a `{line, column}` object;
/// `positions.begin` is used when `lines` is absent. Missing parts are 1.
fn position(location: &Value) -> (u32, u32) {
    let lines_begin = location.pointer("/lines/begin");
    let positions_begin = location.pointer("/positions/begin");

    let line = lines_begin
        .and_then(|begin| begin.as_u64().or_else(|| begin.get("line")?.as_u64()))
        .or_else(|| positions_begin?.get("line")?.as_u64());

    let column = positions_begin
        .and_then(|begin| begin.get("column")?.as_u64())
        .or_else(|| lines_begin?.get("column")?.as_u64());

    (clamp(line), clamp(column))
}

fn clamp(value: Option<u64>) -> u32 {
    value.map_or(1, |n| u32::try_from(n).unwrap_or(u32::MAX))
}
