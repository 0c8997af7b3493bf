//! LSP type conversion utilities.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::{
    CodeDescription, Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range, Url,
};

use yamlsentry_core::{Diagnostic as SentryDiagnostic, Severity as SentrySeverity, Source};

/// Payload attached to every published diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticData {
    pub fixable: bool,
    pub rule: String,
    pub source: Source,
}

/// Converts a yamlsentry diagnostic to an LSP diagnostic.
///
/// The range starts at the reported position and runs to the end of the
/// line. Without document text the range is empty.
pub fn to_lsp_diagnostic(diag: &SentryDiagnostic, text: Option<&str>) -> Diagnostic {
    let range = line_range(diag.line, diag.column, text);

    let severity = match diag.severity {
        SentrySeverity::Error => DiagnosticSeverity::ERROR,
        SentrySeverity::Warning => DiagnosticSeverity::WARNING,
        SentrySeverity::Info => DiagnosticSeverity::INFORMATION,
    };

    let data = DiagnosticData {
        fixable: diag.fixable,
        rule: diag.rule.clone(),
        source: diag.source,
    };

    Diagnostic {
        range,
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.rule.clone())),
        code_description: diag
            .documentation_url
            .as_deref()
            .and_then(|url| Url::parse(url).ok())
            .map(|href| CodeDescription { href }),
        source: Some(diag.source.id().to_string()),
        message: diag.message.clone(),
        data: serde_json::to_value(data).ok(),
        ..Default::default()
    }
}

/// Builds the range for a 1-based line and column.
pub fn line_range(line: u32, column: u32, text: Option<&str>) -> Range {
    let line_index = line.saturating_sub(1);
    let Some(line_text) = text.and_then(|t| t.lines().nth(line_index as usize)) else {
        let start = Position::new(line_index, column.saturating_sub(1));
        return Range::new(start, start);
    };

    let start = char_to_utf16(line_text, column.saturating_sub(1) as usize);
    let end = utf16_len(line_text);
    Range::new(
        Position::new(line_index, start.min(end)),
        Position::new(line_index, end),
    )
}

/// Position just past the last character of a 0-based line.
pub fn end_of_line(text: &str, line: u32) -> Position {
    let character = text.lines().nth(line as usize).map_or(0, utf16_len);
    Position::new(line, character)
}

/// Converts a character index into UTF-16 code units.
fn char_to_utf16(line: &str, chars: usize) -> u32 {
    line.chars().take(chars).map(|c| c.len_utf16() as u32).sum()
}

fn utf16_len(line: &str) -> u32 {
    line.chars().map(|c| c.len_utf16() as u32).sum()
}

/// Helper to compare Positions (p1 <= p2)
pub fn positions_le(p1: Position, p2: Position) -> bool {
    p1.line < p2.line || (p1.line == p2.line && p1.character <= p2.character)
}
