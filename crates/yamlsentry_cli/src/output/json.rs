//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use yamlsentry_core::{CheckResult, Diagnostic};

/// Prints one flat array of diagnostics.
pub fn output_json(results: &[CheckResult]) -> Result<()> {
    let diagnostics: Vec<&Diagnostic> = results.iter().flat_map(|r| &r.diagnostics).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&diagnostics).into_diagnostic()?
    );
    Ok(())
}
