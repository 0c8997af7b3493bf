//! SARIF output formatter

use miette::{IntoDiagnostic, Result};
use yamlsentry_core::CheckResult;

pub fn output_sarif(results: &[CheckResult]) -> Result<()> {
    let sarif_output = yamlsentry_core::generate_sarif(results).into_diagnostic()?;
    println!("{}", sarif_output);
    Ok(())
}
