//! Parse command implementation
//!
//! Turns raw linter output from stdin into diagnostics, for tools run
//! outside yamlsentry (CI steps, editor tasks).

use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;

use miette::{IntoDiagnostic, Result};
use tracing::debug;
use yamlsentry_core::{Aggregator, CheckResult, Dialect, Source};
use yamlsentry_parser::{PathResolver, parse_with};

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;
use crate::utils::project_root;

/// Exit codes that mean the tool ran to completion.
const COMPLETED_EXIT_CODES: [i32; 3] = [0, 1, 2];

pub fn run_parse(
    cli: &Cli,
    tool: Source,
    dialect: Option<Dialect>,
    exit_code: Option<i32>,
    format: OutputFormat,
) -> Result<bool> {
    if let Some(code) = exit_code
        && !COMPLETED_EXIT_CODES.contains(&code)
    {
        return Err(miette::miette!(
            "{} exited with code {}; its output was not parsed",
            tool,
            code
        ));
    }

    let root = project_root(cli)?;
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .into_diagnostic()?;
    debug!("Read {} bytes of {} output", input.len(), tool);

    let diagnostics = parse_with(&input, &PathResolver::new(&root), tool, dialect);
    let results = group_by_file(Aggregator::merge([diagnostics]));

    output_results(&results, format, false)
}

fn group_by_file(diagnostics: Vec<yamlsentry_core::Diagnostic>) -> Vec<CheckResult> {
    let mut by_file: BTreeMap<PathBuf, Vec<_>> = BTreeMap::new();
    for diagnostic in diagnostics {
        by_file
            .entry(diagnostic.file.clone())
            .or_default()
            .push(diagnostic);
    }
    by_file
        .into_iter()
        .map(|(path, diagnostics)| CheckResult::new(path, diagnostics))
        .collect()
}
