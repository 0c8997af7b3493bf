//! Check command implementation

use miette::{IntoDiagnostic, Result};
use tracing::{info, warn};
use yamlsentry_core::{Checker, Source};

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;
use crate::utils::{create_tokio_runtime, load_config};

pub fn run_check(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    tools: &[Source],
    timings: bool,
) -> Result<bool> {
    let (mut config, root) = load_config(cli)?;

    if !tools.is_empty() {
        for source in Source::ALL {
            config.tools.entry(source).or_default().enabled = tools.contains(&source);
        }
    }
    info!(
        "Running {}",
        config
            .enabled_tools()
            .iter()
            .map(Source::id)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let checker = Checker::new(config, &root);
    let files = checker.discover(patterns).into_diagnostic()?;

    let runtime = create_tokio_runtime()?;
    let outcome = runtime.block_on(checker.check_files(&files));

    if let Err(e) = checker.save_cache() {
        warn!("Failed to save cache: {}", e);
    }

    if !outcome.failures.is_empty() {
        eprintln!("\n{} file(s) could not be read:", outcome.failures.len());
        for (path, error) in &outcome.failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_errors = output_results(&outcome.results, format, timings)?;

    Ok(has_errors || !outcome.failures.is_empty())
}
