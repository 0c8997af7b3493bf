//! yamlsentry CLI
//!
//! Runs yamllint, ansible-lint and pre-commit and reports their findings
//! in one place.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_check, run_explain, run_ignore, run_init, run_lsp, run_parse};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check {
            patterns,
            format,
            tool,
            timings,
        } => run_check(cli, patterns, *format, tool, *timings),
        Commands::Parse {
            tool,
            dialect,
            exit_code,
            format,
        } => run_parse(cli, *tool, *dialect, *exit_code, *format),
        Commands::Explain { rule, tool, json } => run_explain(rule, *tool, *json).map(|_| false),
        Commands::Ignore { file, rule } => run_ignore(cli, file, rule).map(|_| false),
        Commands::Init { force } => run_init(cli, *force).map(|_| false),
        Commands::Lsp => run_lsp().map(|_| false),
    }
}
