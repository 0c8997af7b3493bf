//! CLI utility functions

use std::path::PathBuf;

use miette::{IntoDiagnostic, Result, WrapErr};
use tokio::runtime::Runtime;
use tracing::info;
use yamlsentry_core::CheckerConfig;

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Resolves `--root`, defaulting to the current directory.
pub fn project_root(cli: &Cli) -> Result<PathBuf> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().into_diagnostic()?,
    };
    root.canonicalize()
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid root directory {}", root.display()))
}

/// Loads `--config`, or the nearest config file above the root.
pub fn load_config(cli: &Cli) -> Result<(CheckerConfig, PathBuf)> {
    let root = project_root(cli)?;

    let mut config = if let Some(ref path) = cli.config {
        CheckerConfig::from_file(path).into_diagnostic()?
    } else if let Some(path) = CheckerConfig::discover(&root) {
        info!("Using config: {}", path.display());
        CheckerConfig::from_file(&path).into_diagnostic()?
    } else {
        info!("No config file found, using defaults");
        CheckerConfig::new()
    };

    if cli.no_cache {
        config.cache = false;
    }

    Ok((config, root))
}
