//! Ignore command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use yamlsentry_core::IgnoreFile;

use crate::cli::Cli;
use crate::utils::load_config;

pub fn run_ignore(cli: &Cli, file: &Path, rule: &str) -> Result<()> {
    let (config, root) = load_config(cli)?;
    let ignore_path = config.resolve_path(&root, &config.ignore_file);
    let mut ignore = IgnoreFile::load(&ignore_path, &root).into_diagnostic()?;

    let file = if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    };

    if ignore.add(&file, rule) {
        ignore.save().into_diagnostic()?;
        println!("Added {} to {}", rule, ignore_path.display());
    } else {
        println!("{} is already ignored for {}", rule, file.display());
    }
    Ok(())
}
