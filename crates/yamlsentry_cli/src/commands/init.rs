//! Init command implementation

use miette::{IntoDiagnostic, Result};
use tracing::info;
use yamlsentry_core::CheckerConfig;

use crate::cli::Cli;
use crate::utils::project_root;

const INIT_FILE: &str = ".yamlsentry.json";

pub fn run_init(cli: &Cli, force: bool) -> Result<()> {
    let config_path = project_root(cli)?.join(INIT_FILE);
    let default_config = format!("{}\n", CheckerConfig::default_json());

    loop {
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);

        match options.open(&config_path) {
            Ok(mut file) => {
                use std::io::Write;
                file.write_all(default_config.as_bytes())
                    .into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "Config file already exists. Use --force to overwrite."
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
