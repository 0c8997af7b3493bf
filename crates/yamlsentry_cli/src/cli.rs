//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use yamlsentry_core::{Dialect, Source};

/// yamlsentry - one report for yamllint, ansible-lint and pre-commit
#[derive(Parser)]
#[command(name = "yamlsentry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable caching
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the linters on files
    Check {
        /// Files or glob patterns (defaults to the configured include globs)
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Only run these tools (repeatable)
        #[arg(long, value_name = "TOOL")]
        tool: Vec<Source>,

        /// Show time spent in each tool
        #[arg(long)]
        timings: bool,
    },

    /// Parse linter output read from stdin
    Parse {
        /// Tool that produced the output
        #[arg(long, value_name = "TOOL")]
        tool: Source,

        /// Skip detection and parse as this dialect
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Exit code of the tool run; output of a crashed tool is not parsed
        #[arg(long)]
        exit_code: Option<i32>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Show what is known about a rule
    Explain {
        /// Rule identifier, e.g. `yaml[truthy]`
        rule: String,

        /// Tool the rule belongs to
        #[arg(long, value_name = "TOOL", default_value = "ansible-lint")]
        tool: Source,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a rule for a file to the ansible-lint ignore file
    Ignore {
        /// File the rule is ignored for
        file: PathBuf,

        /// Rule identifier
        rule: String,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Start the LSP server
    Lsp,
}
