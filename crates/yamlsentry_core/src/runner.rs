//! Locating and running the external linters.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, info, warn};
use yamlsentry_diagnostic::{Diagnostic, Source};

use crate::CheckError;

/// Exit codes that mean the tool ran to completion.
const SUCCESS_EXIT_CODES: &[i32] = &[0, 1, 2];

/// Longest stderr excerpt kept in an execution failure.
const STDERR_EXCERPT_LEN: usize = 512;

/// Captured output of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The tool that ran.
    pub tool: Source,
    /// Captured stdout, lossily decoded.
    pub stdout: String,
    /// Captured stderr, lossily decoded.
    pub stderr: String,
    /// Exit code; always one of the success codes once returned from [`run`].
    pub exit_code: Option<i32>,
    /// Wall-clock time of the invocation.
    pub duration: Duration,
    /// Filled in by the aggregator after parsing.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExecutionResult {
    /// Creates a result from already captured output.
    pub fn new(
        tool: Source,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
        exit_code: Option<i32>,
        duration: Duration,
    ) -> Self {
        Self {
            tool,
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
            duration,
            diagnostics: Vec::new(),
        }
    }

    /// Joins stdout and stderr with a newline.
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// The tool being invoked.
    pub tool: Source,
    /// Executable path.
    pub program: PathBuf,
    /// Arguments, target file last.
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Builds the check invocation for a target file.
    ///
    /// | tool           | arguments                                       |
    /// |----------------|-------------------------------------------------|
    /// | `yamllint`     | `-f parsable <extra> <file>`                    |
    /// | `ansible-lint` | `-f codeclimate -q --nocolor <extra> <file>`    |
    /// | `pre-commit`   | `run <extra> --files <file>`                    |
    pub fn for_tool(
        tool: Source,
        program: impl Into<PathBuf>,
        target: &Path,
        extra_args: &[String],
    ) -> Self {
        let target = target.to_string_lossy().to_string();
        let mut args: Vec<String> = match tool {
            Source::Yamllint => vec!["-f".into(), "parsable".into()],
            Source::AnsibleLint => vec![
                "-f".into(),
                "codeclimate".into(),
                "-q".into(),
                "--nocolor".into(),
            ],
            Source::PreCommit => vec!["run".into()],
        };
        args.extend(extra_args.iter().cloned());
        if tool == Source::PreCommit {
            args.push("--files".into());
        }
        args.push(target);

        Self {
            tool,
            program: program.into(),
            args,
        }
    }

    /// Builds the invocation that rewrites a file in place.
    ///
    /// yamllint has no fix mode.
    pub fn fix_command(
        tool: Source,
        program: impl Into<PathBuf>,
        target: &Path,
    ) -> Result<Self, CheckError> {
        let target = target.to_string_lossy().to_string();
        let args = match tool {
            Source::Yamllint => return Err(CheckError::FixUnsupported(tool)),
            Source::AnsibleLint => vec!["--fix".into(), "-q".into(), "--nocolor".into(), target],
            Source::PreCommit => vec!["run".into(), "--files".into(), target],
        };

        Ok(Self {
            tool,
            program: program.into(),
            args,
        })
    }

    /// Builds `<tool> --version`.
    pub fn version_command(tool: Source, program: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            program: program.into(),
            args: vec!["--version".into()],
        }
    }

    /// Renders the command line for logs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Finds tool executables on disk.
#[derive(Debug, Clone, Default)]
pub struct ToolLocator {
    path_dirs: Vec<PathBuf>,
    home: Option<PathBuf>,
    virtual_env: Option<PathBuf>,
    system_dirs: bool,
}

impl ToolLocator {
    /// Creates a locator from `PATH`, `VIRTUAL_ENV` and the home directory.
    pub fn from_env() -> Self {
        Self {
            path_dirs: env::var_os("PATH")
                .map(|paths| env::split_paths(&paths).collect())
                .unwrap_or_default(),
            home: dirs::home_dir(),
            virtual_env: env::var_os("VIRTUAL_ENV").map(PathBuf::from),
            system_dirs: true,
        }
    }

    /// Creates a locator that only searches the given directories.
    pub fn with_dirs(path_dirs: Vec<PathBuf>) -> Self {
        Self {
            path_dirs,
            home: None,
            virtual_env: None,
            system_dirs: false,
        }
    }

    /// Directories searched for `tool`, in order: `PATH`, then well-known
    /// install locations for Python tools.
    pub fn search_dirs(&self, tool: Source) -> Vec<PathBuf> {
        let mut dirs = self.path_dirs.clone();

        if let Some(venv) = &self.virtual_env {
            dirs.push(venv.join(bin_dir()));
        }
        if let Some(home) = &self.home {
            dirs.push(home.join(".local/bin"));
            dirs.push(home.join(".local/pipx/venvs").join(tool.id()).join(bin_dir()));
            dirs.push(
                home.join(".local/share/pipx/venvs")
                    .join(tool.id())
                    .join(bin_dir()),
            );
        }
        if self.system_dirs {
            dirs.push(PathBuf::from("/usr/local/bin"));
            dirs.push(PathBuf::from("/opt/homebrew/bin"));
        }

        dirs
    }

    /// Resolves the executable for `tool`.
    ///
    /// A configured path containing a separator is used as-is; a bare
    /// configured name replaces the tool id in the search.
    pub fn locate(&self, tool: Source, configured: Option<&str>) -> Result<PathBuf, CheckError> {
        let name = match configured.map(str::trim).filter(|c| !c.is_empty()) {
            Some(configured) if configured.contains(['/', '\\']) => {
                let path = PathBuf::from(configured);
                return if path.is_file() {
                    Ok(path)
                } else {
                    Err(CheckError::tool_not_found(tool))
                };
            }
            Some(configured) => configured.to_string(),
            None => tool.id().to_string(),
        };

        self.search_dirs(tool)
            .into_iter()
            .flat_map(|dir| executable_names(&name).into_iter().map(move |n| dir.join(n)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| CheckError::tool_not_found(tool))
    }
}

fn bin_dir() -> &'static str {
    if cfg!(windows) { "Scripts" } else { "bin" }
}

fn executable_names(name: &str) -> Vec<String> {
    if cfg!(windows) && !name.ends_with(".exe") {
        vec![format!("{name}.exe"), name.to_string()]
    } else {
        vec![name.to_string()]
    }
}

/// Runs a command and captures its output.
///
/// Exit codes 0, 1 and 2 mean the tool ran; anything else, or death by
/// signal, is [`CheckError::ExecutionFailed`]. The child is killed when the
/// timeout expires.
pub async fn run(
    command: &ToolCommand,
    cwd: &Path,
    timeout: Duration,
) -> Result<ExecutionResult, CheckError> {
    let tool = command.tool;
    debug!("Running {}", command.display());

    let start = Instant::now();
    let child = Command::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .env("PY_COLORS", "0")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CheckError::tool_not_found(tool)
            } else {
                CheckError::Io(e)
            }
        })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output?,
        Err(_) => {
            warn!("{} timed out after {:?}", tool, timeout);
            return Err(CheckError::Timeout { tool, timeout });
        }
    };
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code();

    if !exit_code.is_some_and(|code| SUCCESS_EXIT_CODES.contains(&code)) {
        warn!("{} exited with {:?}", tool, exit_code);
        return Err(CheckError::ExecutionFailed {
            tool,
            code: exit_code,
            stderr: excerpt(&stderr),
        });
    }

    info!("{} finished in {:?} (exit {:?})", tool, duration, exit_code);
    Ok(ExecutionResult::new(tool, stdout, stderr, exit_code, duration))
}

/// Asks a tool for its version string, for cache invalidation.
pub async fn tool_version(command: &ToolCommand, cwd: &Path) -> Option<String> {
    let result = run(command, cwd, Duration::from_secs(10)).await.ok()?;
    let version = result.stdout.lines().next().unwrap_or_default().trim();
    (!version.is_empty()).then(|| version.to_string())
}

fn excerpt(stderr: &str) -> String {
    let trimmed = stderr.trim();
    match trimmed.char_indices().nth(STDERR_EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}
