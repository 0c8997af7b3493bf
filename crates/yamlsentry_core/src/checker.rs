//! Per-file orchestration: run every enabled tool, parse, merge, cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rayon::prelude::*;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use yamlsentry_cache::{CacheEntry, CacheManager};
use yamlsentry_diagnostic::Source;
use yamlsentry_parser::Dialect;

use crate::file_finder::FileFinder;
use crate::ignore::IgnoreFile;
use crate::runner::{self, ExecutionResult, ToolCommand, ToolLocator};
use crate::{Aggregator, CheckError, CheckResult, CheckerConfig, ToolFailure};

/// Results of checking many files.
#[derive(Debug, Default)]
pub struct CheckFilesResult {
    /// One result per readable file, in input order.
    pub results: Vec<CheckResult>,
    /// Files that could not be read.
    pub failures: Vec<(PathBuf, CheckError)>,
}

/// Runs the configured linters against files under a project root.
pub struct Checker {
    config: CheckerConfig,
    root: PathBuf,
    config_hash: String,
    aggregator: Aggregator,
    locator: ToolLocator,
    cache: Mutex<CacheManager>,
    tool_versions: OnceCell<HashMap<String, String>>,
}

impl Checker {
    /// Creates a checker and loads the on-disk cache.
    ///
    /// A corrupted cache is discarded with a warning.
    pub fn new(config: CheckerConfig, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut cache = CacheManager::new(config.resolve_path(&root, &config.cache_dir));
        if config.cache {
            if let Err(e) = cache.load() {
                warn!("Discarding unreadable cache: {}", e);
                cache.clear();
            }
        } else {
            cache.disable();
        }

        Self {
            config_hash: config.hash(),
            aggregator: Aggregator::new(&root),
            locator: ToolLocator::from_env(),
            cache: Mutex::new(cache),
            tool_versions: OnceCell::new(),
            config,
            root,
        }
    }

    /// Replaces the executable locator.
    pub fn with_locator(mut self, locator: ToolLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Returns the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turns caching off for this checker.
    pub fn disable_cache(&self) {
        self.cache.lock().disable();
    }

    /// Expands patterns into files, honoring the configured include and
    /// exclude globs. No patterns means the include globs themselves.
    pub fn discover(&self, patterns: &[String]) -> Result<Vec<PathBuf>, CheckError> {
        let finder = FileFinder::new(&self.config.include, &self.config.exclude)?;
        let patterns = if patterns.is_empty() {
            &self.config.include
        } else {
            patterns
        };
        finder.discover_files(patterns, &self.root)
    }

    /// Loads the ignore file named in the configuration.
    pub fn ignore_file(&self) -> Result<IgnoreFile, CheckError> {
        let path = self.config.resolve_path(&self.root, &self.config.ignore_file);
        IgnoreFile::load(path, &self.root)
    }

    /// Checks one file.
    ///
    /// Only an unreadable file is an error; tools that fail are recorded in
    /// [`CheckResult::failures`].
    pub async fn check_file(&self, path: &Path) -> Result<CheckResult, CheckError> {
        let path = self.absolute(path);
        let content = fs::read_to_string(&path)
            .map_err(|e| CheckError::file(format!("Failed to read {}: {}", path.display(), e)))?;
        let content_hash = CacheManager::hash_content(&content);
        Ok(self.check_hashed(path, content_hash).await)
    }

    /// Checks many files. Contents are read and hashed in parallel first.
    pub async fn check_files(&self, paths: &[PathBuf]) -> CheckFilesResult {
        let hashed: Vec<(PathBuf, Result<String, std::io::Error>)> = paths
            .par_iter()
            .map(|path| {
                let path = self.absolute(path);
                let hash = fs::read_to_string(&path).map(|c| CacheManager::hash_content(&c));
                (path, hash)
            })
            .collect();

        let mut outcome = CheckFilesResult::default();
        for (path, hash) in hashed {
            match hash {
                Ok(hash) => outcome.results.push(self.check_hashed(path, hash).await),
                Err(e) => {
                    let err = CheckError::file(format!("Failed to read {}: {}", path.display(), e));
                    outcome.failures.push((path, err));
                }
            }
        }
        outcome
    }

    /// Runs a tool's fix mode on a file, then checks it again.
    pub async fn fix_file(&self, path: &Path, tool: Source) -> Result<CheckResult, CheckError> {
        let path = self.absolute(path);
        let tool_config = self.config.tool(tool);
        let program = self.locator.locate(tool, tool_config.path.as_deref())?;
        let command = ToolCommand::fix_command(tool, program, self.target_arg(&path))?;

        info!("Fixing {} with {}", path.display(), tool);
        runner::run(&command, &self.root, tool_config.timeout()).await?;

        self.invalidate(&path);
        self.check_file(&path).await
    }

    /// Drops the cached result for a file so the next check reruns the tools.
    pub fn invalidate(&self, path: &Path) {
        let path = self.absolute(path);
        self.cache.lock().remove(&path);
    }

    /// Persists the cache.
    pub fn save_cache(&self) -> Result<(), CheckError> {
        self.cache.lock().save()?;
        Ok(())
    }

    async fn check_hashed(&self, path: PathBuf, content_hash: String) -> CheckResult {
        let settings_hash = self.settings_hash();
        let cache_enabled = self.cache.lock().is_enabled();
        let versions = if cache_enabled {
            self.tool_versions().await.clone()
        } else {
            HashMap::new()
        };

        let cached = {
            let cache = self.cache.lock();
            cache
                .get(&path)
                .filter(|entry| entry.is_valid(&content_hash, &settings_hash, &versions))
                .map(|entry| entry.diagnostics.clone())
        };
        if let Some(diagnostics) = cached {
            debug!("Cache hit for {}", path.display());
            return CheckResult::cached(path, diagnostics);
        }

        let mut result = CheckResult::new(path.clone(), Vec::new());
        let mut lists = Vec::new();

        for tool in self.config.enabled_tools() {
            match self.run_tool(tool, &path).await {
                Ok(execution) => {
                    result.timings.push((tool, execution.duration));
                    lists.push(execution.diagnostics);
                }
                Err(e) => {
                    warn!("{} skipped for {}: {}", tool, path.display(), e);
                    result.failures.push(ToolFailure {
                        tool,
                        message: e.to_string(),
                    });
                }
            }
        }

        result.diagnostics = Aggregator::merge(lists);

        // Partial results would hide findings on the next run.
        if result.failures.is_empty() {
            self.cache.lock().set(
                &path,
                CacheEntry::new(
                    content_hash,
                    settings_hash,
                    versions,
                    result.diagnostics.clone(),
                ),
            );
        }

        result
    }

    async fn run_tool(&self, tool: Source, path: &Path) -> Result<ExecutionResult, CheckError> {
        let tool_config = self.config.tool(tool);
        let dialect = tool_config.dialect()?.or_else(|| Dialect::default_for(tool));
        let program = self.locator.locate(tool, tool_config.path.as_deref())?;
        let command =
            ToolCommand::for_tool(tool, program, self.target_arg(path), &tool_config.args);

        let mut execution = runner::run(&command, &self.root, tool_config.timeout()).await?;
        let group = self.config.check_group(tool);
        self.aggregator
            .parse_execution(&mut execution, tool, dialect, Some(&group));
        Ok(execution)
    }

    /// Config hash combined with the ignore file, which the tools read too.
    fn settings_hash(&self) -> String {
        let ignore_path = self.config.resolve_path(&self.root, &self.config.ignore_file);
        match fs::read_to_string(&ignore_path) {
            Ok(ignored) => {
                CacheManager::hash_content(&format!("{}\n{}", self.config_hash, ignored))
            }
            Err(_) => self.config_hash.clone(),
        }
    }

    async fn tool_versions(&self) -> &HashMap<String, String> {
        self.tool_versions
            .get_or_init(|| async {
                let mut versions = HashMap::new();
                for tool in self.config.enabled_tools() {
                    let configured = self.config.tool(tool).path;
                    let Ok(program) = self.locator.locate(tool, configured.as_deref()) else {
                        continue;
                    };
                    let command = ToolCommand::version_command(tool, program);
                    if let Some(version) = runner::tool_version(&command, &self.root).await {
                        versions.insert(tool.id().to_string(), version);
                    }
                }
                debug!("Tool versions: {:?}", versions);
                versions
            })
            .await
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Tools run in the root, so targets inside it are passed relative.
    fn target_arg<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
