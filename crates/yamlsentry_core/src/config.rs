//! Checker configuration.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use yamlsentry_diagnostic::Source;
use yamlsentry_parser::Dialect;

use crate::CheckError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Default per-tool timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the checker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Per-tool settings. Tools missing from the map use their defaults.
    #[serde(default)]
    pub tools: BTreeMap<Source, ToolConfig>,

    /// File patterns to include.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to enable caching.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Cache directory.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// ansible-lint ignore file.
    #[serde(default = "default_ignore_file")]
    pub ignore_file: String,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Settings for one external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Whether the tool runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Explicit executable path; searched on `PATH` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Extra arguments placed before the target file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Seconds before the tool is killed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// UI grouping label; falls back to the tool's default group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_group: Option<String>,

    /// Forces an output dialect instead of guessing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.yml".to_string(), "**/*.yaml".to_string()]
}

fn default_cache() -> bool {
    true
}

fn default_cache_dir() -> String {
    ".yamlsentry-cache".to_string()
}

fn default_ignore_file() -> String {
    ".ansible-lint-ignore".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// The check group a tool's diagnostics are shown under by default.
pub fn default_check_group(source: Source) -> &'static str {
    match source {
        Source::Yamllint => "YAML style",
        Source::AnsibleLint => "Ansible",
        Source::PreCommit => "Pre-commit hooks",
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            args: Vec::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            check_group: None,
            dialect: None,
        }
    }
}

impl ToolConfig {
    /// Returns the timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Returns the forced dialect, if any.
    pub fn dialect(&self) -> Result<Option<Dialect>, CheckError> {
        self.dialect
            .as_deref()
            .map(str::parse::<Dialect>)
            .transpose()
            .map_err(CheckError::from)
    }
}

impl CheckerConfig {
    /// Config file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".yamlsentry.jsonc", ".yamlsentry.json"];

    /// Creates the default configuration: every tool enabled.
    pub fn new() -> Self {
        Self {
            tools: Source::ALL
                .iter()
                .map(|source| (*source, ToolConfig::default()))
                .collect(),
            include: default_include(),
            exclude: Vec::new(),
            cache: true,
            cache_dir: default_cache_dir(),
            ignore_file: default_ignore_file(),
            base_dir: None,
        }
    }

    /// Finds the nearest config file, walking up from `start`.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            Self::CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Loads the nearest config file, or the defaults when there is none.
    pub fn load_or_default(start: &Path) -> Result<Self, CheckError> {
        match Self::discover(start) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.yamlsentry.jsonc`, `.yamlsentry.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| CheckError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from JSON (comments and trailing commas allowed)
    /// with schema validation.
    pub fn from_json(json: &str) -> Result<Self, CheckError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| CheckError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| CheckError::config(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(CheckError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        let mut config: Self = serde_json::from_value(value)
            .map_err(|e| CheckError::config(format!("Invalid config: {}", e)))?;

        for source in Source::ALL {
            config.tools.entry(source).or_default();
        }
        for tool in config.tools.values() {
            tool.dialect()?;
        }

        Ok(config)
    }

    /// Returns the settings for a tool.
    pub fn tool(&self, source: Source) -> ToolConfig {
        self.tools.get(&source).cloned().unwrap_or_default()
    }

    /// Returns the enabled tools in run order.
    pub fn enabled_tools(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| self.tool(*source).enabled)
            .collect()
    }

    /// Returns the check group for a tool's diagnostics.
    pub fn check_group(&self, source: Source) -> String {
        self.tools
            .get(&source)
            .and_then(|tool| tool.check_group.clone())
            .unwrap_or_else(|| default_check_group(source).to_string())
    }

    /// Resolves a config-relative path against `root`.
    pub fn resolve_path(&self, root: &Path, relative: &str) -> PathBuf {
        let path = Path::new(relative);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.as_deref().unwrap_or(root).join(path)
        }
    }

    /// Computes a hash of the configuration for cache invalidation.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// Pretty JSON of the default configuration, as written by `init`.
    pub fn default_json() -> String {
        let mut value = serde_json::to_value(Self::new()).unwrap_or_default();
        if let Some(object) = value.as_object_mut() {
            object.insert(
                "$schema".to_string(),
                serde_json::Value::String(
                    "https://raw.githubusercontent.com/simorgh3196/yamlsentry/main/schemas/v1/config.json"
                        .to_string(),
                ),
            );
        }
        serde_json::to_string_pretty(&value).unwrap_or_default()
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self::new()
    }
}
