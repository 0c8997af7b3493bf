//! Cache manager for file-level caching.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{CacheEntry, CacheError};

/// Name of the cache file inside the cache directory.
pub const CACHE_FILE: &str = "cache.json";

/// Bumped whenever the on-disk layout changes; older files are discarded.
const FORMAT_VERSION: u32 = 1;

#[derive(Deserialize)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

/// Manages the check cache for all files.
pub struct CacheManager {
    /// Directory where cache files are stored.
    cache_dir: PathBuf,
    /// In-memory cache entries, keyed by absolute path.
    entries: HashMap<String, CacheEntry>,
    /// Whether cache is enabled.
    enabled: bool,
}

impl CacheManager {
    /// Creates a new cache manager.
    ///
    /// # Arguments
    ///
    /// * `cache_dir` - Directory to store cache files
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Disables caching.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Enables caching.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Computes the BLAKE3 hash of content.
    pub fn hash_content(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }

    /// Gets a cached entry for a file.
    pub fn get(&self, path: &Path) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        self.entries.get(&Self::key(path))
    }

    /// Checks if a file's cache is valid.
    ///
    /// # Arguments
    ///
    /// * `path` - File path
    /// * `content_hash` - Hash of current file content
    /// * `config_hash` - Hash of current configuration
    /// * `tool_versions` - Current tool versions
    pub fn is_valid(
        &self,
        path: &Path,
        content_hash: &str,
        config_hash: &str,
        tool_versions: &HashMap<String, String>,
    ) -> bool {
        self.get(path)
            .is_some_and(|entry| entry.is_valid(content_hash, config_hash, tool_versions))
    }

    /// Stores a cache entry for a file.
    pub fn set(&mut self, path: &Path, entry: CacheEntry) {
        if self.enabled {
            self.entries.insert(Self::key(path), entry);
        }
    }

    /// Removes a cache entry.
    pub fn remove(&mut self, path: &Path) {
        self.entries.remove(&Self::key(path));
    }

    /// Clears all cache entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Loads cache from disk.
    ///
    /// A missing file leaves the cache empty. A file written by a different
    /// format version is ignored.
    pub fn load(&mut self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        let cache_file = self.cache_dir.join(CACHE_FILE);

        if !cache_file.exists() {
            debug!("No cache file found at {}", cache_file.display());
            return Ok(());
        }

        let content = fs::read_to_string(&cache_file)?;
        let file: CacheFile =
            serde_json::from_str(&content).map_err(|e| CacheError::corrupted(e.to_string()))?;

        if file.version != FORMAT_VERSION {
            debug!(
                "Ignoring cache format version {} (expected {})",
                file.version, FORMAT_VERSION
            );
            return Ok(());
        }

        info!("Loaded {} cache entries", file.entries.len());
        self.entries = file.entries;

        Ok(())
    }

    /// Saves cache to disk.
    pub fn save(&self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        fs::create_dir_all(&self.cache_dir)?;

        let cache_file = self.cache_dir.join(CACHE_FILE);
        let file = CacheFileRef {
            version: FORMAT_VERSION,
            entries: &self.entries,
        };
        let json =
            serde_json::to_string(&file).map_err(|e| CacheError::serialization(e.to_string()))?;

        fs::write(&cache_file, json)?;

        info!(
            "Saved {} cache entries to {}",
            self.entries.len(),
            cache_file.display()
        );

        Ok(())
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Serialize)]
struct CacheFileRef<'a> {
    version: u32,
    entries: &'a HashMap<String, CacheEntry>,
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(".yamlsentry-cache")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;
    use yamlsentry_diagnostic::{Diagnostic, Source};

    fn entry(content_hash: &str) -> CacheEntry {
        CacheEntry::new(
            content_hash.to_string(),
            "config".to_string(),
            HashMap::new(),
            vec![Diagnostic::new("/w/a.yml", "truthy", "Truthy value", Source::Yamllint)],
        )
    }

    #[test]
    fn test_cache_manager_new() {
        let manager = CacheManager::new("/tmp/test-cache");
        assert!(manager.is_enabled());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_cache_manager_enable_disable() {
        let mut manager = CacheManager::new("/tmp/test-cache");
        manager.disable();
        assert!(!manager.is_enabled());

        manager.enable();
        assert!(manager.is_enabled());
    }

    #[test]
    fn test_cache_manager_set_get() {
        let mut manager = CacheManager::new("/tmp/test-cache");
        let path = PathBuf::from("/w/a.yml");

        manager.set(&path, entry("hash123"));

        assert!(manager.get(&path).is_some());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_disabled_cache_ignores_writes_and_reads() {
        let mut manager = CacheManager::new("/tmp/test-cache");
        let path = PathBuf::from("/w/a.yml");
        manager.set(&path, entry("hash"));
        manager.disable();

        assert!(manager.get(&path).is_none());
        assert!(!manager.is_valid(&path, "hash", "config", &HashMap::new()));

        manager.set(&PathBuf::from("/w/b.yml"), entry("hash"));
        assert_eq!(manager.len(), 1);
    }

    #[rstest]
    #[case("/w/a.yml", "hash123", "config", true)]
    #[case("/w/a.yml", "different", "config", false)]
    #[case("/w/a.yml", "hash123", "other-config", false)]
    #[case("/w/missing.yml", "hash123", "config", false)]
    fn test_cache_manager_is_valid(
        #[case] path: &str,
        #[case] content_hash: &str,
        #[case] config_hash: &str,
        #[case] expected: bool,
    ) {
        let mut manager = CacheManager::new("/tmp/test-cache");
        manager.set(&PathBuf::from("/w/a.yml"), entry("hash123"));

        assert_eq!(
            manager.is_valid(&PathBuf::from(path), content_hash, config_hash, &HashMap::new()),
            expected
        );
    }

    #[test]
    fn test_hash_content() {
        let hash1 = CacheManager::hash_content("key: value\n");
        let hash2 = CacheManager::hash_content("key: value\n");
        let hash3 = CacheManager::hash_content("key: other\n");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_cache_manager_remove_and_clear() {
        let mut manager = CacheManager::new("/tmp/test-cache");
        for i in 0..3 {
            manager.set(&PathBuf::from(format!("/w/{i}.yml")), entry("hash"));
        }
        manager.remove(&PathBuf::from("/w/0.yml"));
        assert_eq!(manager.len(), 2);

        manager.clear();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = PathBuf::from("/w/a.yml");

        let mut manager = CacheManager::new(dir.path().join("cache"));
        manager.set(&path, entry("hash123"));
        manager.save().unwrap();

        let mut loaded = CacheManager::new(dir.path().join("cache"));
        loaded.load().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(&path), manager.get(&path));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let mut manager = CacheManager::new(dir.path());

        manager.load().unwrap();
        assert!(manager.is_empty());
    }

    #[test]
    fn test_load_corrupted_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CACHE_FILE), "not json").unwrap();

        let mut manager = CacheManager::new(dir.path());
        let err = manager.load().unwrap_err();
        assert!(matches!(err, CacheError::Corrupted(_)));
    }

    #[test]
    fn test_load_ignores_other_format_version() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CACHE_FILE),
            r#"{"version": 999, "entries": {}}"#,
        )
        .unwrap();

        let mut manager = CacheManager::new(dir.path());
        manager.load().unwrap();
        assert!(manager.is_empty());
    }
}
