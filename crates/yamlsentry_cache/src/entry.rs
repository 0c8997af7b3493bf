//! Cache entry types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use yamlsentry_diagnostic::Diagnostic;

/// Cached check result for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Hash of the file content.
    pub content_hash: String,

    /// Hash of the configuration used.
    pub config_hash: String,

    /// Version string reported by each tool that ran, keyed by tool id.
    #[serde(default)]
    pub tool_versions: HashMap<String, String>,

    /// Merged diagnostics from every tool.
    pub diagnostics: Vec<Diagnostic>,

    /// Seconds since the Unix epoch when this entry was created.
    pub created_at: u64,
}

impl CacheEntry {
    /// Creates a new cache entry stamped with the current time.
    pub fn new(
        content_hash: String,
        config_hash: String,
        tool_versions: HashMap<String, String>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            content_hash,
            config_hash,
            tool_versions,
            diagnostics,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Checks if this entry still applies to the given content, config and tools.
    pub fn is_valid(
        &self,
        content_hash: &str,
        config_hash: &str,
        tool_versions: &HashMap<String, String>,
    ) -> bool {
        self.content_hash == content_hash
            && self.config_hash == config_hash
            && self.tool_versions == *tool_versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlsentry_diagnostic::Source;

    fn versions(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entry(tool_versions: HashMap<String, String>) -> CacheEntry {
        CacheEntry::new(
            "abc123".to_string(),
            "config456".to_string(),
            tool_versions,
            vec![],
        )
    }

    #[test]
    fn test_cache_entry_valid() {
        let v = versions(&[("yamllint", "1.35.1")]);
        assert!(entry(v.clone()).is_valid("abc123", "config456", &v));
    }

    #[test]
    fn test_cache_entry_invalid_content() {
        let v = HashMap::new();
        assert!(!entry(v.clone()).is_valid("different", "config456", &v));
    }

    #[test]
    fn test_cache_entry_invalid_config() {
        let v = HashMap::new();
        assert!(!entry(v.clone()).is_valid("abc123", "different", &v));
    }

    #[test]
    fn test_cache_entry_invalid_tool_version() {
        let cached = entry(versions(&[("ansible-lint", "24.2.0")]));

        assert!(!cached.is_valid("abc123", "config456", &versions(&[("ansible-lint", "25.1.0")])));
        assert!(!cached.is_valid("abc123", "config456", &HashMap::new()));
    }

    #[test]
    fn test_cache_entry_timestamp_is_recent() {
        let cached = entry(HashMap::new());
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        assert!(cached.created_at <= now);
        assert!(cached.created_at >= now - 60);
    }

    #[test]
    fn test_cache_entry_serialization_roundtrip() {
        let diagnostics = vec![
            Diagnostic::new("/w/a.yml", "truthy", "Truthy value", Source::Yamllint).with_position(3, 1),
        ];
        let original = CacheEntry::new(
            "hash".to_string(),
            "config".to_string(),
            versions(&[("yamllint", "1.35.1")]),
            diagnostics,
        );

        let json = serde_json::to_string(&original).unwrap();
        let restored: CacheEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(original, restored);
    }
}
