//! # yamlsentry_cache
//!
//! Caching system for yamlsentry.
//!
//! Running three external linters per file is slow, so results are cached
//! and reused while nothing that could change them has changed.
//!
//! ## Cache Strategy
//!
//! 1. **File-level cache**: Skip files whose content hash hasn't changed
//! 2. **Config-aware**: Invalidate when the configuration changes
//! 3. **Tool-version tracking**: Invalidate when a linter is upgraded
//!
//! ## Storage
//!
//! Entries are stored as JSON in `cache.json` inside the cache directory.

mod entry;
mod error;
mod manager;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use manager::{CACHE_FILE, CacheManager};
