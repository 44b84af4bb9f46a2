use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// A stored extraction summary along with what it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub summary: String,
    pub file_name: String,
    pub file_size: u64,
    pub content_hash: String,
}

/// Key/value store for extraction summaries, keyed by
/// [`cache_key`](crate::hash::cache_key).
pub trait SummaryCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError>;
    fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError>;
}

/// Process-local cache, mainly for tests and one-off CLI runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SummaryCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>, CacheError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, entry: CacheEntry) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        entries.insert(key.to_string(), entry);
        Ok(())
    }
}
