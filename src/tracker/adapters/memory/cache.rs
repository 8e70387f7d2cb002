//! In-memory query cache.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::ports::{CacheError, CacheNamespace, CacheResult, QueryCache};

/// Thread-safe in-memory cache keyed by namespace then query key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueryCache {
    state: Arc<RwLock<HashMap<CacheNamespace, HashMap<String, Value>>>>,
}

impl InMemoryQueryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries held under `namespace`. Test
    /// instrumentation for asserting population and eviction.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] when the cache lock is poisoned.
    pub fn entry_count(&self, namespace: CacheNamespace) -> CacheResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|err| CacheError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(state.get(&namespace).map_or(0, HashMap::len))
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, namespace: CacheNamespace, key: &str) -> CacheResult<Option<Value>> {
        let state = self
            .state
            .read()
            .map_err(|err| CacheError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(state
            .get(&namespace)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(&self, namespace: CacheNamespace, key: &str, value: Value) -> CacheResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CacheError::unavailable(std::io::Error::other(err.to_string())))?;
        state
            .entry(namespace)
            .or_default()
            .insert(key.to_owned(), value);
        Ok(())
    }

    async fn evict_namespace(&self, namespace: CacheNamespace) -> CacheResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| CacheError::unavailable(std::io::Error::other(err.to_string())))?;
        state.remove(&namespace);
        Ok(())
    }
}
