//! Query-result cache port.
//!
//! Read queries are memoized per namespace under a key built from the full
//! ordered argument tuple. Writes invalidate whole namespaces: individual
//! keys cannot be derived from a write's effects, so eviction is all-or-
//! nothing per query family.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Logical grouping of cache entries that is evicted in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheNamespace {
    /// Memoized `search_tasks` pages.
    SearchTasks,
    /// Memoized `filter_tasks` pages.
    FilterTasks,
    /// Memoized active-story lists, one entry per time zone. Never evicted.
    ActiveStories,
}

impl CacheNamespace {
    /// Returns the canonical namespace label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SearchTasks => "search_tasks",
            Self::FilterTasks => "filter_tasks",
            Self::ActiveStories => "active_stories",
        }
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache contract consumed by the tracker services.
///
/// Values are JSON documents so a single cache serves heterogeneous query
/// results. Implementations tolerate concurrent reads, writes, and
/// evictions; an eviction racing a population must not resurrect evicted
/// data (evict-then-repopulate).
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Returns the cached value under `key`, if present.
    async fn get(&self, namespace: CacheNamespace, key: &str) -> CacheResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn put(&self, namespace: CacheNamespace, key: &str, value: Value) -> CacheResult<()>;

    /// Removes every entry in `namespace`.
    async fn evict_namespace(&self, namespace: CacheNamespace) -> CacheResult<()>;
}

/// Errors returned by cache implementations.
///
/// Callers treat any cache error as a miss: queries are computed from the
/// repository and returned uncached rather than failed.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    /// The cache backend could not be reached or is corrupted.
    #[error("cache unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl CacheError {
    /// Wraps a backend error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
