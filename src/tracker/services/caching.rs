//! Cache-aside helpers shared by the tracker services.
//!
//! Replaces declarative caching annotations with explicit get-or-compute
//! and namespace-eviction calls. Cache trouble never fails a request: every
//! cache error, and every entry that no longer decodes, is treated as a
//! miss and the query is computed from the repository.

use crate::tracker::ports::{CacheNamespace, QueryCache};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use tracing::{debug, warn};

/// Builds a cache key from the full ordered tuple of query arguments.
///
/// Returns `None` when the arguments do not serialize; callers then bypass
/// the cache for that request.
pub(crate) fn query_key<T: Serialize>(arguments: &T) -> Option<String> {
    serde_json::to_string(arguments).ok()
}

/// Returns the cached value under `key`, or computes, caches, and returns
/// it.
pub(crate) async fn get_or_compute<T, E, F, Fut>(
    cache: &dyn QueryCache,
    namespace: CacheNamespace,
    key: &str,
    compute: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match cache.get(namespace, key).await {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(decoded) => {
                debug!(%namespace, key, "cache hit");
                return Ok(decoded);
            }
            Err(err) => {
                warn!(%namespace, key, error = %err, "stale cache entry, recomputing");
            }
        },
        Ok(None) => debug!(%namespace, key, "cache miss"),
        Err(err) => warn!(%namespace, error = %err, "cache read failed, computing uncached"),
    }

    let computed = compute().await?;
    match serde_json::to_value(&computed) {
        Ok(encoded) => {
            if let Err(err) = cache.put(namespace, key, encoded).await {
                warn!(%namespace, error = %err, "cache write failed");
            }
        }
        Err(err) => warn!(%namespace, error = %err, "query result not cacheable"),
    }
    Ok(computed)
}

/// Evicts both read-query namespaces in full.
///
/// A single write can change the membership of any cached search or filter
/// result set, so no finer invalidation is safe.
pub(crate) async fn evict_read_caches(cache: &dyn QueryCache) {
    for namespace in [CacheNamespace::SearchTasks, CacheNamespace::FilterTasks] {
        if let Err(err) = cache.evict_namespace(namespace).await {
            warn!(%namespace, error = %err, "cache eviction failed");
        }
    }
}
