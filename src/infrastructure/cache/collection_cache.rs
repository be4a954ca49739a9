//! Single-slot cache for the full employee collection.
//!
//! Holds at most one entry, the last successful fetch-all result. Reads
//! share a single in-flight population via a shared future; eviction
//! replaces the slot atomically, so a concurrent reader sees either the
//! pre-eviction entry or a clean miss.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::Employee;

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<Vec<Employee>>, ApiError>>>;

/// One cached fetch-all result. Replaced atomically as a whole, never
/// updated in place.
#[derive(Debug, Clone)]
struct CacheEntry {
    employees: Arc<Vec<Employee>>,
    created_at: Instant,
}

/// Single-slot cache over the full employee collection.
///
/// State machine: EMPTY, populated by the first read-through, back to
/// EMPTY on the periodic sweep or on write-through eviction. Failed
/// populations are never cached.
pub struct CollectionCache {
    slot: RwLock<Option<CacheEntry>>,
    /// The in-flight population, shared by every reader that missed.
    inflight: Mutex<Option<SharedFetch>>,
}

impl CollectionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
            inflight: Mutex::new(None),
        }
    }

    /// Return the cached collection, populating it on a miss.
    ///
    /// Concurrent callers during a miss share the outcome of a single
    /// upstream fetch: the first caller initiates it, the rest await the
    /// same future and receive the same result or the same error.
    pub async fn get_or_populate<F>(&self, fetch: F) -> ApiResult<Arc<Vec<Employee>>>
    where
        F: FnOnce() -> BoxFuture<'static, ApiResult<Vec<Employee>>>,
    {
        if let Some(entry) = self.slot.read().await.as_ref() {
            debug!(age_ms = entry.created_at.elapsed().as_millis() as u64, "cache hit");
            return Ok(Arc::clone(&entry.employees));
        }

        let (shared, leader) = {
            let mut inflight = self.inflight.lock().await;
            // A population may have completed while we waited for the lock.
            if let Some(entry) = self.slot.read().await.as_ref() {
                return Ok(Arc::clone(&entry.employees));
            }
            match inflight.as_ref() {
                Some(shared) => (shared.clone(), false),
                None => {
                    debug!("cache miss, starting fetch");
                    let shared = fetch().map(|result| result.map(Arc::new)).boxed().shared();
                    *inflight = Some(shared.clone());
                    (shared, true)
                }
            }
        };

        let result = shared.await;

        if leader {
            // Only the initiating caller stores the result and clears the
            // in-flight marker; waiters just consume the shared outcome.
            let mut inflight = self.inflight.lock().await;
            if let Ok(ref employees) = result {
                info!(count = employees.len(), "cache populated");
                *self.slot.write().await = Some(CacheEntry {
                    employees: Arc::clone(employees),
                    created_at: Instant::now(),
                });
            }
            *inflight = None;
        }

        result
    }

    /// Evict the cached collection, returning the cache to EMPTY.
    pub async fn evict(&self) {
        let mut slot = self.slot.write().await;
        if let Some(entry) = slot.take() {
            info!(
                age_ms = entry.created_at.elapsed().as_millis() as u64,
                "evicted cached employee collection"
            );
        }
    }

    /// Whether an entry is currently cached.
    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Spawn the background sweep that clears the slot on a fixed period,
    /// regardless of the entry's age.
    pub fn spawn_sweep(cache: Arc<CollectionCache>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately; skip it so the sweep
            // fires one full period after startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                debug!("cache sweep tick");
                cache.evict().await;
            }
        })
    }
}

impl Default for CollectionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use uuid::Uuid;

    fn employee(name: &str, salary: u32) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: name.to_string(),
            salary,
            age: 30,
            title: "Engineer".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_populates_on_miss_then_serves_from_slot() {
        let cache = CollectionCache::new();
        let calls = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let result = cache
                .get_or_populate(move || {
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(vec![employee("Ada", 100)])
                    }
                    .boxed()
                })
                .await
                .unwrap();
            assert_eq!(result.len(), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = CollectionCache::new();

        let result = cache
            .get_or_populate(|| {
                async { Err(ApiError::Server("Server error occurred: 500".to_string())) }.boxed()
            })
            .await;
        assert!(result.is_err());
        assert!(!cache.is_populated().await);

        // The next read retries the fetch and can succeed.
        let result = cache
            .get_or_populate(|| async { Ok(vec![employee("Ada", 100)]) }.boxed())
            .await;
        assert!(result.is_ok());
        assert!(cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_evict_returns_to_empty() {
        let cache = CollectionCache::new();
        cache
            .get_or_populate(|| async { Ok(vec![employee("Ada", 100)]) }.boxed())
            .await
            .unwrap();
        assert!(cache.is_populated().await);

        cache.evict().await;
        assert!(!cache.is_populated().await);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let cache = Arc::new(CollectionCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_populate(move || {
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            // Hold the fetch open long enough for the other
                            // readers to pile onto the shared future.
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok(vec![employee("Ada", 100)])
                        }
                        .boxed()
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().len(), 1);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_error() {
        let cache = Arc::new(CollectionCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_populate(move || {
                        async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Err::<Vec<Employee>, _>(ApiError::rate_limited())
                        }
                        .boxed()
                    })
                    .await
            }));
        }

        for handle in handles {
            let err = handle.await.unwrap().unwrap_err();
            assert!(matches!(err, ApiError::RateLimited { .. }));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!cache.is_populated().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_clears_on_period() {
        let cache = Arc::new(CollectionCache::new());
        cache
            .get_or_populate(|| async { Ok(vec![employee("Ada", 100)]) }.boxed())
            .await
            .unwrap();

        let handle = CollectionCache::spawn_sweep(Arc::clone(&cache), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(!cache.is_populated().await);
        handle.abort();
    }
}
