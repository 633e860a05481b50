//! Resource Cache Module
//!
//! Cache-aside facade over the entry store: compute-or-fetch retrieval and
//! resource/user scoped invalidation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::keys::{compose_key, UserScope};
use crate::cache::{CacheStats, EntryStore};
use crate::error::CacheError;
use crate::tasks::ExpirySweeper;

// == Resource Cache ==
/// Shared handle to one entry store.
///
/// Cloning is cheap and every clone talks to the same store.
#[derive(Debug)]
pub struct ResourceCache<V> {
    store: Arc<Mutex<EntryStore<V>>>,
}

impl<V> Clone for ResourceCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V> ResourceCache<V>
where
    V: Clone + Send + 'static,
{
    /// Creates an empty cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: Arc::new(Mutex::new(EntryStore::new(ttl))),
        }
    }

    /// Builds an idle sweeper for this cache's store.
    ///
    /// Nothing is removed by TTL until the returned sweeper is started. A zero
    /// interval is rejected with [`CacheError::ZeroInterval`].
    pub fn sweeper(&self, eviction_interval: Duration) -> Result<ExpirySweeper<V>, CacheError> {
        ExpirySweeper::new(Arc::clone(&self.store), eviction_interval)
    }

    // == Fetch Or Compute ==
    /// Returns the value cached under `resource-key`, or runs `loader` and
    /// caches its result.
    ///
    /// The loader runs without holding the store lock. A loader error is
    /// returned unchanged and nothing is stored, so the next call retries.
    /// Concurrent misses on the same key each run the loader; the last write
    /// wins.
    pub async fn fetch_or_compute<F, Fut, E>(
        &self,
        loader: F,
        resource: &str,
        key: &str,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let full_key = compose_key(resource, key);

        {
            let mut store = self.store.lock().await;
            if let Some(value) = store.get(&full_key) {
                store.stats_mut().record_hit();
                debug!("cache hit: key={}", full_key);
                return Ok(value);
            }
            store.stats_mut().record_miss();
        }

        debug!("cache miss: key={}", full_key);
        match loader().await {
            Ok(value) => {
                self.store.lock().await.put(full_key, value.clone());
                Ok(value)
            }
            Err(e) => {
                self.store.lock().await.stats_mut().record_loader_failure();
                Err(e)
            }
        }
    }

    // == Evict Resource Item ==
    /// Removes exactly the entry `resource-key`, if present.
    pub async fn evict_resource_item(&self, resource: &str, key: &str) {
        let full_key = compose_key(resource, key);
        let removed = self.store.lock().await.delete(&full_key);
        if !removed {
            debug!("cache evict: key={} was not cached", full_key);
        }
    }

    // == Evict User Resource ==
    /// Removes every entry of `resource` scoped to `user_id`: the user's list
    /// key and all of the user's date-range keys.
    ///
    /// Returns the number of removed entries. When the scope cannot be built
    /// nothing is removed and the error is returned.
    pub async fn evict_user_resource(
        &self,
        resource: &str,
        user_id: u64,
    ) -> Result<usize, CacheError> {
        let scope = UserScope::new(resource, user_id).inspect_err(|e| {
            warn!("cache evict: cannot build user scope: {}", e);
        })?;

        let removed = self
            .store
            .lock()
            .await
            .delete_matching(|key| scope.matches(key));
        debug!(
            "cache evict: pattern={} removed {} entries",
            scope.as_str(),
            removed
        );
        Ok(removed)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.lock().await.stats()
    }

    /// Returns whether `resource-key` is currently stored, fresh or not.
    pub async fn contains(&self, resource: &str, key: &str) -> bool {
        self.store
            .lock()
            .await
            .contains_key(&compose_key(resource, key))
    }

    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}
