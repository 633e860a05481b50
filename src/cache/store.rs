//! Entry Store Module
//!
//! Keyed storage of timestamped cache entries. The store itself is not
//! synchronized; it is always shared as `Arc<Mutex<EntryStore<V>>>` so every
//! operation runs under one exclusive lock held for its whole duration.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};

// == Entry Store ==
/// Map from full cache key to a timestamped value.
///
/// Reads do not check expiry: an entry past its TTL stays visible until the
/// next [`sweep`](EntryStore::sweep) removes it.
#[derive(Debug)]
pub struct EntryStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Maximum age an entry may reach before a sweep removes it
    ttl: Duration,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> EntryStore<V> {
    // == Constructor ==
    /// Creates an empty store whose sweeps use the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            stats: CacheStats::new(),
        }
    }

    // == Put ==
    /// Inserts or overwrites `key`, stamping the current time.
    pub fn put(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        debug!("cache put: key={}", key);
        self.entries.insert(key, CacheEntry::new(value));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            debug!("cache delete: key={}", key);
            self.stats.record_evictions(1);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Delete Matching ==
    /// Removes every entry whose key satisfies `predicate`.
    ///
    /// Linear in the number of stored entries. Returns the number removed.
    pub fn delete_matching<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|key, _| !predicate(key));
        let removed = before - self.entries.len();

        self.stats.record_evictions(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Sweep ==
    /// Removes every entry whose `inserted_at + ttl <= now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let expired = entry.is_expired_at(ttl, now);
            if expired {
                debug!("evicting {} (age {:?})", key, entry.age_at(now));
            }
            !expired
        });
        let removed = before - self.entries.len();

        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Mutable access for lookup outcomes recorded by the facade.
    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }

    /// Returns the TTL applied by [`sweep`](EntryStore::sweep).
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether `key` is currently stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
