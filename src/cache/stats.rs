//! Cache Statistics Module
//!
//! Tracks cache-aside outcomes and removals.

use serde::Serialize;

// == Cache Stats ==
/// Counters maintained under the store lock.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the store
    pub hits: u64,
    /// Lookups that fell through to the loader
    pub misses: u64,
    /// Loader invocations that returned an error (never cached)
    pub loader_failures: u64,
    /// Entries removed by explicit or scoped eviction
    pub evictions: u64,
    /// Entries removed by the expiry sweep
    pub expired: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_loader_failure(&mut self) {
        self.loader_failures += 1;
    }

    /// Adds `count` explicitly evicted entries.
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    /// Adds `count` entries removed by a sweep.
    pub fn record_expired(&mut self, count: usize) {
        self.expired += count as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
