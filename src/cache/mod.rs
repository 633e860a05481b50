//! Cache Module
//!
//! In-process cache-aside layer: a lock-guarded entry store, composite keys
//! with user-scoped invalidation, and the [`ResourceCache`] facade used by the
//! services.

mod entry;
pub mod keys;
mod resource_cache;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use keys::{compose_key, user_date_range_key, user_key, UserScope};
pub use resource_cache::ResourceCache;
pub use stats::CacheStats;
pub use store::EntryStore;
