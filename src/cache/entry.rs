//! Cache Entry Module
//!
//! Defines the timestamped payload stored under every cache key.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single cached value together with the moment it was stored.
///
/// Entries are never mutated in place: re-inserting a key replaces both the
/// value and the timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was inserted
    pub inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self::inserted_at(value, Instant::now())
    }

    /// Creates a new entry stamped with the given instant.
    pub fn inserted_at(value: V, inserted_at: Instant) -> Self {
        Self { value, inserted_at }
    }

    // == Is Expired ==
    /// Checks whether the entry reached the given TTL at `now`.
    ///
    /// Boundary condition: an entry is expired once `inserted_at + ttl <= now`,
    /// i.e. as soon as the TTL has fully elapsed.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.inserted_at + ttl <= now
    }

    // == Age ==
    /// Returns how long ago the entry was inserted, saturating at zero.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(100);

    #[test]
    fn test_entry_keeps_value() {
        let entry = CacheEntry::new(vec![1, 2, 3]);
        assert_eq!(entry.value, vec![1, 2, 3]);
    }

    #[test]
    fn test_entry_not_expired_before_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::inserted_at("value", now);

        assert!(!entry.is_expired_at(TTL, now));
        assert!(!entry.is_expired_at(TTL, now + Duration::from_millis(99)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::inserted_at("value", now);

        // Expired exactly when the TTL has fully elapsed
        assert!(entry.is_expired_at(TTL, now + TTL));
        assert!(entry.is_expired_at(TTL, now + TTL + Duration::from_millis(1)));
    }

    #[test]
    fn test_age_saturates_for_earlier_instants() {
        let now = Instant::now();
        let entry = CacheEntry::inserted_at("value", now + Duration::from_secs(1));

        assert_eq!(entry.age_at(now), Duration::ZERO);
        assert_eq!(
            entry.age_at(now + Duration::from_secs(3)),
            Duration::from_secs(2)
        );
    }
}
