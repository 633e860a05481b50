//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a plain map model and the
//! resource cache's scoping and loader rules over generated inputs.

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::cache::keys::{
    BOOK_REGISTRATIONS_RESOURCE, DIARY_ENTRIES_RESOURCE, GAME_REGISTRATIONS_RESOURCE,
};
use crate::cache::{compose_key, user_date_range_key, user_key, EntryStore, ResourceCache};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,12}"
}

fn resource_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(DIARY_ENTRIES_RESOURCE),
        Just(BOOK_REGISTRATIONS_RESOURCE),
        Just(GAME_REGISTRATIONS_RESOURCE),
    ]
}

/// A cache key of the shapes the services produce, for users 1..=30.
fn user_scoped_key_strategy() -> impl Strategy<Value = (u64, String)> {
    prop_oneof![
        (1u64..=30).prop_map(|user| (user, user_key(user))),
        (1u64..=30, 0i64..1000, 0i64..1000)
            .prop_map(|(user, start, end)| (user, user_date_range_key(user, start, end))),
    ]
}

#[derive(Debug, Clone)]
enum StoreOp {
    Put { key: String, value: u32 },
    Get { key: String },
    Delete { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| StoreOp::Put { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any sequence of put/get/delete leaves the store agreeing with a map,
    // and evictions count exactly the deletes that removed something.
    #[test]
    fn prop_store_matches_map_model(ops in prop::collection::vec(store_op_strategy(), 1..60)) {
        let mut store = EntryStore::new(TEST_TTL);
        let mut model: HashMap<String, u32> = HashMap::new();
        let mut expected_evictions: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Put { key, value } => {
                    store.put(key.clone(), value);
                    model.insert(key, value);
                }
                StoreOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key).copied());
                }
                StoreOp::Delete { key } => {
                    let removed = store.delete(&key);
                    prop_assert_eq!(removed, model.remove(&key).is_some());
                    if removed {
                        expected_evictions += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.evictions, expected_evictions, "Evictions mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // Entries are never removed by the sweep before their TTL and always
    // removed once it has elapsed.
    #[test]
    fn prop_sweep_respects_ttl(
        keys in prop::collection::hash_set(key_strategy(), 1..20),
        ttl_ms in 1_000u64..10_000,
    ) {
        let ttl = Duration::from_millis(ttl_ms);
        let mut store = EntryStore::new(ttl);
        for key in &keys {
            store.put(key.clone(), 0u8);
        }

        prop_assert_eq!(store.sweep(Instant::now()), 0);
        prop_assert_eq!(store.len(), keys.len());

        prop_assert_eq!(store.sweep(Instant::now() + ttl), keys.len());
        prop_assert!(store.is_empty());
        prop_assert_eq!(store.stats().expired, keys.len() as u64);
    }

    // Scoped eviction removes exactly the target user's keys of the target
    // resource: other users (including id prefixes like 1 vs 12) and other
    // resources are untouched.
    #[test]
    fn prop_user_eviction_is_exact(
        cached in prop::collection::vec((resource_strategy(), user_scoped_key_strategy()), 1..40),
        target_resource in resource_strategy(),
        target_user in 1u64..=30,
    ) {
        let cache: ResourceCache<u8> = ResourceCache::new(TEST_TTL);

        tokio_test::block_on(async {
            for (resource, (_, key)) in &cached {
                cache
                    .fetch_or_compute(|| async { Ok::<_, ()>(0) }, resource, key)
                    .await
                    .unwrap();
            }

            cache
                .evict_user_resource(target_resource, target_user)
                .await
                .unwrap();

            for (resource, (user, key)) in &cached {
                let targeted = *resource == target_resource && *user == target_user;
                prop_assert_eq!(
                    cache.contains(resource, key).await,
                    !targeted,
                    "unexpected state for {}",
                    compose_key(resource, key)
                );
            }
            Ok::<(), TestCaseError>(())
        })?;
    }

    // A failing loader leaves nothing behind; the next successful loader
    // for the same key is cached.
    #[test]
    fn prop_failed_load_is_not_cached(key in key_strategy(), value in any::<u32>()) {
        let cache: ResourceCache<u32> = ResourceCache::new(TEST_TTL);

        tokio_test::block_on(async {
            let failed = cache
                .fetch_or_compute(|| async { Err::<u32, _>("unavailable") }, DIARY_ENTRIES_RESOURCE, &key)
                .await;
            prop_assert_eq!(failed, Err("unavailable"));
            prop_assert!(cache.is_empty().await);

            let loaded = cache
                .fetch_or_compute(|| async { Ok::<_, &str>(value) }, DIARY_ENTRIES_RESOURCE, &key)
                .await;
            prop_assert_eq!(loaded, Ok(value));

            let cached = cache
                .fetch_or_compute(|| async { Err::<u32, _>("not called") }, DIARY_ENTRIES_RESOURCE, &key)
                .await;
            prop_assert_eq!(cached, Ok(value));

            let stats = cache.stats().await;
            prop_assert_eq!(stats.loader_failures, 1);
            prop_assert_eq!(stats.hits, 1);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
