//! Property-Based Tests for Cache Module

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheStore;

const TEST_TTL: Duration = Duration::from_secs(600);

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("films_list".to_string()),
        (1i64..20).prop_map(crate::cache::film_key),
    ]
}

/// A film-summary-like payload whose fields must always agree.
fn summary(n: u32) -> Value {
    json!({ "id": n, "title": format!("Film {n}"), "comment_count": n })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, n: u32 },
    Get { key: String },
    Delete { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), 0u32..1000).prop_map(|(key, n)| CacheOp::Set { key, n }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Any interleaving of operations behaves like a plain map (nothing
    // expires within the test), and the counters agree with what happened.
    #[test]
    fn prop_matches_model_map(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let mut store = CacheStore::new();
        let mut model: HashMap<String, Value> = HashMap::new();
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, n } => {
                    store.set(key.clone(), summary(n), TEST_TTL);
                    model.insert(key, summary(n));
                }
                CacheOp::Get { key } => {
                    let got = store.get(&key);
                    prop_assert_eq!(got.as_ref(), model.get(&key));
                    if got.is_some() { expected_hits += 1 } else { expected_misses += 1 }
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
                CacheOp::Clear => {
                    prop_assert_eq!(store.clear(), model.len());
                    model.clear();
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, model.len());
    }

    // The last set on a key always wins.
    #[test]
    fn prop_overwrite_semantics(key in key_strategy(), a in 0u32..1000, b in 0u32..1000) {
        let mut store = CacheStore::new();

        store.set(key.clone(), summary(a), TEST_TTL);
        store.set(key.clone(), summary(b), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(summary(b)));
        prop_assert_eq!(store.len(), 1);
    }

    // Delete and clear are idempotent.
    #[test]
    fn prop_delete_and_clear_idempotent(key in key_strategy(), n in 0u32..1000) {
        let mut store = CacheStore::new();
        store.set(key.clone(), summary(n), TEST_TTL);

        prop_assert!(store.delete(&key));
        prop_assert!(!store.delete(&key));
        prop_assert_eq!(store.clear(), 0);
        prop_assert_eq!(store.get(&key), None);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // Zero-TTL entries are never served.
    #[test]
    fn prop_expired_entries_are_misses(key in key_strategy(), n in 0u32..1000) {
        let mut store = CacheStore::new();
        store.set(key.clone(), summary(n), Duration::ZERO);

        prop_assert_eq!(store.get(&key), None);
        prop_assert!(store.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Readers racing writers through the shared lock only ever see whole
    // snapshots: every observed payload has internally consistent fields.
    #[test]
    fn prop_concurrent_readers_see_whole_entries(
        operations in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let shared = crate::cache::new_shared_cache();
            let mut handles = vec![];

            for op in operations {
                let shared = shared.clone();
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { key, n } => {
                            shared.write().await.set(key, summary(n), TEST_TTL);
                            Ok(())
                        }
                        CacheOp::Get { key } => {
                            match shared.write().await.get(&key) {
                                Some(value) if value["id"] != value["comment_count"] => {
                                    Err(format!("torn entry under '{key}': {value}"))
                                }
                                _ => Ok(()),
                            }
                        }
                        CacheOp::Delete { key } => {
                            shared.write().await.delete(&key);
                            Ok(())
                        }
                        CacheOp::Clear => {
                            shared.write().await.clear();
                            Ok(())
                        }
                    }
                }));
            }

            for handle in handles {
                let result = handle.await.expect("Task should not panic");
                prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
            }

            let hit_rate = shared.read().await.stats().hit_rate();
            prop_assert!((0.0..=1.0).contains(&hit_rate));
            Ok(())
        })?;
    }
}
