//! Property-Based Tests for the Cache Engine
//!
//! Uses proptest to verify map-level correctness properties. The TTL is far
//! longer than any generated op sequence, so expiration never interferes;
//! the timed behavior is covered by the integration tests.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::TtlMap;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Small keyspace so op sequences collide on keys often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the set of live keys matches a simple
    // model: set inserts, delete removes, and a hit get removes (reads
    // consume). Map length and hit/miss outcomes must agree with the model
    // at every step.
    #[test]
    fn prop_live_keys_match_model(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        tokio_test::block_on(async {
            let map = TtlMap::new(TEST_TTL);
            let mut model: HashSet<String> = HashSet::new();

            for op in ops {
                match op {
                    CacheOp::Set { key, value } => {
                        map.set(key.clone(), value).await;
                        model.insert(key);
                    }
                    CacheOp::Get { key } => {
                        let found = map.get(&key).await.is_some();
                        let expected = model.remove(&key);
                        prop_assert_eq!(found, expected, "Hit/miss mismatch");
                    }
                    CacheOp::Delete { key } => {
                        map.delete(&key).await;
                        model.remove(&key);
                    }
                }
            }

            prop_assert_eq!(map.len().await, model.len(), "Length mismatch");
            Ok(())
        })?;
    }

    // For any key-value pair, storing the pair and then retrieving it
    // (before expiration) returns the exact value that was stored.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let map = TtlMap::new(TEST_TTL);

            map.set(key.clone(), value.clone()).await;

            let retrieved = map.get(&key).await;
            prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
            Ok(())
        })?;
    }

    // Reads consume: after a hit, the same key yields nothing until the
    // next set.
    #[test]
    fn prop_get_consumes(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let map = TtlMap::new(TEST_TTL);

            map.set(key.clone(), value).await;

            prop_assert!(map.get(&key).await.is_some(), "First get should hit");
            prop_assert!(map.get(&key).await.is_none(), "Second get should miss");
            prop_assert!(map.is_empty().await, "Consumed entry should be gone");
            Ok(())
        })?;
    }

    // For any key, storing V1 and then V2 under it results in get
    // returning V2, with a single live entry.
    #[test]
    fn prop_overwrite_wins(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        tokio_test::block_on(async {
            let map = TtlMap::new(TEST_TTL);

            map.set(key.clone(), v1).await;
            map.set(key.clone(), v2.clone()).await;

            prop_assert_eq!(map.len().await, 1, "Overwrite should not grow the map");
            prop_assert_eq!(map.get(&key).await, Some(v2), "Latest value should win");
            Ok(())
        })?;
    }

    // For any key that exists, after delete a subsequent get misses.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        tokio_test::block_on(async {
            let map = TtlMap::new(TEST_TTL);

            map.set(key.clone(), value).await;
            map.delete(&key).await;

            prop_assert!(map.get(&key).await.is_none(), "Key should not exist after delete");
            Ok(())
        })?;
    }
}
