//! Property tests: any operation sequence keeps every policy consistent.
//!
//! A write-back cache plus its store must behave exactly like a plain map,
//! whatever the policy evicts and whenever it flushes.

use std::collections::HashMap;

use kvscache::{AnyCache, CachePolicy, KvCache, MemoryStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u16),
    Get(u8),
    Flush,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..12, any::<u16>()).prop_map(|(k, v)| Op::Set(k, v)),
        4 => (0u8..12).prop_map(Op::Get),
        1 => Just(Op::Flush),
    ]
}

fn policy_strategy() -> impl Strategy<Value = CachePolicy> {
    prop_oneof![
        Just(CachePolicy::Clock),
        Just(CachePolicy::Fifo),
        Just(CachePolicy::Lru),
    ]
}

proptest! {
    /// Reads always see the latest write; size stays within capacity.
    #[test]
    fn prop_behaves_like_a_map(
        policy in policy_strategy(),
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..200)
    ) {
        let mut cache = AnyCache::new(policy, MemoryStore::new(), capacity).unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let (key, value) = (format!("k{}", k), v.to_string());
                    cache.set(&key, &value).unwrap();
                    prop_assert_eq!(cache.is_dirty(&key), Some(true));
                    model.insert(key, value);
                }
                Op::Get(k) => {
                    let key = format!("k{}", k);
                    match model.get(&key) {
                        Some(expected) => prop_assert_eq!(&cache.get(&key).unwrap(), expected),
                        None => prop_assert!(cache.get(&key).unwrap_err().is_not_found()),
                    }
                }
                Op::Flush => {
                    cache.flush().unwrap();
                    if policy == CachePolicy::Fifo {
                        prop_assert_eq!(cache.len(), 0);
                    }
                }
            }

            prop_assert!(cache.len() <= capacity);
        }

        // After a final flush the store alone holds every latest value
        cache.flush().unwrap();
        let store = cache.into_store();
        prop_assert_eq!(store.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(store.peek(key), Some(value.as_str()));
        }
    }

    /// A resident key read twice is served from the cache the second time.
    #[test]
    fn prop_hit_skips_store(
        policy in policy_strategy(),
        capacity in 1usize..6,
        keys in prop::collection::vec(0u8..12, 1..50)
    ) {
        let mut cache = AnyCache::new(policy, MemoryStore::new(), capacity).unwrap();
        for k in keys {
            let key = format!("k{}", k);
            cache.set(&key, "v").unwrap();
            let reads = cache.store().read_count();
            prop_assert_eq!(cache.get(&key).unwrap(), "v");
            prop_assert_eq!(cache.store().read_count(), reads);
        }
    }
}
