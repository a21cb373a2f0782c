//! Cross-policy correctness tests.
//!
//! Every policy exposes the same contract; these tests run the shared
//! properties against each implementation: erase-after-put misses, bounded
//! size, idempotent clear/erase, and put/get round-trips.

use cachekit::config::{
    ArcCacheConfig, LfuCacheConfig, LruCacheConfig, SlruCacheConfig, TinyLfuCacheConfig,
    WTinyLfuCacheConfig,
};
use cachekit::metrics::CacheMetrics;
use cachekit::{ArcCache, LfuCache, LruCache, SlruCache, TinyLfuCache, WTinyLfuCache};

fn make_lru(cap: usize) -> LruCache<i32, i32> {
    LruCache::init(LruCacheConfig { capacity: cap }, None)
}

fn make_slru(cap: usize) -> SlruCache<i32, i32> {
    SlruCache::init(SlruCacheConfig::new(cap, cap / 2), None)
}

fn make_lfu(cap: usize) -> LfuCache<i32, i32> {
    LfuCache::init(LfuCacheConfig { capacity: cap }, None)
}

fn make_tinylfu(cap: usize) -> TinyLfuCache<i32, i32> {
    TinyLfuCache::init(TinyLfuCacheConfig::new(cap), None)
}

fn make_wtinylfu(cap: usize) -> WTinyLfuCache<i32, i32> {
    WTinyLfuCache::init(WTinyLfuCacheConfig::new(cap), None)
}

fn make_arc(cap: usize) -> ArcCache<i32, i32> {
    ArcCache::init(ArcCacheConfig::new(cap), None)
}

/// Stamps out the shared contract checks for one policy.
macro_rules! contract_tests {
    ($module:ident, $make:ident) => {
        mod $module {
            use super::*;

            #[test]
            fn erase_after_put_misses() {
                let mut cache = $make(8);
                cache.put(1, 100);
                cache.remove(&1);
                assert_eq!(cache.get(&1), None);
            }

            #[test]
            fn erase_is_idempotent() {
                let mut cache = $make(8);
                cache.put(1, 100);
                assert_eq!(cache.remove(&1), Some(100));
                assert_eq!(cache.remove(&1), None);
                assert_eq!(cache.remove(&1), None);
            }

            #[test]
            fn clear_is_idempotent() {
                let mut cache = $make(8);
                for i in 0..8 {
                    cache.put(i, i);
                }
                cache.clear();
                let len_once = cache.len();
                cache.clear();
                assert_eq!(cache.len(), len_once);
                assert_eq!(len_once, 0);
            }

            #[test]
            fn put_get_round_trip() {
                let mut cache = $make(8);
                cache.put(42, 4200);
                assert_eq!(cache.get(&42), Some(&4200));
            }

            #[test]
            fn overwrite_replaces_value() {
                let mut cache = $make(8);
                assert!(cache.put(1, 1));
                cache.put(1, 2);
                assert_eq!(cache.get(&1), Some(&2));
                assert_eq!(cache.len(), 1);
            }

            #[test]
            fn size_never_exceeds_capacity() {
                let mut cache = $make(6);
                for i in 0..500 {
                    cache.put(i % 37, i);
                    if i % 2 == 0 {
                        cache.get(&((i + 13) % 37));
                    }
                    if i % 17 == 0 {
                        cache.remove(&(i % 37));
                    }
                    assert!(cache.len() <= 6, "len {} at step {}", cache.len(), i);
                }
            }

            #[test]
            fn zero_capacity_is_degenerate() {
                let mut cache = $make(0);
                assert!(cache.put(1, 1));
                assert_eq!(cache.get(&1), None);
                assert_eq!(cache.len(), 0);
            }

            #[test]
            fn set_max_size_shrinks_and_grows() {
                let mut cache = $make(8);
                for i in 0..8 {
                    cache.put(i, i);
                }
                cache.set_max_size(3);
                assert!(cache.len() <= 3);

                cache.set_max_size(16);
                for i in 100..116 {
                    cache.put(i, i);
                }
                assert!(cache.len() <= 16);
            }

            #[test]
            fn visit_all_matches_len() {
                let mut cache = $make(8);
                for i in 0..5 {
                    cache.put(i, i * 10);
                }
                let mut count = 0;
                cache.visit_all(|k, v| {
                    assert_eq!(*v, *k * 10);
                    count += 1;
                });
                assert_eq!(count, cache.len());
            }
        }
    };
}

contract_tests!(lru_contract, make_lru);
contract_tests!(slru_contract, make_slru);
contract_tests!(lfu_contract, make_lfu);
contract_tests!(tinylfu_contract, make_tinylfu);
contract_tests!(wtinylfu_contract, make_wtinylfu);
contract_tests!(arc_contract, make_arc);

#[test]
fn test_overwrite_admission_verdicts() {
    // Every policy except ARC reports an overwrite as "no admission";
    // ARC's put reports success in every branch.
    let mut lru = make_lru(8);
    lru.put(1, 1);
    assert!(!lru.put(1, 2));

    let mut slru = make_slru(8);
    slru.put(1, 1);
    assert!(!slru.put(1, 2));

    let mut lfu = make_lfu(8);
    lfu.put(1, 1);
    assert!(!lfu.put(1, 2));

    let mut tinylfu = make_tinylfu(8);
    tinylfu.put(1, 1);
    assert!(!tinylfu.put(1, 2));

    let mut wtinylfu = make_wtinylfu(8);
    wtinylfu.put(1, 1);
    assert!(!wtinylfu.put(1, 2));

    let mut arc = make_arc(8);
    assert!(arc.put(1, 1));
    assert!(arc.put(1, 2));
    assert_eq!(arc.get(&1), Some(&2));
}

#[test]
fn test_lru_spec_scenario() {
    // LRU-3: four inserts evict the first key
    let mut cache = make_lru(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);
    cache.put(4, 4);
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(&2));
    assert_eq!(cache.get(&3), Some(&3));
    assert_eq!(cache.get(&4), Some(&4));
}

#[test]
fn test_algorithm_names_follow_contract() {
    assert_eq!(make_lru(4).algorithm_name(), "LRU");
    assert_eq!(make_slru(4).algorithm_name(), "SLRU");
    assert_eq!(make_lfu(4).algorithm_name(), "LFU");
    assert_eq!(make_tinylfu(4).algorithm_name(), "TinyLFU");
    assert_eq!(make_wtinylfu(4).algorithm_name(), "W-TinyLFU");
    assert_eq!(make_arc(4).algorithm_name(), "ARC");
}

#[test]
fn test_metrics_are_deterministically_ordered() {
    let mut cache = make_lru(4);
    cache.put(1, 1);
    cache.get(&1);
    cache.record_miss();

    let metrics = cache.metrics();
    let keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    assert_eq!(keys, sorted);
}

#[test]
fn test_string_keys_with_borrowed_lookup() {
    let mut cache: LruCache<String, i32> = LruCache::init(LruCacheConfig { capacity: 4 }, None);
    cache.put("alpha".to_string(), 1);
    cache.put("beta".to_string(), 2);
    assert_eq!(cache.get("alpha"), Some(&1));
    assert_eq!(cache.remove("beta"), Some(2));
    assert!(cache.contains("alpha"));
}
