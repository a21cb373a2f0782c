//! TinyLFU Admission Cache Implementation
//!
//! TinyLFU pairs an LRU main region with a frequency sketch. Residency is
//! decided by **admission** rather than blind insertion: when the region is
//! full, a new key must be estimated more popular than the nominated
//! eviction victim to displace it.
//!
//! ```text
//!   get(k) ──▶ sketch.record_access(k), then probe the main region
//!
//!   put(k, v), main full and k absent:
//!
//!              freq(k) > freq(victim)?
//!                  │             │
//!                 yes            no
//!                  ▼             ▼
//!           evict victim,    reject k
//!           insert k        (main untouched)
//! ```
//!
//! Only lookups feed the sketch; `put` records nothing and the duel only
//! reads it. A candidate is therefore judged on how often it was actually
//! asked for, and no storm of insert attempts can inflate the popularity
//! it brings to the duel. A key that keeps missing accumulates history
//! through those recorded misses and eventually wins. With the default
//! Caffeine-style sketch, popularity also ages away.
//!
//! Because a single burst can never flush the region, TinyLFU resists
//! scans even harder than SLRU: a one-hit wonder is not admitted at all.
//!
//! # Examples
//!
//! ```
//! use cachekit::TinyLfuCache;
//! use cachekit::config::{SketchPolicy, TinyLfuCacheConfig};
//!
//! let config = TinyLfuCacheConfig {
//!     capacity: 2,
//!     sketch: SketchPolicy::Bloom,
//! };
//! let mut cache = TinyLfuCache::init(config, None);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! for _ in 0..20 {
//!     cache.get(&"a");
//!     cache.get(&"b");
//! }
//!
//! // Both residents are saturated in the sketch; a newcomer loses the duel
//! assert!(!cache.put("c", 3));
//! assert_eq!(cache.get(&"c"), None);
//! assert_eq!(cache.len(), 2);
//! ```

extern crate alloc;

use crate::config::TinyLfuCacheConfig;
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, CoreCacheMetrics, TinyLfuCacheMetrics};
use crate::sketch::{FrequencySketch, Sketch};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A TinyLFU cache: frequency-sketch admission in front of an LRU region.
///
/// The sketch variant is chosen by
/// [`TinyLfuCacheConfig::sketch`](crate::config::TinyLfuCacheConfig);
/// its counters survive entry eviction, which is what lets a recently
/// evicted but popular key win readmission.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct TinyLfuCache<K, V, S = DefaultHashBuilder> {
    /// Capacity and sketch selection
    config: TinyLfuCacheConfig,

    /// The resident region
    main: LruSegment<K, V, S>,

    /// Popularity estimator feeding the admission duel
    sketch: Sketch<S>,

    /// Admission verdicts and host-reported misses
    metrics: TinyLfuCacheMetrics,
}

impl<K: Hash + Eq + Clone, V> TinyLfuCache<K, V> {
    /// Creates a new TinyLFU cache from a configuration with an optional
    /// hasher.
    pub fn init(
        config: TinyLfuCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> TinyLfuCache<K, V, DefaultHashBuilder> {
        let hasher = hasher.unwrap_or_default();
        TinyLfuCache {
            config,
            main: LruSegment::init(
                crate::config::LruCacheConfig {
                    capacity: config.capacity,
                },
                hasher.clone(),
            ),
            sketch: Sketch::with_hasher(config.sketch, config.capacity, hasher),
            metrics: TinyLfuCacheMetrics::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> TinyLfuCache<K, V, S> {
    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity
    }

    /// Returns the current number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.main.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.main.is_empty()
    }

    /// Returns `true` if the key is resident, without recording an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.main.contains(key)
    }

    /// Records a cache miss for metrics tracking.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Retrieves a reference to the value for the given key.
    ///
    /// The access is recorded in the sketch whether or not it hits.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.sketch.record_access(key);
        self.main.get(key)
    }

    /// Retrieves a mutable reference to the value for the given key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.sketch.record_access(key);
        self.main.get_mut(key)
    }

    /// Inserts a key-value pair, subject to admission.
    ///
    /// An existing key is overwritten in place (`false`, no admission).
    /// A new key is inserted directly while the region has room; at
    /// capacity it must win the frequency duel against the LRU victim
    /// (strictly greater estimated popularity) or it is rejected and the
    /// region stays untouched. Returns `true` iff the key was admitted.
    ///
    /// The duel reads the sketch but records nothing: only lookups count
    /// as popularity evidence.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if self.main.contains(&key) {
            self.main.put(key, value);
            return false;
        }

        if self.main.cap() == 0 || self.main.len() < self.main.cap() {
            return self.main.put(key, value);
        }

        let candidate_freq = self.sketch.frequency(&key);
        let victim_freq = match self.main.peek_lru_key() {
            Some(victim) => self.sketch.frequency(victim),
            None => 0,
        };

        if candidate_freq > victim_freq {
            self.metrics.record_admission();
            self.main.pop_lru();
            self.main.put(key, value)
        } else {
            self.metrics.record_rejection();
            false
        }
    }

    /// Removes a key from the cache.
    ///
    /// The key's sketch counters persist; a popular key that returns soon
    /// will be admitted again.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.main.remove(key)
    }

    /// Shrinks the cache to at most `n` entries by evicting from the LRU
    /// tail. The sketch keeps its construction-time size: shrinking the
    /// history would discard exactly the evidence the admission test runs
    /// on.
    pub fn set_max_size(&mut self, n: usize) {
        self.main.set_max_size(n);
        self.config.capacity = n;
    }

    /// Removes all entries and forgets all popularity history.
    pub fn clear(&mut self) {
        self.main.clear();
        self.sketch.clear();
    }

    /// Calls `f` for every resident entry.
    pub fn visit_all<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.main.visit_all(f)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> core::fmt::Debug for TinyLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TinyLfuCache")
            .field("capacity", &self.config.capacity)
            .field("sketch", &self.config.sketch)
            .field("len", &self.main.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for TinyLfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let main = &self.main.metrics().core;
        let own = &self.metrics.core;
        let combined = CoreCacheMetrics {
            requests: main.requests + own.requests,
            cache_hits: main.cache_hits + own.cache_hits,
            insertions: main.insertions + own.insertions,
            updates: main.updates + own.updates,
            evictions: main.evictions + own.evictions,
        };
        let mut metrics = combined.to_btreemap();
        metrics.insert("admissions".to_string(), self.metrics.admissions as f64);
        metrics.insert("rejections".to_string(), self.metrics.rejections as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SketchPolicy;
    use alloc::vec::Vec;

    fn make_cache<K: Hash + Eq + Clone, V>(cap: usize, sketch: SketchPolicy) -> TinyLfuCache<K, V> {
        TinyLfuCache::init(
            TinyLfuCacheConfig {
                capacity: cap,
                sketch,
            },
            None,
        )
    }

    #[test]
    fn test_tinylfu_fills_without_duel() {
        let mut cache = make_cache(3, SketchPolicy::CaffeineBloom);
        assert!(cache.put(1, 'a'));
        assert!(cache.put(2, 'b'));
        assert!(cache.put(3, 'c'));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&1), Some(&'a'));
    }

    #[test]
    fn test_tinylfu_rejects_cold_candidate() {
        let mut cache = make_cache(2, SketchPolicy::Bloom);
        cache.put("a", 1);
        cache.put("b", 2);
        // Saturate both residents in the sketch
        for _ in 0..20 {
            cache.get(&"a");
            cache.get(&"b");
        }

        assert!(!cache.put("c", 3));
        assert_eq!(cache.get(&"c"), None);
        assert!(cache.contains(&"a"));
        assert!(cache.contains(&"b"));

        let metrics = cache.metrics();
        assert_eq!(metrics.get("rejections"), Some(&1.0));
    }

    #[test]
    fn test_tinylfu_put_retries_do_not_inflate_candidate() {
        // No lookups ever happen, so every frequency stays 0 and the
        // duel is always a lost tie: a put storm earns the candidate
        // nothing.
        let mut cache = make_cache(64, SketchPolicy::Bloom);
        for i in 0..64 {
            cache.put(i, i);
        }
        for _ in 0..100 {
            assert!(!cache.put(1000, 0));
        }
        assert!(!cache.contains(&1000));

        let metrics = cache.metrics();
        assert_eq!(metrics.get("rejections"), Some(&100.0));
    }

    #[test]
    fn test_tinylfu_admits_popular_candidate() {
        let mut cache = make_cache(64, SketchPolicy::Bloom);
        for i in 0..64 {
            cache.put(i, i);
        }

        // 1000 becomes popular through recorded misses
        for _ in 0..16 {
            assert_eq!(cache.get(&1000), None);
        }

        // Now it beats the barely-touched victim
        assert!(cache.put(1000, 0));
        assert!(cache.contains(&1000));
        assert_eq!(cache.len(), 64);

        let metrics = cache.metrics();
        assert_eq!(metrics.get("admissions"), Some(&1.0));
    }

    #[test]
    fn test_tinylfu_overwrite_is_not_admission() {
        let mut cache = make_cache(2, SketchPolicy::CaffeineBloom);
        assert!(cache.put("a", 1));
        assert!(!cache.put("a", 2));
        assert_eq!(cache.get(&"a"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_tinylfu_remove_keeps_history() {
        let mut cache = make_cache(64, SketchPolicy::Bloom);
        cache.put(1000, 1);
        for _ in 0..16 {
            cache.get(&1000);
        }
        assert_eq!(cache.remove(&1000), Some(1));
        assert_eq!(cache.remove(&1000), None);

        // Fill the region with cold keys, then bring the key back: its
        // saturated counters win the duel immediately.
        for i in 0..64 {
            cache.put(i, i);
        }
        assert!(cache.put(1000, 3));
        assert!(cache.contains(&1000));
    }

    #[test]
    fn test_tinylfu_clear_resets_history() {
        let mut cache = make_cache(2, SketchPolicy::Bloom);
        cache.put("a", 1);
        for _ in 0..16 {
            cache.get(&"a");
        }
        cache.clear();
        assert!(cache.is_empty());

        // After clear "a" is no more popular than anyone else
        cache.put("x", 10);
        cache.put("y", 20);
        for _ in 0..20 {
            cache.get(&"x");
            cache.get(&"y");
        }
        assert!(!cache.put("a", 1));
    }

    #[test]
    fn test_tinylfu_zero_capacity() {
        let mut cache = make_cache(0, SketchPolicy::CaffeineBloom);
        assert!(cache.put("a", 1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_tinylfu_set_max_size() {
        let mut cache = make_cache(4, SketchPolicy::CaffeineBloom);
        for i in 0..4 {
            cache.put(i, i);
        }
        cache.set_max_size(2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.cap(), 2);

        cache.set_max_size(6);
        assert_eq!(cache.cap(), 6);
    }

    #[test]
    fn test_tinylfu_visit_all() {
        let mut cache = make_cache(3, SketchPolicy::CaffeineBloom);
        cache.put(1, 10);
        cache.put(2, 20);

        let mut seen = Vec::new();
        cache.visit_all(|k, v| seen.push((*k, *v)));
        seen.sort_unstable();
        assert_eq!(seen, [(1, 10), (2, 20)]);
    }

    #[test]
    fn test_tinylfu_size_never_exceeds_capacity() {
        let mut cache = make_cache(4, SketchPolicy::CaffeineBloom);
        for i in 0..300 {
            cache.put(i % 19, i);
            cache.get(&((i + 7) % 19));
            assert!(cache.len() <= 4);
        }
    }
}
