//! Windowed TinyLFU (W-TinyLFU) Cache Implementation
//!
//! W-TinyLFU fixes plain TinyLFU's blind spot: a genuinely new hot key has
//! no recorded history yet, so a pure admission filter would keep rejecting
//! it. The fix is a small **window** (1% of capacity) that every new key
//! enters unconditionally. Keys falling out of the window have had time to
//! accumulate sketch history; only then do they face the admission duel
//! against the main region's nominated victim.
//!
//! ```text
//!  new key ──▶ ┌────────────┐  window LRU   ┌──────────────────────┐
//!              │   window   │──(candidate)─▶│  admission duel vs   │
//!              │  (1%, LRU) │               │  main victim:        │
//!              └────────────┘               │  freq(c) > freq(v) ? │
//!                                           └──────┬───────┬───────┘
//!                                                 yes      no
//!                                                  ▼       ▼
//!                                       ┌──────────────┐  drop
//!                                       │  main (SLRU) │  candidate
//!                                       │  80% protected│
//!                                       └──────────────┘
//! ```
//!
//! The main region is an SLRU, so admitted keys still need a second access
//! to reach its protected segment. Victims are nominated from the
//! probationary tail.
//!
//! As in [`TinyLfuCache`](crate::TinyLfuCache), only lookups feed the
//! sketch; `put` records nothing, whatever its outcome. A window entry
//! arrives at the duel carrying exactly the popularity its recorded
//! lookups earned, with no boost from overwrites or insert retries.
//!
//! # Examples
//!
//! ```
//! use cachekit::WTinyLfuCache;
//! use cachekit::config::WTinyLfuCacheConfig;
//!
//! let mut cache = WTinyLfuCache::init(WTinyLfuCacheConfig::new(200), None);
//!
//! // window is 2 entries; new keys pass through it unconditionally
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // window overflow pushes its LRU entry toward the main region,
//! // which has room and takes it without a duel
//! cache.put("c", 3);
//! assert_eq!(cache.len(), 3);
//! assert_eq!(cache.get(&"b"), Some(&2));
//! ```

extern crate alloc;

use crate::config::WTinyLfuCacheConfig;
use crate::lru::LruSegment;
use crate::metrics::{CacheMetrics, CoreCacheMetrics, WTinyLfuCacheMetrics};
use crate::sketch::{FrequencySketch, Sketch};
use crate::slru::SlruSegment;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A windowed TinyLFU cache: admission window + SLRU main region +
/// frequency sketch.
///
/// See the [module documentation](self) for the data flow. The capacity
/// split (window share, protected share) lives in
/// [`WTinyLfuCacheConfig`].
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct WTinyLfuCache<K, V, S = DefaultHashBuilder> {
    /// Capacity split and sketch selection
    config: WTinyLfuCacheConfig,

    /// Admission window; every new key starts here
    window: LruSegment<K, V, S>,

    /// Main region; entered only through the admission duel
    main: SlruSegment<K, V, S>,

    /// Popularity estimator feeding the admission duel
    sketch: Sketch<S>,

    /// Admission verdicts and host-reported misses
    metrics: WTinyLfuCacheMetrics,
}

impl<K: Hash + Eq + Clone, V> WTinyLfuCache<K, V> {
    /// Creates a new W-TinyLFU cache from a configuration with an optional
    /// hasher.
    pub fn init(
        config: WTinyLfuCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> WTinyLfuCache<K, V, DefaultHashBuilder> {
        let hasher = hasher.unwrap_or_default();
        WTinyLfuCache {
            config,
            window: LruSegment::init(
                crate::config::LruCacheConfig {
                    capacity: config.window_capacity(),
                },
                hasher.clone(),
            ),
            main: SlruSegment::init(
                crate::config::SlruCacheConfig::new(
                    config.main_capacity(),
                    config.protected_capacity(),
                ),
                hasher.clone(),
            ),
            sketch: Sketch::with_hasher(config.sketch(), config.capacity(), hasher),
            metrics: WTinyLfuCacheMetrics::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> WTinyLfuCache<K, V, S> {
    /// Returns the total capacity across window and main region.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the capacity of the admission window.
    #[inline]
    pub fn window_cap(&self) -> usize {
        self.config.window_capacity()
    }

    /// Returns the current number of resident entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len() + self.main.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries currently in the window.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Returns the number of entries currently in the main region.
    #[inline]
    pub fn main_len(&self) -> usize {
        self.main.len()
    }

    /// Returns `true` if the key is resident in either region, without
    /// recording an access.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.window.contains(key) || self.main.contains(key)
    }

    /// Records a cache miss for metrics tracking.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Runs the admission duel for a key leaving the window.
    ///
    /// While the main region has room the candidate walks in; otherwise it
    /// must be estimated strictly more popular than the nominated victim,
    /// or it is dropped.
    fn admit_candidate(&mut self, key: K, value: V) {
        if self.main.len() < self.main.cap() {
            self.metrics.record_admission();
            self.main.put(key, value);
            return;
        }

        let candidate_freq = self.sketch.frequency(&key);
        let victim_freq = self.main.victim_key().map(|victim| self.sketch.frequency(victim));

        match victim_freq {
            Some(victim_freq) if candidate_freq > victim_freq => {
                self.metrics.record_admission();
                // SLRU's internal eviction removes the very victim we
                // just weighed.
                self.main.put(key, value);
            }
            _ => {
                // Covers both a lost duel and a zero-capacity main region.
                self.metrics.record_rejection();
            }
        }
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
        if self.window.contains(key) {
            return self.window.get(key);
        }
        self.main.get(key)
    }

    /// Retrieves a mutable reference to the value for the given key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.sketch.record_access(key);
        if self.window.contains(key) {
            return self.window.get_mut(key);
        }
        self.main.get_mut(key)
    }

    /// Inserts a key-value pair.
    ///
    /// An existing key is overwritten in place (`false`, no admission).
    /// A new key always enters the window (`true`); if the window
    /// overflows, its LRU entry becomes the candidate for the main region
    /// and faces the admission duel.
    ///
    /// Nothing is recorded in the sketch on this path: only lookups count
    /// as popularity evidence.
    pub fn put(&mut self, key: K, value: V) -> bool {
        if self.window.contains(&key) {
            self.window.put(key, value);
            return false;
        }
        if self.main.contains(&key) {
            self.main.put(key, value);
            return false;
        }

        if self.config.capacity() == 0 {
            // Degenerate capacity: the insertion immediately evicts itself.
            self.metrics.core.record_insertion();
            self.metrics.core.record_eviction();
            return true;
        }

        if self.window.len() < self.window.cap() {
            self.window.put(key, value);
            return true;
        }

        // Window full: its LRU entry leaves and duels for the main region
        let candidate = self.window.pop_lru();
        self.window.put(key, value);
        if let Some((candidate_key, candidate_value)) = candidate {
            self.admit_candidate(candidate_key, candidate_value);
        }
        true
    }

    /// Removes a key from whichever region holds it.
    ///
    /// The key's sketch counters persist.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(value) = self.window.remove(key) {
            return Some(value);
        }
        self.main.remove(key)
    }

    /// Re-splits `n` into window and main shares and shrinks both regions
    /// accordingly. The sketch keeps its construction-time size.
    pub fn set_max_size(&mut self, n: usize) {
        let config = WTinyLfuCacheConfig::with_sketch(n, self.config.sketch());
        self.window.set_max_size(config.window_capacity());
        self.main
            .set_capacities(config.main_capacity(), config.protected_capacity());
        self.config = config;
    }

    /// Removes all entries from both regions and forgets all popularity
    /// history.
    pub fn clear(&mut self) {
        self.window.clear();
        self.main.clear();
        self.sketch.clear();
    }

    /// Calls `f` for every resident entry (window first, then main).
    pub fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.window.visit_all(|k, v| f(k, v));
        self.main.visit_all(|k, v| f(k, v));
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> core::fmt::Debug for WTinyLfuCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WTinyLfuCache")
            .field("capacity", &self.config.capacity())
            .field("window_len", &self.window.len())
            .field("main_len", &self.main.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for WTinyLfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let window = &self.window.metrics().core;
        let main = &self.main.metrics().core;
        let own = &self.metrics.core;
        let combined = CoreCacheMetrics {
            requests: window.requests + main.requests + own.requests,
            cache_hits: window.cache_hits + main.cache_hits + own.cache_hits,
            insertions: window.insertions + main.insertions + own.insertions,
            updates: window.updates + main.updates + own.updates,
            evictions: window.evictions + main.evictions + own.evictions,
        };
        let mut metrics = combined.to_btreemap();
        metrics.insert("admissions".to_string(), self.metrics.admissions as f64);
        metrics.insert("rejections".to_string(), self.metrics.rejections as f64);
        metrics.insert("window_hits".to_string(), window.cache_hits as f64);
        metrics.insert("main_hits".to_string(), main.cache_hits as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
