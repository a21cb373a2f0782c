//! Least Frequently Used (LFU) Cache Implementation
//!
//! LFU tracks how often each entry is accessed and evicts the least
//! frequently used item when capacity is reached. Entries with the same
//! frequency are ordered by recency, so ties evict the least recently
//! touched item.
//!
//! ## Data Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        LFU Cache                               │
//! │                                                                │
//! │  HashMap<K, *Node>     BTreeMap<freq, List>                    │
//! │  ┌────────────┐        ┌──────────────────────────────┐       │
//! │  │ "a" ─────────────▶  │ 1 → [cold_1, cold_2]         │       │
//! │  │ "b" ─────────────▶  │ 3 → [warm]                   │       │
//! │  │ "c" ─────────────▶  │ 9 → [hot]                    │       │
//! │  └────────────┘        └──────────────────────────────┘       │
//! │                          ▲ eviction takes the tail of the     │
//! │                            lowest bucket                      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! On access an entry migrates from its frequency bucket to the next one;
//! empty buckets are pruned. Eviction pops the tail of the lowest bucket.
//!
//! Accesses bump the stored counter without bound; unlike the approximate
//! sketches in [`sketch`](crate::sketch), LFU counts exactly.
//!
//! # When to Use LFU
//!
//! **Good for:** stable popularity patterns where a few keys dominate.
//!
//! **Not ideal for:** shifting working sets, since an item popular long ago keeps
//! its high count forever. Use TinyLFU (aged sketch) or ARC when popularity
//! drifts.
//!
//! # Examples
//!
//! ```
//! use cachekit::LfuCache;
//! use cachekit::config::LfuCacheConfig;
//!
//! let mut cache = LfuCache::init(LfuCacheConfig { capacity: 2 }, None);
//! cache.put("rare", 1);
//! cache.put("popular", 2);
//!
//! for _ in 0..10 {
//!     cache.get(&"popular");
//! }
//!
//! cache.put("new", 3);  // "rare" evicted (lowest frequency)
//! assert_eq!(cache.get(&"rare"), None);
//! assert_eq!(cache.get(&"popular"), Some(&2));
//! ```

extern crate alloc;

use crate::config::LfuCacheConfig;
use crate::list::{List, ListEntry};
use crate::metrics::{CacheMetrics, LfuCacheMetrics};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Per-entry state: the key (owned here and mirrored in the index), the
/// cached value, and the exact access count.
struct LfuEntry<K, V> {
    key: K,
    value: V,
    frequency: usize,
}

/// Internal LFU segment containing the actual cache algorithm.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field. These pointers
/// are always valid as long as:
/// - The pointer was obtained from a `frequency_lists` bucket insertion
/// - The node has not been removed from its bucket
/// - The segment has not been dropped
pub(crate) struct LfuSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LFU cache
    config: LfuCacheConfig,

    /// Current minimum frequency present in the cache
    min_frequency: usize,

    /// Map from keys to their bucket node
    map: HashMap<K, *mut ListEntry<LfuEntry<K, V>>, S>,

    /// Map from frequency to the list of entries with that frequency,
    /// recency-ordered within the bucket
    frequency_lists: BTreeMap<usize, List<LfuEntry<K, V>>>,

    /// Metrics for tracking cache performance and frequency activity
    metrics: LfuCacheMetrics,
}

// SAFETY: LfuSegment owns all data and raw pointers point only to nodes owned by
// `frequency_lists`. Concurrent access is safe when wrapped in proper synchronization.
unsafe impl<K: Send, V: Send, S: Send> Send for LfuSegment<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LfuSegment<K, V, S> {}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuSegment<K, V, S> {
    /// Creates a new LFU segment from a configuration and hash builder.
    pub(crate) fn init(config: LfuCacheConfig, hasher: S) -> Self {
        let map_capacity = config.capacity.next_power_of_two();
        LfuSegment {
            config,
            min_frequency: 1,
            map: HashMap::with_capacity_and_hasher(map_capacity, hasher),
            frequency_lists: BTreeMap::new(),
            metrics: LfuCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn metrics(&self) -> &LfuCacheMetrics {
        &self.metrics
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Non-promoting membership test.
    #[inline]
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Recomputes the minimum frequency from the sorted bucket keys.
    fn refresh_min_frequency(&mut self) {
        self.min_frequency = self.frequency_lists.keys().next().copied().unwrap_or(1);
    }

    /// Migrates a node to the next frequency bucket.
    ///
    /// Returns the node pointer (unchanged; the node moves between lists
    /// without reallocation).
    ///
    /// # Safety
    ///
    /// `node` must point to a live entry indexed by `map`.
    unsafe fn bump_frequency(
        &mut self,
        node: *mut ListEntry<LfuEntry<K, V>>,
    ) -> *mut ListEntry<LfuEntry<K, V>> {
        // SAFETY: caller guarantees node is live
        let (key, old_freq) = unsafe {
            let entry = (*node).get_value();
            (entry.key.clone(), entry.frequency)
        };
        let new_freq = old_freq + 1;

        let boxed = self
            .frequency_lists
            .get_mut(&old_freq)
            .and_then(|list| {
                // SAFETY: node lives in the bucket for its recorded frequency
                unsafe { list.remove(node) }
            })
            .expect("entry must live in the bucket for its frequency");

        if self
            .frequency_lists
            .get(&old_freq)
            .map_or(false, |list| list.is_empty())
        {
            self.frequency_lists.remove(&old_freq);
        }

        let ptr = Box::into_raw(boxed);
        // SAFETY: ptr was just produced from a live entry
        unsafe {
            (*ptr).get_value_mut().frequency = new_freq;
        }

        let bucket_cap = self.config.capacity;
        let list = self
            .frequency_lists
            .entry(new_freq)
            .or_insert_with(|| List::new(bucket_cap));
        // SAFETY: ptr is detached and not part of any list
        unsafe {
            list.attach_from_other_list(ptr);
        }

        *self.map.get_mut(&key).expect("key must be indexed") = ptr;
        self.metrics.record_frequency_increment();
        self.refresh_min_frequency();
        ptr
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.metrics.core.record_hit();
        // SAFETY: node comes from our map
        let ptr = unsafe { self.bump_frequency(node) };
        // SAFETY: ptr is the node's home after the bump
        unsafe { Some(&(*ptr).get_value().value) }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.metrics.core.record_hit();
        // SAFETY: node comes from our map
        let ptr = unsafe { self.bump_frequency(node) };
        // SAFETY: ptr is the node's home after the bump
        unsafe { Some(&mut (*ptr).get_value_mut().value) }
    }

    /// Inserts a key-value pair.
    ///
    /// An overwrite keeps the entry's earned frequency and returns `false`;
    /// a fresh insertion starts at frequency 1 and returns `true`.
    pub(crate) fn put(&mut self, key: K, value: V) -> bool {
        if let Some(node) = self.map.get(&key).copied() {
            self.metrics.core.record_update();
            unsafe {
                // SAFETY: node comes from our map
                let entry = (*node).get_value_mut();
                entry.value = value;
                let freq = entry.frequency;
                if let Some(list) = self.frequency_lists.get_mut(&freq) {
                    list.move_to_front(node);
                }
            }
            return false;
        }

        if self.cap() == 0 {
            // Degenerate capacity: the insertion immediately evicts itself.
            self.metrics.core.record_insertion();
            self.metrics.core.record_eviction();
            return true;
        }

        while self.map.len() >= self.cap() {
            if self.evict_one().is_none() {
                break;
            }
        }

        let bucket_cap = self.config.capacity;
        let list = self
            .frequency_lists
            .entry(1)
            .or_insert_with(|| List::new(bucket_cap));
        let node = list.add_unchecked(LfuEntry {
            key: key.clone(),
            value,
            frequency: 1,
        });
        self.map.insert(key, node);
        self.min_frequency = 1;
        self.metrics.core.record_insertion();
        true
    }

    /// Evicts the tail of the lowest frequency bucket.
    pub(crate) fn evict_one(&mut self) -> Option<(K, V)> {
        let freq = self.frequency_lists.keys().next().copied()?;
        let entry = self.frequency_lists.get_mut(&freq)?.pop_back()?;
        if self
            .frequency_lists
            .get(&freq)
            .map_or(false, |list| list.is_empty())
        {
            self.frequency_lists.remove(&freq);
        }
        self.map.remove(&entry.key);
        self.metrics.core.record_eviction();
        self.refresh_min_frequency();
        Some((entry.key, entry.value))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        // SAFETY: node comes from our map and was just unindexed
        let freq = unsafe { (*node).get_value().frequency };
        let boxed = self.frequency_lists.get_mut(&freq).and_then(|list| {
            // SAFETY: node lives in the bucket for its recorded frequency
            unsafe { list.remove(node) }
        })?;
        if self
            .frequency_lists
            .get(&freq)
            .map_or(false, |list| list.is_empty())
        {
            self.frequency_lists.remove(&freq);
        }
        self.metrics.core.record_eviction();
        self.refresh_min_frequency();
        // SAFETY: boxed holds an initialized entry
        let entry = unsafe { boxed.take_value() };
        Some(entry.value)
    }

    /// Shrinks the segment to at most `n` entries by evicting the least
    /// frequently used items. Growing is accepted without side effect.
    pub(crate) fn set_max_size(&mut self, n: usize) {
        while self.map.len() > n {
            if self.evict_one().is_none() {
                break;
            }
        }
        self.config.capacity = n;
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.frequency_lists.clear();
        self.min_frequency = 1;
    }

    /// Calls `f` for every resident entry, bucket by bucket.
    pub(crate) fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        for list in self.frequency_lists.values() {
            list.for_each(|entry| f(&entry.key, &entry.value));
        }
    }

    #[cfg(test)]
    fn min_frequency(&self) -> usize {
        self.min_frequency
    }
}

impl<K, V, S> core::fmt::Debug for LfuSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LfuSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .field("min_frequency", &self.min_frequency)
            .finish()
    }
}

/// A Least Frequently Used (LFU) cache with O(1) expected operations.
///
/// Tracks exact access counts per entry and evicts the least frequently
/// used item (least recently used among ties) when capacity is reached.
///
/// # Example
///
/// ```
/// use cachekit::LfuCache;
/// use cachekit::config::LfuCacheConfig;
///
/// let mut cache = LfuCache::init(LfuCacheConfig { capacity: 2 }, None);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.get(&"a");
///
/// cache.put("c", 3);  // evicts "b" (frequency 1; "a" is at 2)
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V, S = DefaultHashBuilder> {
    segment: LfuSegment<K, V, S>,
}

impl<K: Hash + Eq + Clone, V> LfuCache<K, V> {
    /// Creates a new LFU cache from a configuration with an optional hasher.
    pub fn init(
        config: LfuCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LfuCache<K, V, DefaultHashBuilder> {
        LfuCache {
            segment: LfuSegment::init(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LfuCache<K, V, S> {
    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.segment.len()
    }

    /// Returns `true` if the cache contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }

    /// Returns `true` if the key is resident, without counting an access.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// Retrieves a reference to the value for the given key, bumping its
    /// frequency.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Retrieves a mutable reference to the value for the given key,
    /// bumping its frequency.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Records a cache miss for metrics tracking.
    #[inline]
    pub fn record_miss(&mut self) {
        self.segment.record_miss();
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` on overwrite (the entry keeps its earned frequency),
    /// `true` on fresh insertion at frequency 1. Never fails.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.segment.put(key, value)
    }

    /// Removes a key from the cache.
    ///
    /// Returns the value if the key was present; removing an absent key is
    /// a no-op.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Shrinks the cache to at most `n` entries by evicting the least
    /// frequently used items. Growing is accepted without side effect.
    #[inline]
    pub fn set_max_size(&mut self, n: usize) {
        self.segment.set_max_size(n)
    }

    /// Removes all entries from the cache.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Calls `f` for every resident entry.
    #[inline]
    pub fn visit_all<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.segment.visit_all(f)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for LfuCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn make_cache<K: Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
        LfuCache::init(LfuCacheConfig { capacity: cap }, None)
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut cache = make_cache(2);
        cache.put("rare", 1);
        cache.put("popular", 2);
        for _ in 0..10 {
            cache.get(&"popular");
        }

        cache.put("new", 3);
        assert_eq!(cache.get(&"rare"), None);
        assert_eq!(cache.get(&"popular"), Some(&2));
        assert_eq!(cache.get(&"new"), Some(&3));
    }

    #[test]
    fn test_lfu_ties_evict_lru() {
        let mut cache = make_cache(2);
        cache.put(1, 'a');
        cache.put(2, 'b');
        // Both at frequency 1; 1 is the older one
        cache.put(3, 'c');
        assert_eq!(cache.get(&1), None);
        assert!(cache.contains(&2));
    }

    #[test]
    fn test_lfu_overwrite_keeps_frequency() {
        let mut cache = make_cache(2);
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"a"); // frequency 3

        assert!(!cache.put("a", 10));
        cache.put("b", 2);
        cache.put("c", 3); // evicts "b" (frequency 1), not "a"
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn test_lfu_min_frequency_tracking() {
        let config = LfuCacheConfig { capacity: 3 };
        let mut segment: LfuSegment<i32, i32, DefaultHashBuilder> =
            LfuSegment::init(config, DefaultHashBuilder::default());

        segment.put(1, 10);
        segment.put(2, 20);
        assert_eq!(segment.min_frequency(), 1);

        segment.get(&1);
        segment.get(&2);
        // Nothing left at frequency 1
        assert_eq!(segment.min_frequency(), 2);

        segment.put(3, 30);
        assert_eq!(segment.min_frequency(), 1);
    }

    #[test]
    fn test_lfu_remove_and_clear() {
        let mut cache = make_cache(3);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");

        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.remove(&"a"), None);
        assert_eq!(cache.len(), 1);

        cache.clear();
        cache.clear();
        assert!(cache.is_empty());
        cache.put("c", 3);
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_lfu_zero_capacity() {
        let mut cache = make_cache(0);
        assert!(cache.put("a", 1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_lfu_get_mut_bumps_frequency() {
        let mut cache = make_cache(2);
        cache.put("a", 1);
        cache.put("b", 2);
        if let Some(v) = cache.get_mut(&"a") {
            *v = 100;
        }
        cache.put("c", 3); // evicts "b"
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(&100));
    }

    #[test]
    fn test_lfu_set_max_size() {
        let mut cache = make_cache(4);
        for i in 0..4 {
            cache.put(i, i);
        }
        cache.get(&2);
        cache.get(&3);

        cache.set_max_size(2);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));

        cache.set_max_size(5);
        for i in 10..13 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 5);
    }

    #[test]
    fn test_lfu_visit_all() {
        let mut cache = make_cache(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);
        cache.get(&2);

        let mut seen = Vec::new();
        cache.visit_all(|k, v| seen.push((*k, *v)));
        seen.sort_unstable();
        assert_eq!(seen, [(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn test_lfu_metrics() {
        let mut cache = make_cache(2);
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"a");
        cache.record_miss();

        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&2.0));
        assert_eq!(metrics.get("frequency_increments"), Some(&2.0));
        assert_eq!(metrics.get("requests"), Some(&3.0));
        assert_eq!(cache.algorithm_name(), "LFU");
    }

    #[test]
    fn test_lfu_size_never_exceeds_capacity() {
        let mut cache = make_cache(4);
        for i in 0..200 {
            cache.put(i % 11, i);
            if i % 2 == 0 {
                cache.get(&(i % 11));
            }
            assert!(cache.len() <= 4);
        }
    }
}
