//! Least Recently Used (LRU) Cache Implementation
//!
//! An LRU cache evicts the least recently accessed item when capacity is
//! reached. This implementation provides O(1) time complexity for all
//! operations using a hash map combined with a doubly-linked list, and it is
//! the recency-ordered building block the composite policies (TinyLFU,
//! W-TinyLFU) assemble their regions from.
//!
//! # How the Algorithm Works
//!
//! The LRU algorithm is based on the principle of **temporal locality**:
//! items accessed recently are likely to be accessed again soon. The cache
//! maintains items ordered by their last access time.
//!
//! ## Data Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        LRU Cache                                │
//! │                                                                 │
//! │  HashMap<K, *Node>          Doubly-Linked List                  │
//! │  ┌──────────────┐          ┌──────────────────────────────┐    │
//! │  │ "apple" ──────────────▶ │ MRU ◀──▶ ... ◀──▶ LRU       │    │
//! │  │ "banana" ─────────────▶ │  ▲                    │      │    │
//! │  │ "cherry" ─────────────▶ │  │                    ▼      │    │
//! │  └──────────────┘          │ head              tail       │    │
//! │                            └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **HashMap**: O(1) key lookup, storing pointers to list nodes
//! - **Doubly-Linked List**: access order (most recent at head, least recent at tail)
//!
//! ## Operations
//!
//! | Operation | Action | Time |
//! |-----------|--------|------|
//! | `get(key)` | Move accessed node to head (MRU position) | O(1) |
//! | `put(key, value)` | Insert at head, evict from tail if full | O(1) |
//! | `remove(key)` | Unlink node from list, remove from map | O(1) |
//! | `peek_lru_key()` | Read-only look at the tail | O(1) |
//!
//! ## Eviction Example
//!
//! ```text
//! Cache capacity: 3
//!
//! put("a", 1)  →  [a]
//! put("b", 2)  →  [b, a]
//! put("c", 3)  →  [c, b, a]
//! get("a")     →  [a, c, b]       // "a" moved to front (MRU)
//! put("d", 4)  →  [d, a, c]       // "b" evicted (was LRU)
//! ```
//!
//! # Degenerate capacity
//!
//! A capacity of zero is legal. `put` reports the insertion (returns `true`)
//! but the entry immediately evicts itself; `get` always returns `None`.
//!
//! # Thread Safety
//!
//! `LruCache` is **not thread-safe**; `get` mutates recency order, so even
//! readers need exclusive access. Wrap the cache in the host's lock for
//! concurrent use.
//!
//! # Examples
//!
//! ```
//! use cachekit::LruCache;
//! use cachekit::config::LruCacheConfig;
//!
//! let config = LruCacheConfig { capacity: 3 };
//! let mut cache = LruCache::init(config, None);
//!
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.put("c", 3);
//!
//! assert_eq!(cache.get(&"a"), Some(&1));  // "a" is now MRU
//!
//! cache.put("d", 4);  // Evicts "b" (LRU)
//! assert_eq!(cache.get(&"b"), None);
//! ```

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::list::{List, ListEntry};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
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

/// Internal LRU segment containing the actual cache algorithm.
///
/// This is shared between `LruCache` and the composite admission caches
/// (`TinyLfuCache` uses it as the main region, `WTinyLfuCache` as the
/// window). All algorithm logic is implemented here to avoid duplication.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field.
/// These pointers are always valid as long as:
/// - The pointer was obtained from a `list` entry's `add_unchecked()` call
/// - The node has not been removed from the list
/// - The segment has not been dropped
pub(crate) struct LruSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the LRU cache
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, *mut ListEntry<(K, V)>, S>,
    metrics: LruCacheMetrics,
}

// SAFETY: LruSegment owns all data and raw pointers point only to nodes owned by `list`.
// Concurrent access is safe when wrapped in proper synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for LruSegment<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for LruSegment<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> LruSegment<K, V, S> {
    /// Creates a new LRU segment from a configuration and hash builder.
    pub(crate) fn init(config: LruCacheConfig, hasher: S) -> Self {
        let map_capacity = config.capacity.next_power_of_two();
        LruSegment {
            config,
            list: List::new(config.capacity),
            map: HashMap::with_capacity_and_hasher(map_capacity, hasher),
            metrics: LruCacheMetrics::new(),
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
    pub(crate) fn metrics(&self) -> &LruCacheMetrics {
        &self.metrics
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

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if let Some(node) = self.map.get(key).copied() {
            self.metrics.core.record_hit();
            unsafe {
                // SAFETY: node comes from our map
                self.list.move_to_front(node);
                let (_, v) = (*node).get_value();
                Some(v)
            }
        } else {
            None
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.get(key).copied()?;
        self.metrics.core.record_hit();
        unsafe {
            // SAFETY: node comes from our map
            self.list.move_to_front(node);
            let (_, v) = (*node).get_value_mut();
            Some(v)
        }
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Read-only peek at the least recently used key.
    pub(crate) fn peek_lru_key(&self) -> Option<&K> {
        self.list.back().map(|(k, _)| k)
    }

    /// Read-only peek at the least recently used value.
    pub(crate) fn peek_lru_value(&self) -> Option<&V> {
        self.list.back().map(|(_, v)| v)
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` when the key was already resident (the value is
    /// overwritten in place and the entry promoted), `true` when a fresh
    /// entry was admitted, evicting the tail if the segment was full.
    pub(crate) fn put(&mut self, key: K, value: V) -> bool
    where
        K: Clone,
    {
        if let Some(node) = self.map.get(&key).copied() {
            self.metrics.core.record_update();
            unsafe {
                // SAFETY: node comes from our map
                self.list.move_to_front(node);
                (*node).get_value_mut().1 = value;
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
            if self.pop_lru().is_none() {
                break;
            }
        }

        let node = self.list.add_unchecked((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();
        true
    }

    /// As `put`, but returns a borrow of the stored value.
    ///
    /// The borrow is valid until the next structural mutation of the
    /// segment. Returns `None` only for a zero-capacity segment, where no
    /// value is retained.
    pub(crate) fn put_mut(&mut self, key: K, value: V) -> Option<&mut V>
    where
        K: Clone,
    {
        if let Some(node) = self.map.get(&key).copied() {
            self.metrics.core.record_update();
            unsafe {
                // SAFETY: node comes from our map
                self.list.move_to_front(node);
                let pair = (*node).get_value_mut();
                pair.1 = value;
                return Some(&mut pair.1);
            }
        }

        if self.cap() == 0 {
            self.metrics.core.record_insertion();
            self.metrics.core.record_eviction();
            return None;
        }

        while self.map.len() >= self.cap() {
            if self.pop_lru().is_none() {
                break;
            }
        }

        let node = self.list.add_unchecked((key.clone(), value));
        self.map.insert(key, node);
        self.metrics.core.record_insertion();
        // SAFETY: node was just created by add_unchecked
        unsafe { Some(&mut (*node).get_value_mut().1) }
    }

    /// Evicts and returns the least recently used entry.
    pub(crate) fn pop_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.pop_back()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        Some((key, value))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes an entry, returning both key and value by move.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.map.remove(key)?;
        self.metrics.core.record_eviction();
        unsafe {
            // SAFETY: node comes from our map and was just unindexed
            let entry = self.list.remove(node)?;
            Some(entry.take_value())
        }
    }

    /// Shrinks the segment to at most `n` entries, evicting from the tail.
    ///
    /// Growing is accepted without side effect.
    pub(crate) fn set_max_size(&mut self, n: usize) {
        while self.map.len() > n {
            if self.pop_lru().is_none() {
                break;
            }
        }
        self.list.set_cap(n);
        self.config.capacity = n;
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
    }

    /// Calls `f` for every resident entry, most recently used first.
    pub(crate) fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.list.for_each(|(k, v)| f(k, v));
    }
}

impl<K, V, S> core::fmt::Debug for LruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruSegment")
            .field("capacity", &self.config.capacity)
            .field("len", &self.map.len())
            .finish()
    }
}

/// A Least Recently Used (LRU) cache with O(1) operations.
///
/// Maintains items in order of access recency. When capacity is reached,
/// the least recently accessed item is evicted to make room for new entries.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq`; mutation also needs `Clone`.
/// - `V`: Value type.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
///
/// # Example
///
/// ```
/// use cachekit::LruCache;
/// use cachekit::config::LruCacheConfig;
///
/// let config = LruCacheConfig { capacity: 2 };
/// let mut cache = LruCache::init(config, None);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // "banana" is now LRU, so it gets evicted
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// ```
#[derive(Debug)]
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    segment: LruSegment<K, V, S>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration specifying the capacity
    /// * `hasher` - Optional custom hash builder. If `None`, uses `DefaultHashBuilder`
    ///
    /// # Example
    ///
    /// ```
    /// use cachekit::LruCache;
    /// use cachekit::config::LruCacheConfig;
    ///
    /// let config = LruCacheConfig { capacity: 100 };
    /// let mut cache: LruCache<&str, i32> = LruCache::init(config, None);
    /// cache.put("key", 42);
    /// ```
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache {
            segment: LruSegment::init(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
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

    /// Returns `true` if the key is resident, without promoting it.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.contains(key)
    }

    /// Retrieves a reference to the value for the given key.
    ///
    /// If the key exists, it is moved to the most-recently-used (MRU)
    /// position. Returns `None` if the key is not present.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Retrieves a mutable reference to the value for the given key.
    ///
    /// If the key exists, it is moved to the MRU position.
    ///
    /// # Example
    ///
    /// ```
    /// use cachekit::LruCache;
    /// use cachekit::config::LruCacheConfig;
    ///
    /// let mut cache = LruCache::init(LruCacheConfig { capacity: 10 }, None);
    /// cache.put("counter", 0);
    ///
    /// if let Some(val) = cache.get_mut(&"counter") {
    ///     *val += 1;
    /// }
    /// assert_eq!(cache.get(&"counter"), Some(&1));
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get_mut(key)
    }

    /// Records a cache miss for metrics tracking.
    ///
    /// Call this when you look up a key, find it missing, and fetch from
    /// the underlying data source.
    #[inline]
    pub fn record_miss(&mut self) {
        self.segment.record_miss();
    }

    /// Read-only peek at the least recently used key (`None` iff empty).
    #[inline]
    pub fn peek_lru_key(&self) -> Option<&K> {
        self.segment.peek_lru_key()
    }

    /// Read-only peek at the least recently used value (`None` iff empty).
    #[inline]
    pub fn peek_lru_value(&self) -> Option<&V> {
        self.segment.peek_lru_value()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts a key-value pair into the cache.
    ///
    /// If the key already exists, the value is overwritten in place, the
    /// entry moves to the MRU position, and `false` is returned (no
    /// admission took place). Otherwise the entry is inserted, evicting the
    /// least recently used entry if the cache is full, and `true` is
    /// returned. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use cachekit::LruCache;
    /// use cachekit::config::LruCacheConfig;
    ///
    /// let mut cache = LruCache::init(LruCacheConfig { capacity: 2 }, None);
    ///
    /// assert!(cache.put("a", 1));        // fresh insertion
    /// assert!(!cache.put("a", 10));      // overwrite, no admission
    /// assert!(cache.put("b", 2));
    /// assert!(cache.put("c", 3));        // evicts "a" (LRU after its overwrite)
    /// ```
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.segment.put(key, value)
    }

    /// As [`put`](Self::put), but returns a borrow of the freshly stored
    /// value.
    ///
    /// The borrow is invalidated by the next mutation of the cache (the
    /// borrow checker enforces this). Returns `None` only for a
    /// zero-capacity cache.
    ///
    /// # Example
    ///
    /// ```
    /// use cachekit::LruCache;
    /// use cachekit::config::LruCacheConfig;
    ///
    /// let mut cache = LruCache::init(LruCacheConfig { capacity: 2 }, None);
    /// let slot = cache.put_mut("a", 1).unwrap();
    /// *slot += 41;
    /// assert_eq!(cache.get(&"a"), Some(&42));
    /// ```
    #[inline]
    pub fn put_mut(&mut self, key: K, value: V) -> Option<&mut V> {
        self.segment.put_mut(key, value)
    }

    /// Removes a key from the cache.
    ///
    /// Returns the value if the key was present, `None` otherwise; removing
    /// an absent key is a no-op.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.remove(key)
    }

    /// Shrinks the cache to at most `n` entries by evicting from the LRU
    /// tail; growing is accepted without side effect.
    #[inline]
    pub fn set_max_size(&mut self, n: usize) {
        self.segment.set_max_size(n)
    }

    /// Removes all entries from the cache.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Calls `f` for every resident entry, most recently used first.
    ///
    /// The visitor cannot mutate the cache.
    #[inline]
    pub fn visit_all<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.segment.visit_all(f)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
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
    use alloc::string::String;
    use alloc::vec::Vec;

    /// Helper to create an LruCache with the given capacity
    fn make_cache<K: Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
        LruCache::init(LruCacheConfig { capacity: cap }, None)
    }

    #[test]
    fn test_lru_get_put() {
        let mut cache = make_cache(2);
        assert!(cache.put("apple", 1));
        assert!(cache.put("banana", 2));
        assert_eq!(cache.get(&"apple"), Some(&1));
        assert_eq!(cache.get(&"banana"), Some(&2));
        assert_eq!(cache.get(&"cherry"), None);

        // Overwrite reports no admission
        assert!(!cache.put("apple", 3));
        assert_eq!(cache.get(&"apple"), Some(&3));

        // Inserting a third entry evicts the LRU one
        assert!(cache.put("cherry", 4));
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&3));
        assert_eq!(cache.get(&"cherry"), Some(&4));
    }

    #[test]
    fn test_lru_eviction_order() {
        // Capacity 3: four inserts drop the oldest key.
        let mut cache = make_cache(3);
        cache.put(1, 'a');
        cache.put(2, 'b');
        cache.put(3, 'c');
        cache.put(4, 'd');
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&'b'));
        assert_eq!(cache.get(&3), Some(&'c'));
        assert_eq!(cache.get(&4), Some(&'d'));
    }

    #[test]
    fn test_lru_get_mut() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        if let Some(v) = cache.get_mut(&"apple") {
            *v = 3;
        }
        assert_eq!(cache.get(&"apple"), Some(&3));
        cache.put("cherry", 4);
        assert_eq!(cache.get(&"banana"), None);
    }

    #[test]
    fn test_lru_put_mut() {
        let mut cache = make_cache(2);
        let slot = cache.put_mut("apple", 1).unwrap();
        *slot = 10;
        assert_eq!(cache.get(&"apple"), Some(&10));

        // Overwriting through put_mut also promotes
        cache.put("banana", 2);
        let slot = cache.put_mut("apple", 20).unwrap();
        assert_eq!(*slot, 20);
        cache.put("cherry", 3);
        assert_eq!(cache.get(&"banana"), None);
        assert_eq!(cache.get(&"apple"), Some(&20));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.remove(&"apple"), Some(1));
        assert_eq!(cache.get(&"apple"), None);
        assert_eq!(cache.len(), 1);

        // Idempotent
        assert_eq!(cache.remove(&"apple"), None);
        assert_eq!(cache.remove(&"cherry"), None);
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = make_cache(2);
        cache.put("apple", 1);
        cache.put("banana", 2);
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());

        // Clearing twice is the same as clearing once
        cache.clear();
        assert!(cache.is_empty());

        cache.put("cherry", 3);
        assert_eq!(cache.get(&"cherry"), Some(&3));
    }

    #[test]
    fn test_lru_zero_capacity() {
        let mut cache = make_cache(0);
        assert!(cache.put("a", 1));
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.len(), 0);
        assert!(cache.put_mut("b", 2).is_none());
    }

    #[test]
    fn test_lru_peek_lru() {
        let mut cache = make_cache(3);
        assert_eq!(cache.peek_lru_key(), None);
        assert_eq!(cache.peek_lru_value(), None);

        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
        assert_eq!(cache.peek_lru_key(), Some(&"a"));
        assert_eq!(cache.peek_lru_value(), Some(&1));

        // Peeking does not promote
        cache.put("d", 4);
        assert_eq!(cache.get(&"a"), None);

        // A hit moves the tail
        cache.get(&"b");
        assert_eq!(cache.peek_lru_key(), Some(&"c"));
    }

    #[test]
    fn test_lru_set_max_size() {
        let mut cache = make_cache(4);
        for i in 0..4 {
            cache.put(i, i * 10);
        }

        // Shrinking evicts from the tail (oldest first)
        cache.set_max_size(2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.cap(), 2);
        assert_eq!(cache.get(&0), None);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&20));
        assert_eq!(cache.get(&3), Some(&30));

        // Growing is accepted without side effect
        cache.set_max_size(8);
        assert_eq!(cache.len(), 2);
        for i in 4..10 {
            cache.put(i, i);
        }
        assert_eq!(cache.len(), 8);
    }

    #[test]
    fn test_lru_visit_all() {
        let mut cache = make_cache(3);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.put(3, 30);
        cache.get(&1);

        let mut seen = Vec::new();
        cache.visit_all(|k, v| seen.push((*k, *v)));
        seen.sort_unstable();
        assert_eq!(seen, [(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn test_lru_string_keys() {
        let mut cache = make_cache(2);
        let key1 = String::from("apple");
        let key2 = String::from("banana");
        cache.put(key1.clone(), 1);
        cache.put(key2.clone(), 2);
        assert_eq!(cache.get(&key1), Some(&1));
        // Borrowed lookups work through `Borrow<str>`
        assert_eq!(cache.get("apple"), Some(&1));
        assert_eq!(cache.get("banana"), Some(&2));
        assert!(cache.contains("apple"));
    }

    #[test]
    fn test_lru_metrics() {
        use crate::metrics::CacheMetrics;
        let mut cache = make_cache(2);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("requests").unwrap(), &0.0);
        assert_eq!(metrics.get("cache_hits").unwrap(), &0.0);

        cache.put("apple", 1);
        cache.put("banana", 2);
        cache.get(&"apple");
        cache.get(&"banana");
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits").unwrap(), &2.0);

        cache.record_miss();
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_misses").unwrap(), &1.0);
        assert_eq!(metrics.get("requests").unwrap(), &3.0);

        cache.put("cherry", 3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("evictions").unwrap(), &1.0);
        assert_eq!(metrics.get("insertions").unwrap(), &3.0);
        assert_eq!(cache.algorithm_name(), "LRU");
    }

    #[test]
    fn test_lru_size_never_exceeds_capacity() {
        let mut cache = make_cache(5);
        for i in 0..100 {
            cache.put(i % 13, i);
            assert!(cache.len() <= 5);
        }
    }

    #[test]
    fn test_lru_segment_directly() {
        let config = LruCacheConfig { capacity: 2 };
        let mut segment: LruSegment<&str, i32, DefaultHashBuilder> =
            LruSegment::init(config, DefaultHashBuilder::default());
        assert_eq!(segment.len(), 0);
        assert!(segment.is_empty());
        assert_eq!(segment.cap(), 2);
        segment.put("a", 1);
        segment.put("b", 2);
        assert_eq!(segment.len(), 2);
        assert_eq!(segment.get(&"a"), Some(&1));
        assert_eq!(segment.pop_lru(), Some(("b", 2)));
        assert_eq!(segment.len(), 1);
    }

    #[test]
    fn test_lru_values_dropped_on_evict() {
        extern crate std;
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut cache = make_cache(1);
        cache.put("a", Rc::clone(&tracker));
        cache.put("b", Rc::clone(&tracker));
        // "a" was evicted; only "b" should hold a reference
        assert_eq!(Rc::strong_count(&tracker), 2);
        drop(cache);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
