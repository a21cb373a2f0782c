//! Segmented Least Recently Used (SLRU) Cache Implementation
//!
//! SLRU is a scan-resistant cache algorithm that divides the cache into two
//! segments: a **probationary segment** for new entries and a **protected
//! segment** for entries that have proven themselves with a second access.
//! One-time access patterns (scans) can only displace probationary items,
//! leaving the working set in the protected segment untouched.
//!
//! ## Entry Lifecycle
//!
//! 1. **Insert**: new items enter the probationary segment
//! 2. **Hit in probationary**: item is promoted to the protected segment
//! 3. **Protected segment full**: its LRU item is demoted back to
//!    probationary (as that segment's MRU)
//! 4. **Eviction**: always from the LRU end of the probationary segment;
//!    the protected segment is only tapped when probationary is empty
//!
//! ## Scan Resistance Example
//!
//! ```text
//! Initial state: Protected=[A, B, C], Probationary=[D, E, F]
//!
//! Sequential scan of X, Y, Z (one-time access):
//!   put(X) → Protected=[A, B, C], Probationary=[X, D, E]  (F evicted)
//!   put(Y) → Protected=[A, B, C], Probationary=[Y, X, D]  (E evicted)
//!   put(Z) → Protected=[A, B, C], Probationary=[Z, Y, X]  (D evicted)
//!
//! Hot items A, B, C remain in the protected segment.
//! ```
//!
//! The probationary segment is allowed past its nominal share while the
//! protected segment is underfull; only the combined bound is enforced.
//!
//! This implementation doubles as the main region of
//! [`WTinyLfuCache`](crate::WTinyLfuCache), which nominates its admission
//! victims from the probationary tail.
//!
//! # Examples
//!
//! ```
//! use cachekit::SlruCache;
//! use cachekit::config::SlruCacheConfig;
//!
//! let mut cache: SlruCache<i32, i32> = SlruCache::init(SlruCacheConfig::new(10, 3), None);
//!
//! // Establish hot items in the protected segment
//! for key in [1, 2, 3] {
//!     cache.put(key, 100);
//!     cache.get(&key);  // promote
//! }
//!
//! // Simulate a scan - these items only enter probationary
//! for i in 100..120 {
//!     cache.put(i, i);
//! }
//!
//! // Hot items survive the scan
//! assert!(cache.get(&1).is_some());
//! assert!(cache.get(&2).is_some());
//! assert!(cache.get(&3).is_some());
//! ```

extern crate alloc;

use crate::config::SlruCacheConfig;
use crate::list::{List, ListEntry};
use crate::metrics::{CacheMetrics, SlruCacheMetrics};
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

/// Entry location within the SLRU cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    /// Entry is in the probationary segment
    Probationary,
    /// Entry is in the protected segment
    Protected,
}

/// Internal SLRU segment containing the actual cache algorithm.
///
/// Shared between `SlruCache` and `WTinyLfuCache` (which uses it as the
/// main region). All algorithm logic is implemented here to avoid
/// duplication.
///
/// # Safety
///
/// This struct contains raw pointers in the `map` field. These pointers
/// are always valid as long as:
/// - The pointer was obtained from `probationary` or `protected` insertion
/// - The node has not been removed from the lists
/// - The segment has not been dropped
pub(crate) struct SlruSegment<K, V, S = DefaultHashBuilder> {
    /// Configuration for the SLRU cache
    config: SlruCacheConfig,

    /// The probationary list holding newer or less frequently accessed items
    probationary: List<(K, V)>,

    /// The protected list holding items with a second access
    protected: List<(K, V)>,

    /// Key index over both lists; the tag records which list a node is in
    #[allow(clippy::type_complexity)]
    map: HashMap<K, (*mut ListEntry<(K, V)>, Location), S>,

    /// Metrics for tracking cache performance and segment behavior
    metrics: SlruCacheMetrics,
}

// SAFETY: SlruSegment owns all data and raw pointers point only to nodes owned by
// `probationary` or `protected` lists. Concurrent access is safe when wrapped in
// proper synchronization primitives.
unsafe impl<K: Send, V: Send, S: Send> Send for SlruSegment<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for SlruSegment<K, V, S> {}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SlruSegment<K, V, S> {
    /// Creates a new SLRU segment from a configuration and hash builder.
    pub(crate) fn init(config: SlruCacheConfig, hasher: S) -> Self {
        SlruSegment {
            config,
            probationary: List::new(config.probationary_capacity()),
            protected: List::new(config.protected_capacity()),
            map: HashMap::with_capacity_and_hasher(
                config.capacity().next_power_of_two(),
                hasher,
            ),
            metrics: SlruCacheMetrics::new(),
        }
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.config.capacity()
    }

    #[inline]
    pub(crate) fn protected_cap(&self) -> usize {
        self.config.protected_capacity()
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
    pub(crate) fn metrics(&self) -> &SlruCacheMetrics {
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

    /// The key the next capacity eviction would remove: the probationary
    /// tail, falling back to the protected tail.
    pub(crate) fn victim_key(&self) -> Option<&K> {
        self.probationary
            .back()
            .map(|(k, _)| k)
            .or_else(|| self.protected.back().map(|(k, _)| k))
    }

    /// Moves a probationary node into the protected segment, demoting the
    /// protected LRU entry if that segment is full.
    ///
    /// Returns the node pointer in its new home (unchanged; the node itself
    /// migrates between lists without reallocation).
    ///
    /// # Safety
    ///
    /// `node` must point to a live entry of the probationary list.
    unsafe fn promote_to_protected(
        &mut self,
        node: *mut ListEntry<(K, V)>,
    ) -> *mut ListEntry<(K, V)> {
        // SAFETY: caller guarantees node is in the probationary list
        let boxed = unsafe { self.probationary.remove(node) }
            .expect("promoted node must be in the probationary list");

        if self.protected.is_full() {
            // SAFETY: the protected list is non-empty when full here
            unsafe {
                self.demote_lru_protected();
            }
        }

        let ptr = Box::into_raw(boxed);
        // SAFETY: ptr was just produced from a live entry
        let key = unsafe { (*ptr).get_value().0.clone() };
        if let Some(entry) = self.map.get_mut(&key) {
            entry.0 = ptr;
            entry.1 = Location::Protected;
        }
        // SAFETY: ptr is detached and not part of any list
        unsafe {
            self.protected.attach_from_other_list(ptr);
        }
        ptr
    }

    /// Demotes the protected LRU entry to the probationary MRU position.
    ///
    /// # Safety
    ///
    /// Only sound while the map is consistent with the lists; the demoted
    /// node keeps its address.
    unsafe fn demote_lru_protected(&mut self) {
        if let Some(boxed) = self.protected.remove_last() {
            let ptr = Box::into_raw(boxed);
            // SAFETY: ptr came from a live protected entry
            let key = unsafe { (*ptr).get_value().0.clone() };
            if let Some(entry) = self.map.get_mut(&key) {
                entry.0 = ptr;
                entry.1 = Location::Probationary;
            }
            // SAFETY: ptr is detached and not part of any list
            unsafe {
                self.probationary.attach_from_other_list(ptr);
            }
            self.metrics.record_demotion();
        }
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node, location) = self.map.get(key).copied()?;

        match location {
            Location::Probationary => {
                self.metrics.record_probationary_hit();
                if self.protected_cap() == 0 {
                    // No protected segment to promote into
                    unsafe {
                        // SAFETY: node comes from our map
                        self.probationary.move_to_front(node);
                        let (_, v) = (*node).get_value();
                        Some(v)
                    }
                } else {
                    // SAFETY: node comes from our map and is probationary
                    let ptr = unsafe { self.promote_to_protected(node) };
                    self.metrics.record_promotion();
                    // SAFETY: ptr is the node's home after promotion
                    unsafe {
                        let (_, v) = (*ptr).get_value();
                        Some(v)
                    }
                }
            }
            Location::Protected => {
                self.metrics.record_protected_hit();
                unsafe {
                    // SAFETY: node comes from our map
                    self.protected.move_to_front(node);
                    let (_, v) = (*node).get_value();
                    Some(v)
                }
            }
        }
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node, location) = self.map.get(key).copied()?;

        match location {
            Location::Probationary => {
                self.metrics.record_probationary_hit();
                if self.protected_cap() == 0 {
                    unsafe {
                        // SAFETY: node comes from our map
                        self.probationary.move_to_front(node);
                        let (_, v) = (*node).get_value_mut();
                        Some(v)
                    }
                } else {
                    // SAFETY: node comes from our map and is probationary
                    let ptr = unsafe { self.promote_to_protected(node) };
                    self.metrics.record_promotion();
                    // SAFETY: ptr is the node's home after promotion
                    unsafe {
                        let (_, v) = (*ptr).get_value_mut();
                        Some(v)
                    }
                }
            }
            Location::Protected => {
                self.metrics.record_protected_hit();
                unsafe {
                    // SAFETY: node comes from our map
                    self.protected.move_to_front(node);
                    let (_, v) = (*node).get_value_mut();
                    Some(v)
                }
            }
        }
    }

    /// Inserts a key-value pair.
    ///
    /// Returns `false` on overwrite of a resident key, `true` when a fresh
    /// entry was admitted into the probationary segment.
    pub(crate) fn put(&mut self, key: K, value: V) -> bool {
        if let Some((node, location)) = self.map.get(&key).copied() {
            self.metrics.core.record_update();
            let list = match location {
                Location::Probationary => &mut self.probationary,
                Location::Protected => &mut self.protected,
            };
            unsafe {
                // SAFETY: node comes from our map
                list.move_to_front(node);
                (*node).get_value_mut().1 = value;
            }
            return false;
        }

        if self.cap() == 0 {
            // Degenerate capacity: the insertion immediately evicts itself.
            self.metrics.core.record_insertion();
            self.metrics.record_probationary_eviction();
            return true;
        }

        while self.len() >= self.cap() {
            if self.evict_victim().is_none() {
                break;
            }
        }

        let node = self.probationary.add_unchecked((key.clone(), value));
        self.map.insert(key, (node, Location::Probationary));
        self.metrics.core.record_insertion();
        true
    }

    /// Evicts the current victim: probationary tail, or protected tail when
    /// probationary is empty.
    pub(crate) fn evict_victim(&mut self) -> Option<(K, V)> {
        if !self.probationary.is_empty() {
            let (key, value) = self.probationary.pop_back()?;
            self.map.remove(&key);
            self.metrics.record_probationary_eviction();
            Some((key, value))
        } else {
            let (key, value) = self.protected.pop_back()?;
            self.map.remove(&key);
            self.metrics.record_protected_eviction();
            Some((key, value))
        }
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (node, location) = self.map.remove(key)?;
        self.metrics.core.record_eviction();
        let boxed = unsafe {
            // SAFETY: node comes from our map and was just unindexed
            match location {
                Location::Probationary => self.probationary.remove(node),
                Location::Protected => self.protected.remove(node),
            }
        }?;
        // SAFETY: boxed holds an initialized entry
        let (_, value) = unsafe { boxed.take_value() };
        Some(value)
    }

    /// Shrinks the segment to at most `n` entries.
    ///
    /// The protected share is clamped to the new total; entries over the
    /// clamped share are demoted, entries over the total are evicted by the
    /// victim rule.
    pub(crate) fn set_max_size(&mut self, n: usize) {
        let protected_cap = self.protected_cap().min(n);
        self.set_capacities(n, protected_cap);
    }

    /// Re-targets both the total and the protected share.
    ///
    /// Used by the windowed admission cache, whose resize recomputes the
    /// protected share from scratch.
    pub(crate) fn set_capacities(&mut self, total: usize, protected_cap: usize) {
        debug_assert!(protected_cap <= total);
        while self.len() > total {
            if self.evict_victim().is_none() {
                break;
            }
        }
        while self.protected.len() > protected_cap {
            // SAFETY: the protected list is non-empty inside the loop
            unsafe {
                self.demote_lru_protected();
            }
        }
        self.config = SlruCacheConfig::new(total, protected_cap);
        self.protected.set_cap(protected_cap);
        self.probationary.set_cap(total - protected_cap);
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.probationary.clear();
        self.protected.clear();
    }

    /// Calls `f` for every resident entry in both segments.
    pub(crate) fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.probationary.for_each(|(k, v)| f(k, v));
        self.protected.for_each(|(k, v)| f(k, v));
    }
}

impl<K, V, S> core::fmt::Debug for SlruSegment<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SlruSegment")
            .field("capacity", &self.config.capacity())
            .field("protected_capacity", &self.config.protected_capacity())
            .field("len", &self.map.len())
            .finish()
    }
}

/// A Segmented Least Recently Used (SLRU) cache.
///
/// The cache is divided into two segments:
/// - Probationary segment: where new entries are initially placed
/// - Protected segment: where entries are promoted to on a second access
///
/// When the cache reaches capacity, the least recently used entry of the
/// probationary segment is evicted; the protected segment is only tapped
/// when probationary is empty.
///
/// # Examples
///
/// ```
/// use cachekit::SlruCache;
/// use cachekit::config::SlruCacheConfig;
///
/// // Total capacity 4, protected capacity 2
/// let mut cache = SlruCache::init(SlruCacheConfig::new(4, 2), None);
///
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3);
/// cache.put("d", 4);
///
/// // Promote "a" into the protected segment
/// assert_eq!(cache.get(&"a"), Some(&1));
///
/// // The next insert evicts from probationary; "a" is safe
/// cache.put("e", 5);
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
#[derive(Debug)]
pub struct SlruCache<K, V, S = DefaultHashBuilder> {
    segment: SlruSegment<K, V, S>,
}

impl<K: Hash + Eq + Clone, V> SlruCache<K, V> {
    /// Creates a new SLRU cache from a configuration with an optional hasher.
    pub fn init(
        config: SlruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> SlruCache<K, V, DefaultHashBuilder> {
        SlruCache {
            segment: SlruSegment::init(config, hasher.unwrap_or_default()),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> SlruCache<K, V, S> {
    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn cap(&self) -> usize {
        self.segment.cap()
    }

    /// Returns the maximum size of the protected segment.
    #[inline]
    pub fn protected_cap(&self) -> usize {
        self.segment.protected_cap()
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
    /// A probationary hit promotes the entry to the protected segment; a
    /// protected hit refreshes its recency.
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.get(key)
    }

    /// Retrieves a mutable reference to the value for the given key.
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

    /// Read-only peek at the key the next eviction would remove.
    #[inline]
    pub fn peek_lru_key(&self) -> Option<&K> {
        self.segment.victim_key()
    }

    /// Inserts a key-value pair into the probationary segment.
    ///
    /// Returns `false` on overwrite (no admission), `true` on fresh
    /// insertion. Never fails.
    #[inline]
    pub fn put(&mut self, key: K, value: V) -> bool {
        self.segment.put(key, value)
    }

    /// Removes a key from whichever segment holds it.
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

    /// Shrinks the cache to at most `n` entries; the protected share is
    /// clamped to the new total. Growing is accepted without side effect.
    #[inline]
    pub fn set_max_size(&mut self, n: usize) {
        self.segment.set_max_size(n)
    }

    /// Removes all entries from both segments.
    #[inline]
    pub fn clear(&mut self) {
        self.segment.clear()
    }

    /// Calls `f` for every resident entry in both segments.
    #[inline]
    pub fn visit_all<F>(&self, f: F)
    where
        F: FnMut(&K, &V),
    {
        self.segment.visit_all(f)
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for SlruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.segment.metrics().metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.segment.metrics().algorithm_name()
    }
}
