//! Adaptive Replacement Cache (ARC) Implementation
//!
//! ARC balances recency and frequency without hand tuning. It splits its
//! capacity across four recency-ordered partitions: two resident lists
//! holding actual values and two ghost lists remembering only the keys of
//! recently evicted entries.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                           ARC Cache                               │
//! │                                                                   │
//! │   resident (values)                ghosts (keys only)             │
//! │  ┌──────────────────┐            ┌──────────────────┐             │
//! │  │ T1: seen once    │── evict ──▶│ B1: recency      │             │
//! │  │ T2: seen multi   │── evict ──▶│ B2: frequency    │             │
//! │  └──────────────────┘            └──────────────────┘             │
//! │        ▲      ▲                        │      │                   │
//! │        │      └──── ghost hit in B2 ───┘      │                   │
//! │        └─────────── ghost hit in B1 ──────────┘                   │
//! │                                                                   │
//! │  p: adaptive target for |T1|; grows on B1 hits (workload is       │
//! │     recency-friendly), shrinks on B2 hits (frequency-friendly)    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## How adaptation works
//!
//! - A key inserted for the first time enters T1. A second touch promotes
//!   it to T2.
//! - When the residents are at their target size, `replace` demotes the
//!   tail of T1 or T2 (steered by `p`) into the matching ghost list. Ghost
//!   entries carry no value; they are tombstones recording prior residency.
//! - Inserting a key found in B1 means "we evicted this too early for the
//!   recency side": `p` grows, and the key re-enters directly into T2.
//!   A hit in B2 means the opposite and shrinks `p`. The adjustment δ is
//!   proportional to the relative ghost list sizes, so a lopsided history
//!   adapts faster.
//!
//! ## Capacity split
//!
//! Capacity `c` is split by an asymmetric quarter rule (see
//! [`ArcCacheConfig`]): T1/T2/B1/B2 get `c/4` each with the remainder
//! handed to T1, then T2, then B1. The derived **resident target**
//! `s = t1_cap + t2_cap` bounds `|T1| + |T2|`; the **ghost capacity**
//! `c − s` bounds each ghost list and clamps `p`. Within those combined
//! bounds the individual lists flex with the workload.
//!
//! ## Invariants
//!
//! For capacity `c`, resident target `s`:
//!
//! - `|T1| + |T2| ≤ s` and `|T1| + |B1| ≤ c`
//! - a key lives in at most one partition (structural: one shared index)
//! - ghost entries have no value slot at all (`List<K>`, not `List<(K, V)>`)
//! - `p ∈ [0, c − s]`; `clear` resets `p` to 0
//!
//! # Examples
//!
//! ```
//! use cachekit::ArcCache;
//! use cachekit::config::ArcCacheConfig;
//!
//! let mut cache = ArcCache::init(ArcCacheConfig::new(12), None);
//!
//! for i in 0..3 {
//!     cache.put(i, i * 10);
//! }
//! // First touches land in T1
//! assert_eq!(cache.t1_len(), 3);
//!
//! for i in 0..3 {
//!     cache.put(i, i * 10);
//! }
//! // Second touches migrate to T2
//! assert_eq!(cache.t1_len(), 0);
//! assert_eq!(cache.t2_len(), 3);
//! assert_eq!(cache.len(), 3);
//! ```

extern crate alloc;

use crate::config::ArcCacheConfig;
use crate::list::{List, ListEntry};
use crate::metrics::{ArcCacheMetrics, CacheMetrics};
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
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

/// Which partition a key currently lives in, with its list node.
///
/// Resident slots point into the value-carrying lists, ghost slots into
/// the keys-only lists. One shared index makes "a key is in at most one
/// partition" structural rather than a protocol.
enum Slot<K, V> {
    /// Resident, seen once
    T1(*mut ListEntry<(K, V)>),
    /// Resident, seen multiple times
    T2(*mut ListEntry<(K, V)>),
    /// Ghost of a T1 eviction
    B1(*mut ListEntry<K>),
    /// Ghost of a T2 eviction
    B2(*mut ListEntry<K>),
}

impl<K, V> Clone for Slot<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Slot<K, V> {}

/// An Adaptive Replacement Cache.
///
/// Self-tunes between recency (LRU-like) and frequency (LFU-like)
/// behavior by tracking ghost hits on recently evicted keys. See the
/// [module documentation](self) for the algorithm.
///
/// # Type Parameters
///
/// - `K`: Key type. Must implement `Hash + Eq + Clone`.
/// - `V`: Value type.
/// - `S`: Hash builder type. Defaults to `DefaultHashBuilder`.
pub struct ArcCache<K, V, S = DefaultHashBuilder> {
    /// Capacity split configuration
    config: ArcCacheConfig,

    /// Resident entries seen exactly once
    t1: List<(K, V)>,

    /// Resident entries seen more than once
    t2: List<(K, V)>,

    /// Keys recently evicted from T1
    b1: List<K>,

    /// Keys recently evicted from T2
    b2: List<K>,

    /// Shared index over all four partitions
    map: HashMap<K, Slot<K, V>, S>,

    /// Adaptive target size for T1, in [0, ghost_capacity]
    p: usize,

    /// ARC-specific metrics
    metrics: ArcCacheMetrics,
}

// SAFETY: ArcCache owns all data and raw pointers point only to nodes owned by
// its four lists. Concurrent access is safe when wrapped in proper synchronization.
unsafe impl<K: Send, V: Send, S: Send> Send for ArcCache<K, V, S> {}

// SAFETY: All mutation requires &mut self; shared references cannot cause data races.
unsafe impl<K: Send, V: Send, S: Sync> Sync for ArcCache<K, V, S> {}

impl<K: Hash + Eq + Clone, V> ArcCache<K, V> {
    /// Creates a new ARC cache from a configuration with an optional hasher.
    ///
    /// # Example
    ///
    /// ```
    /// use cachekit::ArcCache;
    /// use cachekit::config::ArcCacheConfig;
    ///
    /// let mut cache: ArcCache<&str, i32> = ArcCache::init(ArcCacheConfig::new(8), None);
    /// cache.put("key", 42);
    /// assert_eq!(cache.get(&"key"), Some(&42));
    /// ```
    pub fn init(
        config: ArcCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> ArcCache<K, V, DefaultHashBuilder> {
        ArcCache {
            config,
            t1: List::new(config.capacity()),
            t2: List::new(config.capacity()),
            b1: List::new(config.ghost_capacity()),
            b2: List::new(config.ghost_capacity()),
            map: HashMap::with_capacity_and_hasher(
                config.capacity().next_power_of_two(),
                hasher.unwrap_or_default(),
            ),
            p: 0,
            metrics: ArcCacheMetrics::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> ArcCache<K, V, S> {
    /// Returns the total configured capacity.
    #[inline]
    pub fn cap(&self) -> usize {
        self.config.capacity()
    }

    /// Returns the number of resident entries (`|T1| + |T2|`).
    ///
    /// Ghost entries are bookkeeping, not contents, and are not counted.
    #[inline]
    pub fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    /// Returns `true` if no resident entries exist.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries in the T1 (seen once) partition.
    #[inline]
    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    /// Number of entries in the T2 (seen multiple) partition.
    #[inline]
    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    /// Number of ghost keys in B1.
    #[inline]
    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    /// Number of ghost keys in B2.
    #[inline]
    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    /// Current value of the adaptive target `p`.
    #[inline]
    pub fn target_recency(&self) -> usize {
        self.p
    }

    /// Returns `true` if the key is resident (ghosts do not count).
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        matches!(
            self.map.get(key),
            Some(Slot::T1(_)) | Some(Slot::T2(_))
        )
    }

    /// Records a cache miss for metrics tracking.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    #[inline]
    fn resident_len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    /// Drops the oldest B1 ghost and unindexes it.
    fn pop_oldest_b1(&mut self) -> Option<K> {
        let key = self.b1.pop_back()?;
        self.map.remove(&key);
        Some(key)
    }

    /// Drops the oldest B2 ghost and unindexes it.
    fn pop_oldest_b2(&mut self) -> Option<K> {
        let key = self.b2.pop_back()?;
        self.map.remove(&key);
        Some(key)
    }

    /// Records `key` as a B1 ghost, discarding the oldest ghost first when
    /// the list is at the ghost capacity.
    fn record_ghost_b1(&mut self, key: K) {
        let ghost_cap = self.config.ghost_capacity();
        if ghost_cap == 0 {
            self.map.remove(&key);
            return;
        }
        if self.b1.len() >= ghost_cap {
            self.pop_oldest_b1();
        }
        let node = self.b1.add_unchecked(key.clone());
        self.map.insert(key, Slot::B1(node));
    }

    /// Records `key` as a B2 ghost, discarding the oldest ghost first when
    /// the list is at the ghost capacity.
    fn record_ghost_b2(&mut self, key: K) {
        let ghost_cap = self.config.ghost_capacity();
        if ghost_cap == 0 {
            self.map.remove(&key);
            return;
        }
        if self.b2.len() >= ghost_cap {
            self.pop_oldest_b2();
        }
        let node = self.b2.add_unchecked(key.clone());
        self.map.insert(key, Slot::B2(node));
    }

    /// Demotes one resident to the matching ghost list: the T1 tail when
    /// T1 exceeds the target `p` (or matches it and `favor_t1` is set),
    /// the T2 tail otherwise. The value is discarded, the key recorded.
    ///
    /// Falls back to the opposite list when the nominated list is empty so
    /// that a victim is always demoted while residents are at target.
    fn replace(&mut self, favor_t1: bool) {
        let t1_len = self.t1.len();
        if t1_len > 0 && (t1_len > self.p || (t1_len == self.p && favor_t1)) {
            if let Some((key, _value)) = self.t1.pop_back() {
                self.metrics.record_t1_demotion();
                self.record_ghost_b1(key);
                return;
            }
        }
        if let Some((key, _value)) = self.t2.pop_back() {
            self.metrics.record_t2_demotion();
            self.record_ghost_b2(key);
        } else if let Some((key, _value)) = self.t1.pop_back() {
            self.metrics.record_t1_demotion();
            self.record_ghost_b1(key);
        }
    }

    /// Removes `key` from whichever ghost list holds it, if any.
    ///
    /// Looked up fresh from the index because a preceding demotion may
    /// have trimmed this very ghost.
    fn take_ghost(&mut self, key: &K) {
        match self.map.get(key).copied() {
            Some(Slot::B1(node)) => {
                self.map.remove(key);
                // SAFETY: node comes from our index and lives in b1
                unsafe {
                    if let Some(entry) = self.b1.remove(node) {
                        drop(entry.take_value());
                    }
                }
            }
            Some(Slot::B2(node)) => {
                self.map.remove(key);
                // SAFETY: node comes from our index and lives in b2
                unsafe {
                    if let Some(entry) = self.b2.remove(node) {
                        drop(entry.take_value());
                    }
                }
            }
            _ => {}
        }
    }

    /// Inserts a fresh resident into T1.
    fn insert_resident_t1(&mut self, key: K, value: V) {
        let node = self.t1.add_unchecked((key.clone(), value));
        self.map.insert(key, Slot::T1(node));
        self.metrics.core.record_insertion();
    }

    /// Inserts a fresh resident directly into T2 (ghost readmission).
    fn insert_resident_t2(&mut self, key: K, value: V) {
        let node = self.t2.add_unchecked((key.clone(), value));
        self.map.insert(key, Slot::T2(node));
        self.metrics.core.record_insertion();
    }

    /// Migrates a T1 node into T2 (front position), preserving its value.
    ///
    /// # Safety
    ///
    /// `node` must point to a live entry of the T1 list.
    unsafe fn promote_t1_node(&mut self, node: *mut ListEntry<(K, V)>) -> *mut ListEntry<(K, V)> {
        // SAFETY: caller guarantees node is in T1
        let boxed = unsafe { self.t1.remove(node) }.expect("promoted node must be in T1");
        let ptr = Box::into_raw(boxed);
        // SAFETY: ptr was just produced from a live entry
        let key = unsafe { (*ptr).get_value().0.clone() };
        if let Some(slot) = self.map.get_mut(&key) {
            *slot = Slot::T2(ptr);
        }
        // SAFETY: ptr is detached and not part of any list
        unsafe {
            self.t2.attach_from_other_list(ptr);
        }
        ptr
    }

    /// Inserts a key-value pair, running the ARC case analysis.
    ///
    /// Exactly one of the five cases applies:
    ///
    /// 1. key in T1: promote to T2 with the new value
    /// 2. key in T2: refresh recency, overwrite the value
    /// 3. key in B1: ghost hit favoring recency; grow `p`, demote if at
    ///    target, readmit straight into T2
    /// 4. key in B2: ghost hit favoring frequency; shrink `p`, demote if
    ///    at target, readmit straight into T2
    /// 5. cold miss: demote if at target, trim the ghost lists toward
    ///    their adaptive shares, insert into T1
    ///
    /// Returns `true` in every branch; the operation never fails.
    pub fn put(&mut self, key: K, value: V) -> bool {
        match self.map.get(&key).copied() {
            Some(Slot::T1(node)) => {
                self.metrics.core.record_update();
                // SAFETY: node comes from our index and lives in T1
                let ptr = unsafe { self.promote_t1_node(node) };
                // SAFETY: ptr is the node's home after promotion
                unsafe {
                    (*ptr).get_value_mut().1 = value;
                }
            }
            Some(Slot::T2(node)) => {
                self.metrics.core.record_update();
                unsafe {
                    // SAFETY: node comes from our index and lives in T2
                    self.t2.move_to_front(node);
                    (*node).get_value_mut().1 = value;
                }
            }
            Some(Slot::B1(_)) => {
                self.metrics.record_b1_ghost_hit();
                let b1_len = self.b1.len();
                let b2_len = self.b2.len();
                let delta = if b2_len > b1_len { b2_len / b1_len } else { 1 };
                self.p = (self.p + delta).min(self.config.ghost_capacity());

                if self.resident_len() >= self.config.resident_capacity() {
                    self.replace(false);
                }

                self.take_ghost(&key);
                self.insert_resident_t2(key, value);
            }
            Some(Slot::B2(_)) => {
                self.metrics.record_b2_ghost_hit();
                let b1_len = self.b1.len();
                let b2_len = self.b2.len();
                let delta = if b1_len > b2_len { b1_len / b2_len } else { 1 };
                self.p = self.p.saturating_sub(delta);

                if self.resident_len() >= self.config.resident_capacity() {
                    self.replace(true);
                }

                self.take_ghost(&key);
                self.insert_resident_t2(key, value);
            }
            None => {
                let resident_cap = self.config.resident_capacity();
                if resident_cap == 0 {
                    // Degenerate capacity: the insertion immediately evicts itself.
                    self.metrics.core.record_insertion();
                    self.metrics.core.record_eviction();
                    return true;
                }

                if self.resident_len() >= resident_cap {
                    self.replace(false);
                }

                // Trim the ghost lists toward their adaptive shares
                let ghost_cap = self.config.ghost_capacity();
                if self.b1.len() > ghost_cap - self.p {
                    self.pop_oldest_b1();
                }
                if self.b2.len() > self.p {
                    self.pop_oldest_b2();
                }

                self.insert_resident_t1(key, value);
            }
        }
        true
    }

    /// As [`put`](Self::put), but returns a borrow of the stored value.
    ///
    /// Returns `None` only when the cache retains nothing (zero resident
    /// capacity).
    pub fn put_mut(&mut self, key: K, value: V) -> Option<&mut V> {
        self.put(key.clone(), value);
        match self.map.get(&key).copied() {
            Some(Slot::T1(node)) | Some(Slot::T2(node)) => {
                // SAFETY: node comes from our index and is resident
                unsafe { Some(&mut (*node).get_value_mut().1) }
            }
            _ => None,
        }
    }

    /// Retrieves a reference to the value for the given key.
    ///
    /// A T1 hit migrates the entry to T2 (second touch); a T2 hit
    /// refreshes its recency. Ghost entries are invisible here: they
    /// influence the adaptation only on the `put` path.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(Slot::T1(node)) => {
                self.metrics.core.record_hit();
                // SAFETY: node comes from our index and lives in T1
                let ptr = unsafe { self.promote_t1_node(node) };
                // SAFETY: ptr is the node's home after promotion
                unsafe { Some(&(*ptr).get_value().1) }
            }
            Some(Slot::T2(node)) => {
                self.metrics.core.record_hit();
                unsafe {
                    // SAFETY: node comes from our index and lives in T2
                    self.t2.move_to_front(node);
                    Some(&(*node).get_value().1)
                }
            }
            _ => None,
        }
    }

    /// Retrieves a mutable reference to the value for the given key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(Slot::T1(node)) => {
                self.metrics.core.record_hit();
                // SAFETY: node comes from our index and lives in T1
                let ptr = unsafe { self.promote_t1_node(node) };
                // SAFETY: ptr is the node's home after promotion
                unsafe { Some(&mut (*ptr).get_value_mut().1) }
            }
            Some(Slot::T2(node)) => {
                self.metrics.core.record_hit();
                unsafe {
                    // SAFETY: node comes from our index and lives in T2
                    self.t2.move_to_front(node);
                    Some(&mut (*node).get_value_mut().1)
                }
            }
            _ => None,
        }
    }

    /// Removes a key from whichever partition holds it (idempotent).
    ///
    /// Returns the value for a resident key; `None` for ghosts and absent
    /// keys.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.remove(key)? {
            Slot::T1(node) => {
                self.metrics.core.record_eviction();
                // SAFETY: node comes from our index and lives in T1
                let entry = unsafe { self.t1.remove(node) }?;
                // SAFETY: entry holds an initialized pair
                let (_, value) = unsafe { entry.take_value() };
                Some(value)
            }
            Slot::T2(node) => {
                self.metrics.core.record_eviction();
                // SAFETY: node comes from our index and lives in T2
                let entry = unsafe { self.t2.remove(node) }?;
                // SAFETY: entry holds an initialized pair
                let (_, value) = unsafe { entry.take_value() };
                Some(value)
            }
            Slot::B1(node) => {
                // SAFETY: node comes from our index and lives in b1
                unsafe {
                    if let Some(entry) = self.b1.remove(node) {
                        drop(entry.take_value());
                    }
                }
                None
            }
            Slot::B2(node) => {
                // SAFETY: node comes from our index and lives in b2
                unsafe {
                    if let Some(entry) = self.b2.remove(node) {
                        drop(entry.take_value());
                    }
                }
                None
            }
        }
    }

    /// Read-only peek at the key `replace` would demote next.
    pub fn peek_lru_key(&self) -> Option<&K> {
        let t1_len = self.t1.len();
        if t1_len > 0 && t1_len > self.p {
            self.t1.back().map(|(k, _)| k)
        } else {
            self.t2
                .back()
                .map(|(k, _)| k)
                .or_else(|| self.t1.back().map(|(k, _)| k))
        }
    }

    /// Read-only peek at the value `replace` would demote next.
    pub fn peek_lru_value(&self) -> Option<&V> {
        let t1_len = self.t1.len();
        if t1_len > 0 && t1_len > self.p {
            self.t1.back().map(|(_, v)| v)
        } else {
            self.t2
                .back()
                .map(|(_, v)| v)
                .or_else(|| self.t1.back().map(|(_, v)| v))
        }
    }

    /// Re-splits the capacity by the quarter rule, shrinks every partition
    /// to its recomputed share, and clamps `p` into the new ghost range.
    ///
    /// Growing is accepted without side effect on the contents.
    pub fn set_max_size(&mut self, n: usize) {
        let config = ArcCacheConfig::new(n);

        while self.t1.len() > config.t1_capacity() {
            match self.t1.pop_back() {
                Some((key, _value)) => {
                    self.map.remove(&key);
                    self.metrics.core.record_eviction();
                }
                None => break,
            }
        }
        while self.t2.len() > config.t2_capacity() {
            match self.t2.pop_back() {
                Some((key, _value)) => {
                    self.map.remove(&key);
                    self.metrics.core.record_eviction();
                }
                None => break,
            }
        }
        while self.b1.len() > config.b1_capacity() {
            if self.pop_oldest_b1().is_none() {
                break;
            }
        }
        while self.b2.len() > config.b2_capacity() {
            if self.pop_oldest_b2().is_none() {
                break;
            }
        }

        self.t1.set_cap(n);
        self.t2.set_cap(n);
        self.b1.set_cap(config.ghost_capacity());
        self.b2.set_cap(config.ghost_capacity());
        self.config = config;
        self.p = self.p.min(config.ghost_capacity());
    }

    /// Clears all four partitions and resets the adaptive target to 0.
    pub fn clear(&mut self) {
        self.map.clear();
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        self.p = 0;
    }

    /// Calls `f` for every resident entry (T1 then T2).
    ///
    /// Ghost partitions hold no values; walk them with
    /// [`visit_b1`](Self::visit_b1) / [`visit_b2`](Self::visit_b2).
    pub fn visit_all<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.t1.for_each(|(k, v)| f(k, v));
        self.t2.for_each(|(k, v)| f(k, v));
    }

    /// Calls `f` for every entry of the T1 partition.
    pub fn visit_t1<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.t1.for_each(|(k, v)| f(k, v));
    }

    /// Calls `f` for every entry of the T2 partition.
    pub fn visit_t2<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.t2.for_each(|(k, v)| f(k, v));
    }

    /// Calls `f` for every ghost key in B1.
    pub fn visit_b1<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        self.b1.for_each(|k| f(k));
    }

    /// Calls `f` for every ghost key in B2.
    pub fn visit_b2<F>(&self, mut f: F)
    where
        F: FnMut(&K),
    {
        self.b2.for_each(|k| f(k));
    }
}

impl<K, V, S> core::fmt::Debug for ArcCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArcCache")
            .field("capacity", &self.config.capacity())
            .field("t1_len", &self.t1.len())
            .field("t2_len", &self.t2.len())
            .field("b1_len", &self.b1.len())
            .field("b2_len", &self.b2.len())
            .field("p", &self.p)
            .finish()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> CacheMetrics for ArcCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.metrics.metrics();
        metrics.insert("target_recency".to_string(), self.p as f64);
        metrics.insert("resident_entries".to_string(), self.len() as f64);
        metrics.insert(
            "ghost_entries".to_string(),
            (self.b1.len() + self.b2.len()) as f64,
        );
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}
