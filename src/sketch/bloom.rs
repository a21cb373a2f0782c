//! Plain and doorkeeper-gated 4-bit counting Bloom filters.
//!
//! The plain sketch packs sixteen 4-bit counters into each `u64` word of a
//! power-of-two table. Each recorded access increments four counters (one
//! per seeded probe) and a frequency estimate is the minimum of the four.
//! Aging is left to the caller via [`BloomSketch::reset`], which halves
//! every counter in parallel.
//!
//! The gated variant puts a one-bit [`Doorkeeper`] in front: a key's first
//! access only sets its doorkeeper bits, so one-hit wonders never touch the
//! counter table at all.

extern crate alloc;

use super::{FrequencySketch, RESET_MASK, SEEDS};
use crate::sketch::Doorkeeper;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// Maximum value of a 4-bit counter.
const COUNTER_MAX: u64 = 0xF;

/// A plain 4-bit counting Bloom filter.
///
/// The table holds `max(1, next_power_of_two(capacity) / 4)` words of
/// sixteen counters each. Counters saturate at 15; [`reset`](Self::reset)
/// halves them all for caller-driven aging.
///
/// # Examples
///
/// ```
/// use cachekit::sketch::{BloomSketch, FrequencySketch};
///
/// let mut sketch = BloomSketch::new(64);
/// sketch.record_access(&"key");
/// sketch.record_access(&"key");
/// assert_eq!(sketch.frequency(&"key"), 2);
///
/// sketch.reset();
/// assert_eq!(sketch.frequency(&"key"), 1);
/// ```
pub struct BloomSketch<S = DefaultHashBuilder> {
    /// Counter table; sixteen 4-bit counters per word
    table: Vec<u64>,
    /// Hash builder supplying the base hash per item
    hasher: S,
    /// Successful increments since the last reset or clear
    size: usize,
}

impl BloomSketch<DefaultHashBuilder> {
    /// Creates a sketch sized for `capacity` distinct items.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<S: BuildHasher> BloomSketch<S> {
    /// As [`new`](Self::new) with an explicit hash builder.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        // One word carries 16 counters; keep at least one word so the
        // index mask stays valid for tiny capacities.
        let words = (capacity.next_power_of_two() >> 2).max(1);
        Self {
            table: vec![0; words],
            hasher,
            size: 0,
        }
    }

    /// Probe position for `step`: word index and bit offset of the counter.
    fn probe<Q: Hash + ?Sized>(&self, item: &Q, step: usize) -> (usize, u32) {
        let base = self.hasher.hash_one(item);
        let mixed = SEEDS[step].wrapping_mul(base);
        let hash = mixed.wrapping_add(mixed >> 32) as u32;
        let index = (hash as usize) & (self.table.len() - 1);
        let offset = (((hash & 3) << 2) + step as u32) << 2;
        (index, offset)
    }

    /// Counter value at the probe position for `step`.
    fn count_at<Q: Hash + ?Sized>(&self, item: &Q, step: usize) -> u8 {
        let (index, offset) = self.probe(item, step);
        ((self.table[index] >> offset) & COUNTER_MAX) as u8
    }

    /// Increments the counter at `step` unless it is saturated.
    fn try_increment<Q: Hash + ?Sized>(&mut self, item: &Q, step: usize) -> bool {
        let (index, offset) = self.probe(item, step);
        if (self.table[index] >> offset) & COUNTER_MAX != COUNTER_MAX {
            self.table[index] += 1u64 << offset;
            true
        } else {
            false
        }
    }

    /// Halves every counter in parallel and the size tally with them.
    ///
    /// Caller-driven aging: the sketch never invokes this itself.
    pub fn reset(&mut self) {
        for counters in &mut self.table {
            *counters = (*counters >> 1) & RESET_MASK;
        }
        self.size >>= 1;
    }
}

impl<S: BuildHasher> FrequencySketch for BloomSketch<S> {
    fn record_access<Q: Hash + ?Sized>(&mut self, item: &Q) {
        let mut was_added = false;
        for step in 0..SEEDS.len() {
            was_added |= self.try_increment(item, step);
        }
        if was_added {
            self.size += 1;
        }
    }

    fn frequency<Q: Hash + ?Sized>(&self, item: &Q) -> u8 {
        let mut freq = u8::MAX;
        for step in 0..SEEDS.len() {
            freq = freq.min(self.count_at(item, step));
        }
        freq
    }

    fn size(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        for counter in &mut self.table {
            *counter = 0;
        }
        self.size = 0;
    }
}

impl<S> fmt::Debug for BloomSketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomSketch")
            .field("words", &self.table.len())
            .field("size", &self.size)
            .finish()
    }
}

/// A doorkeeper-gated counting Bloom filter.
///
/// Composes a one-bit [`Doorkeeper`] and a [`BloomSketch`]: the first
/// access to a key only sets its doorkeeper bits, later accesses go to the
/// counters. The reported frequency adds the doorkeeper bit back, so it
/// ranges up to 16.
///
/// One-hit wonders, the bulk of most access streams, never consume
/// counter space.
///
/// # Examples
///
/// ```
/// use cachekit::sketch::{DoorkeeperBloomSketch, FrequencySketch};
///
/// let mut sketch = DoorkeeperBloomSketch::new(64);
///
/// sketch.record_access(&"x");
/// // First access: doorkeeper bit only
/// assert_eq!(sketch.frequency(&"x"), 1);
/// assert_eq!(sketch.size(), 0);
///
/// sketch.record_access(&"x");
/// // Second access reaches the counters
/// assert_eq!(sketch.frequency(&"x"), 2);
/// assert_eq!(sketch.size(), 1);
/// ```
pub struct DoorkeeperBloomSketch<S = DefaultHashBuilder> {
    /// First-access guard
    doorkeeper: Doorkeeper<S>,
    /// Counters for keys past the doorkeeper
    main: BloomSketch<S>,
}

impl DoorkeeperBloomSketch<DefaultHashBuilder> {
    /// Creates a gated sketch sized for `capacity` distinct items.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<S: BuildHasher + Clone> DoorkeeperBloomSketch<S> {
    /// As [`new`](Self::new) with an explicit hash builder.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            doorkeeper: Doorkeeper::with_hasher(capacity, hasher.clone()),
            main: BloomSketch::with_hasher(capacity, hasher),
        }
    }
}

impl<S: BuildHasher> FrequencySketch for DoorkeeperBloomSketch<S> {
    fn record_access<Q: Hash + ?Sized>(&mut self, item: &Q) {
        if !self.doorkeeper.contains(item) {
            self.doorkeeper.put(item);
            return;
        }
        self.main.record_access(item);
    }

    fn frequency<Q: Hash + ?Sized>(&self, item: &Q) -> u8 {
        self.main.frequency(item) + u8::from(self.doorkeeper.contains(item))
    }

    fn size(&self) -> usize {
        self.main.size()
    }

    fn clear(&mut self) {
        self.doorkeeper.clear();
        self.main.clear();
    }
}

impl<S> fmt::Debug for DoorkeeperBloomSketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoorkeeperBloomSketch")
            .field("size", &self.main.size)
            .finish()
    }
}
