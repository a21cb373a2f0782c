//! Caffeine-style frequency sketch with automatic sample-based aging.

extern crate alloc;

use super::{FrequencySketch, ONE_MASK, RESET_MASK, SEEDS};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A 4-bit count-min sketch with periodic aging, after Caffeine's
/// `FrequencySketch`.
///
/// The table length is the smallest power of two covering the capacity;
/// each word packs sixteen counters. An item's four counters live at a
/// start offset derived from its hash, one per probe word. After
/// `sample_size = 10 × capacity` successful increments every counter is
/// halved and the increments lost to odd counters are subtracted from the
/// tally, so long-gone popularity fades instead of pinning the admission
/// filter forever.
///
/// # Examples
///
/// ```
/// use cachekit::sketch::{CaffeineBloomSketch, FrequencySketch};
///
/// // capacity 1 → sample size 10: the tenth access triggers aging
/// let mut sketch = CaffeineBloomSketch::new(1);
/// for _ in 0..10 {
///     sketch.record_access(&"key");
/// }
/// assert_eq!(sketch.frequency(&"key"), 5);
/// assert_eq!(sketch.size(), 5);
/// ```
pub struct CaffeineBloomSketch<S = DefaultHashBuilder> {
    /// Counter table; sixteen 4-bit counters per word
    table: Vec<u64>,
    /// Index mask (table length minus one)
    table_mask: usize,
    /// Successful increments between agings
    sample_size: usize,
    /// Successful increments since the last aging
    size: usize,
    /// Hash builder supplying the base hash per item
    hasher: S,
}

impl CaffeineBloomSketch<DefaultHashBuilder> {
    /// Creates a sketch sized for `capacity` distinct items.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<S: BuildHasher> CaffeineBloomSketch<S> {
    /// As [`new`](Self::new) with an explicit hash builder.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        let maximum = capacity.min((i32::MAX >> 1) as usize);
        let table_len = maximum.max(1).next_power_of_two();
        let sample_size = if maximum == 0 { 10 } else { 10 * maximum };
        Self {
            table: vec![0; table_len],
            table_mask: table_len - 1,
            sample_size,
            size: 0,
            hasher,
        }
    }

    /// Returns the aging threshold.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Applies supplemental hashing to defend against a weak upstream hash.
    fn spread(mut x: u32) -> u32 {
        x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
        x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
        (x >> 16) ^ x
    }

    /// Table index for the counter at the given probe depth.
    fn index_of(&self, hash: u32, step: usize) -> usize {
        let mut index = (hash as u64).wrapping_add(SEEDS[step]).wrapping_mul(SEEDS[step]);
        index = index.wrapping_add(index >> 32);
        (index as usize) & self.table_mask
    }

    /// Increments the counter at bit slot `slot` of word `index` unless it
    /// is saturated.
    fn increment_at(&mut self, index: usize, slot: u32) -> bool {
        let offset = (slot as u64) << 2;
        let mask = 0xF_u64 << offset;
        if self.table[index] & mask != mask {
            self.table[index] += 1u64 << offset;
            true
        } else {
            false
        }
    }

    /// Halves every counter, discounting the tally by the odd bits lost.
    fn reset(&mut self) {
        let mut lost: u32 = 0;
        for word in &mut self.table {
            lost += (*word & ONE_MASK).count_ones();
            *word = (*word >> 1) & RESET_MASK;
        }
        self.size = (self.size - (lost >> 2) as usize) >> 1;
    }

    fn spread_of<Q: Hash + ?Sized>(&self, item: &Q) -> u32 {
        Self::spread(self.hasher.hash_one(item) as u32)
    }
}

impl<S: BuildHasher> FrequencySketch for CaffeineBloomSketch<S> {
    fn record_access<Q: Hash + ?Sized>(&mut self, item: &Q) {
        let hash = self.spread_of(item);
        let start = (hash & 3) << 2;

        let mut added = false;
        for step in 0..SEEDS.len() {
            let index = self.index_of(hash, step);
            added |= self.increment_at(index, start + step as u32);
        }

        if added {
            self.size += 1;
            if self.size >= self.sample_size {
                self.reset();
            }
        }
    }

    fn frequency<Q: Hash + ?Sized>(&self, item: &Q) -> u8 {
        let hash = self.spread_of(item);
        let start = (hash & 3) << 2;

        let mut freq = u8::MAX;
        for step in 0..SEEDS.len() {
            let index = self.index_of(hash, step);
            let offset = ((start + step as u32) as u64) << 2;
            let count = ((self.table[index] >> offset) & 0xF) as u8;
            freq = freq.min(count);
        }
        freq
    }

    fn size(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        for word in &mut self.table {
            *word = 0;
        }
        self.size = 0;
    }
}

impl<S> fmt::Debug for CaffeineBloomSketch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaffeineBloomSketch")
            .field("words", &self.table.len())
            .field("sample_size", &self.sample_size)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caffeine_single_item_counts_exactly() {
        let mut sketch = CaffeineBloomSketch::new(512);
        assert_eq!(sketch.frequency(&"item"), 0);
        for expected in 1..=5u8 {
            sketch.record_access(&"item");
            assert_eq!(sketch.frequency(&"item"), expected);
        }
    }

    #[test]
    fn test_caffeine_saturates_at_fifteen() {
        let mut sketch = CaffeineBloomSketch::new(512);
        for _ in 0..20 {
            sketch.record_access(&"item");
        }
        assert_eq!(sketch.frequency(&"item"), 15);
    }

    #[test]
    fn test_caffeine_aging_fires_at_sample_size() {
        // capacity 1 → sample size 10; counters saturate well before that
        let mut sketch = CaffeineBloomSketch::new(1);
        assert_eq!(sketch.sample_size(), 10);
        for _ in 0..10 {
            sketch.record_access(&"key");
        }
        // Tenth successful increment triggered the halving
        assert_eq!(sketch.frequency(&"key"), 5);
        assert_eq!(sketch.size(), 5);
    }

    #[test]
    fn test_caffeine_reset_bounds_size() {
        let mut sketch = CaffeineBloomSketch::new(64);
        let mut reset_seen = false;
        for i in 1..(20 * 64usize) {
            sketch.record_access(&i);
            if sketch.size() != i {
                reset_seen = true;
                break;
            }
        }
        assert!(reset_seen);
        assert!(sketch.size() <= sketch.sample_size() / 2);
    }

    #[test]
    fn test_caffeine_distinct_items() {
        let mut sketch = CaffeineBloomSketch::new(512);
        sketch.record_access(&1u32);
        sketch.record_access(&1u32);
        sketch.record_access(&2u32);
        assert!(sketch.frequency(&1u32) >= 2);
        assert!(sketch.frequency(&2u32) >= 1);
    }

    #[test]
    fn test_caffeine_heavy_hitters_order() {
        let mut sketch = CaffeineBloomSketch::new(512);
        for i in 100..5_000u32 {
            sketch.record_access(&i);
        }
        for i in (0..10u32).step_by(2) {
            for _ in 0..i {
                sketch.record_access(&i);
            }
        }
        // The even heavy hitters should dominate their lighter neighbors
        let freq: Vec<u8> = (0..10u32).map(|i| sketch.frequency(&i)).collect();
        assert!(freq[2] <= freq[4]);
        assert!(freq[4] <= freq[6]);
        assert!(freq[6] <= freq[8]);
    }

    #[test]
    fn test_caffeine_zero_capacity() {
        let mut sketch = CaffeineBloomSketch::new(0);
        assert_eq!(sketch.sample_size(), 10);
        sketch.record_access(&"x");
        assert!(sketch.frequency(&"x") >= 1);
    }

    #[test]
    fn test_caffeine_clear() {
        let mut sketch = CaffeineBloomSketch::new(64);
        sketch.record_access(&"a");
        sketch.clear();
        assert_eq!(sketch.frequency(&"a"), 0);
        assert_eq!(sketch.size(), 0);
    }
}
