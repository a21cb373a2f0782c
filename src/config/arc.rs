//! Configuration for the Adaptive Replacement Cache (ARC).

use core::fmt;

/// Configuration for an ARC cache.
///
/// ARC splits its capacity `c` into four partitions: the resident lists T1
/// (seen once) and T2 (seen multiple times) and the ghost lists B1 and B2
/// recording recently evicted keys. The split uses an asymmetric quarter
/// rounding rule, preserved here exactly: with `q = c / 4` and `r = c % 4`,
/// T1 gets `q + (r >= 1)`, T2 gets `q + (r >= 2)`, B1 gets `q + (r >= 3)`
/// and B2 gets `q`.
///
/// Two derived quantities drive the runtime bounds:
/// - the **resident target** `s = t1_capacity + t2_capacity`, the combined
///   bound on T1 + T2;
/// - the **ghost capacity** `c - s = b1_capacity + b2_capacity`, the bound
///   on each ghost list and the upper clamp for the adaptive parameter `p`.
///
/// # Examples
///
/// ```
/// use cachekit::config::ArcCacheConfig;
///
/// let config = ArcCacheConfig::new(12);
/// assert_eq!(config.t1_capacity(), 3);
/// assert_eq!(config.t2_capacity(), 3);
/// assert_eq!(config.b1_capacity(), 3);
/// assert_eq!(config.b2_capacity(), 3);
/// assert_eq!(config.resident_capacity(), 6);
/// assert_eq!(config.ghost_capacity(), 6);
///
/// // The remainder is handed out to T1, then T2, then B1.
/// let odd = ArcCacheConfig::new(7);
/// assert_eq!(odd.t1_capacity(), 2);
/// assert_eq!(odd.t2_capacity(), 2);
/// assert_eq!(odd.b1_capacity(), 2);
/// assert_eq!(odd.b2_capacity(), 1);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArcCacheConfig {
    /// Total capacity of the cache
    capacity: usize,
}

impl ArcCacheConfig {
    /// Creates a new configuration with the given total capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Returns the total capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Capacity share of the recently-seen-once resident list T1.
    pub fn t1_capacity(&self) -> usize {
        self.capacity / 4 + usize::from(self.capacity % 4 >= 1)
    }

    /// Capacity share of the seen-multiple resident list T2.
    pub fn t2_capacity(&self) -> usize {
        self.capacity / 4 + usize::from(self.capacity % 4 >= 2)
    }

    /// Capacity share of the ghost list B1.
    pub fn b1_capacity(&self) -> usize {
        self.capacity / 4 + usize::from(self.capacity % 4 >= 3)
    }

    /// Capacity share of the ghost list B2.
    pub fn b2_capacity(&self) -> usize {
        self.capacity / 4
    }

    /// Combined bound on the resident lists (`|T1| + |T2|`).
    pub fn resident_capacity(&self) -> usize {
        self.t1_capacity() + self.t2_capacity()
    }

    /// Combined ghost capacity; also the upper clamp for the adaptive
    /// parameter `p`.
    pub fn ghost_capacity(&self) -> usize {
        self.b1_capacity() + self.b2_capacity()
    }
}

impl fmt::Debug for ArcCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArcCacheConfig")
            .field("capacity", &self.capacity)
            .field("t1_capacity", &self.t1_capacity())
            .field("t2_capacity", &self.t2_capacity())
            .field("b1_capacity", &self.b1_capacity())
            .field("b2_capacity", &self.b2_capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_split_all_remainders() {
        // (capacity, t1, t2, b1, b2)
        let cases = [
            (0, 0, 0, 0, 0),
            (1, 1, 0, 0, 0),
            (2, 1, 1, 0, 0),
            (3, 1, 1, 1, 0),
            (4, 1, 1, 1, 1),
            (7, 2, 2, 2, 1),
            (12, 3, 3, 3, 3),
        ];
        for (cap, t1, t2, b1, b2) in cases {
            let config = ArcCacheConfig::new(cap);
            assert_eq!(config.t1_capacity(), t1, "t1 for capacity {cap}");
            assert_eq!(config.t2_capacity(), t2, "t2 for capacity {cap}");
            assert_eq!(config.b1_capacity(), b1, "b1 for capacity {cap}");
            assert_eq!(config.b2_capacity(), b2, "b2 for capacity {cap}");
        }
    }

    #[test]
    fn test_shares_sum_to_capacity() {
        for cap in 0..64 {
            let config = ArcCacheConfig::new(cap);
            assert_eq!(
                config.resident_capacity() + config.ghost_capacity(),
                cap,
                "shares must partition capacity {cap}"
            );
        }
    }
}
