//! ARC partition behavior tests.
//!
//! Exercises the four-partition structure through the per-partition
//! visitors: promotion ladders, ghost demotion and readmission, the
//! adaptive target, and the structural invariants.

use cachekit::config::ArcCacheConfig;
use cachekit::metrics::CacheMetrics;
use cachekit::ArcCache;

fn make_arc(cap: usize) -> ArcCache<i32, i32> {
    ArcCache::init(ArcCacheConfig::new(cap), None)
}

fn get_t1(arc: &ArcCache<i32, i32>) -> Vec<i32> {
    let mut actual = Vec::new();
    arc.visit_t1(|key, _| actual.push(*key));
    actual.sort_unstable();
    actual
}

fn get_t2(arc: &ArcCache<i32, i32>) -> Vec<i32> {
    let mut actual = Vec::new();
    arc.visit_t2(|key, _| actual.push(*key));
    actual.sort_unstable();
    actual
}

fn get_b1(arc: &ArcCache<i32, i32>) -> Vec<i32> {
    let mut actual = Vec::new();
    arc.visit_b1(|key| actual.push(*key));
    actual.sort_unstable();
    actual
}

fn get_b2(arc: &ArcCache<i32, i32>) -> Vec<i32> {
    let mut actual = Vec::new();
    arc.visit_b2(|key| actual.push(*key));
    actual.sort_unstable();
    actual
}

#[test]
fn test_put_moves_between_partitions() {
    let mut arc = make_arc(12);

    for i in 0..3 {
        assert!(arc.put(i, 0));
    }

    assert_eq!(get_t1(&arc), vec![0, 1, 2]);
    assert_eq!(arc.len(), 3);

    for i in 0..3 {
        assert!(arc.put(i, 0));
    }

    assert_eq!(get_t2(&arc), vec![0, 1, 2]);
    assert_eq!(arc.len(), 3);
}

#[test]
fn test_demotion_records_ghosts() {
    // capacity 4: resident target 2, ghost capacity 2
    let mut arc = make_arc(4);
    arc.put(1, 0);
    arc.put(2, 0);
    arc.put(3, 0);
    arc.put(4, 0);

    assert_eq!(get_t1(&arc), vec![3, 4]);
    assert_eq!(get_b1(&arc), vec![1, 2]);
    assert_eq!(arc.len(), 2);
}

#[test]
fn test_ghost_hit_adapts_and_readmits() {
    let mut arc = make_arc(4);
    for i in 1..=4 {
        arc.put(i, 0);
    }
    assert!(get_b1(&arc).contains(&1));
    assert_eq!(arc.target_recency(), 0);

    assert!(arc.put(1, 7));
    assert!(arc.target_recency() > 0);
    assert!(get_t2(&arc).contains(&1));
    assert_eq!(arc.get(&1), Some(&7));
}

#[test]
fn test_get_does_not_touch_ghosts() {
    let mut arc = make_arc(4);
    for i in 1..=4 {
        arc.put(i, 0);
    }
    let ghosts_before = get_b1(&arc);
    let p_before = arc.target_recency();

    // Lookups on ghost keys miss without adapting anything
    assert_eq!(arc.get(&1), None);
    assert_eq!(arc.get(&2), None);
    assert_eq!(get_b1(&arc), ghosts_before);
    assert_eq!(arc.target_recency(), p_before);
}

#[test]
fn test_erase_clears_every_partition() {
    let mut arc = make_arc(4);
    for i in 1..=4 {
        arc.put(i, i * 100);
    }
    // 1, 2 are B1 ghosts; 3, 4 resident in T1
    arc.put(3, 300); // 3 moves to T2

    assert_eq!(arc.remove(&4), Some(400)); // T1
    assert_eq!(arc.remove(&3), Some(300)); // T2
    assert_eq!(arc.remove(&1), None); // B1 ghost: tombstone dropped
    assert_eq!(arc.remove(&99), None); // absent

    assert!(get_t1(&arc).is_empty());
    assert!(get_t2(&arc).is_empty());
    assert!(!get_b1(&arc).contains(&1));
}

#[test]
fn test_visitors_partition_the_key_space() {
    let mut arc = make_arc(8);
    for i in 0..40 {
        arc.put(i % 11, i);
        if i % 2 == 0 {
            arc.put((i + 1) % 11, i);
        }
    }

    let mut all = Vec::new();
    all.extend(get_t1(&arc));
    all.extend(get_t2(&arc));
    all.extend(get_b1(&arc));
    all.extend(get_b2(&arc));
    let total = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), total, "a key may appear in only one partition");
}

#[test]
fn test_invariants_hold_under_mixed_workload() {
    // capacity 12: resident target 6, ghost capacity 6
    let mut arc = make_arc(12);
    for i in 0..1000 {
        match i % 5 {
            0 | 1 => {
                arc.put(i % 31, i);
            }
            2 => {
                arc.get(&((i + 7) % 31));
            }
            3 => {
                arc.put((i + 3) % 31, i);
            }
            _ => {
                arc.remove(&((i + 11) % 31));
            }
        }

        assert!(arc.len() <= 6);
        assert!(arc.t1_len() + arc.b1_len() <= 12);
        assert!(arc.t2_len() + arc.b2_len() <= 24);
        assert!(arc.b1_len() <= 6 && arc.b2_len() <= 6);
        assert!(arc.target_recency() <= 6);
    }
}

#[test]
fn test_set_max_size_resplits() {
    let mut arc = make_arc(16);
    for i in 0..8 {
        arc.put(i, i);
    }
    for i in 8..20 {
        arc.put(i, i);
    }

    arc.set_max_size(8);
    // quarter shares for capacity 8 are 2/2/2/2
    assert!(arc.t1_len() <= 2);
    assert!(arc.t2_len() <= 2);
    assert!(arc.b1_len() <= 2);
    assert!(arc.b2_len() <= 2);
    assert!(arc.target_recency() <= 4);

    // Still works after the shrink
    arc.put(100, 100);
    assert_eq!(arc.get(&100), Some(&100));
}

#[test]
fn test_clear_resets_adaptation() {
    let mut arc = make_arc(4);
    for i in 1..=4 {
        arc.put(i, 0);
    }
    arc.put(1, 0); // ghost hit raises p
    assert!(arc.target_recency() > 0);

    arc.clear();
    assert_eq!(arc.len(), 0);
    assert_eq!(arc.target_recency(), 0);
    assert!(get_b1(&arc).is_empty());
    assert!(get_b2(&arc).is_empty());

    // A cleared cache behaves like a fresh one
    arc.put(1, 1);
    assert_eq!(get_t1(&arc), vec![1]);
}

#[test]
fn test_frequency_favoring_workload_shrinks_p() {
    // Drive p up with B1 hits, then down with B2 hits
    let mut arc = make_arc(8);

    // Fill and churn T1 so B1 accumulates
    for i in 0..8 {
        arc.put(i, 0);
    }
    let b1 = get_b1(&arc);
    assert!(!b1.is_empty());

    for &ghost in &b1 {
        arc.put(ghost, 0);
    }
    let p_high = arc.target_recency();
    assert!(p_high > 0);

    // Push T2 entries out into B2 and hit them
    for i in 100..112 {
        arc.put(i, 0);
    }
    let b2 = get_b2(&arc);
    for &ghost in &b2 {
        arc.put(ghost, 0);
    }
    assert!(arc.target_recency() <= p_high);
}

#[test]
fn test_metrics_expose_adaptation() {
    let mut arc = make_arc(4);
    for i in 1..=4 {
        arc.put(i, 0);
    }
    arc.put(1, 0);

    let metrics = arc.metrics();
    assert_eq!(metrics.get("b1_ghost_hits"), Some(&1.0));
    assert!(metrics.get("t1_demotions").unwrap() >= &2.0);
    assert_eq!(
        metrics.get("target_recency").copied(),
        Some(arc.target_recency() as f64)
    );
    assert_eq!(metrics.get("resident_entries"), Some(&(arc.len() as f64)));
}
