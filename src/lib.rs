#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Algorithm Selection Guide
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────────┐
//! │                    Which Cache Policy Should I Use?                        │
//! ├────────────────────────────────────────────────────────────────────────────┤
//! │                                                                            │
//! │  Recency-based workload (recent = hot)?                                    │
//! │      worried about scans?          no ──▶ LRU                              │
//! │                        yes ──▶ SLRU                                        │
//! │                                                                            │
//! │  Frequency-based workload (popular = hot)?                                 │
//! │      exact counts, stable popularity ──▶ LFU                               │
//! │      approximate counts, admission control ──▶ TinyLFU                     │
//! │      plus grace period for brand-new keys ──▶ W-TinyLFU                    │
//! │                                                                            │
//! │  Mixed / shifting workload, no tuning budget?  ──▶ ARC                     │
//! │                                                                            │
//! └────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Policy | Type | Description |
//! |--------|------|-------------|
//! | `"LRU"` | [`LruCache`] | Least Recently Used |
//! | `"SLRU"` | [`SlruCache`] | Segmented LRU, scan-resistant |
//! | `"LFU"` | [`LfuCache`] | Least Frequently Used, exact counts |
//! | `"TinyLFU"` | [`TinyLfuCache`] | Sketch-based admission over LRU |
//! | `"W-TinyLFU"` | [`WTinyLfuCache`] | Admission window + SLRU main region |
//! | `"ARC"` | [`ArcCache`] | Adaptive Replacement Cache |
//!
//! The quoted strings are the [`config::CachePolicy`] names host
//! configuration uses; [`config::SketchPolicy`] picks the frequency sketch
//! (`"Bloom"`, `"DoorkeeperBloom"`, `"CaffeineBloom"`) for the sketch-based
//! policies.
//!
//! ## Common Contract
//!
//! Every policy exposes the same surface:
//!
//! | Operation | Behavior |
//! |-----------|----------|
//! | `put(k, v) -> bool` | `true` iff a fresh key was admitted; overwrite returns `false` (ARC reports `true` in every branch); never fails |
//! | `get(&k) -> Option<&V>` | promotes on hit (and so takes `&mut self`) |
//! | `remove(&k) -> Option<V>` | idempotent |
//! | `set_max_size(n)` | shrink evicts by policy order; growing is free |
//! | `clear()` | drops everything (ARC also resets its adaptive target) |
//! | `visit_all(f)` | read-only walk over resident entries |
//!
//! Borrows returned by `get`/`put_mut` are invalidated by the next
//! mutation; the borrow checker enforces what the contract demands.
//!
//! A capacity of zero is legal everywhere and degenerate: `put` reports
//! the insertion, nothing is retained, `get` always misses.
//!
//! ## Concurrency
//!
//! No internal synchronization. `get` mutates recency order, so even
//! readers need exclusive access; wrap a cache in the host's `Mutex`.
//! All types are `Send`/`Sync` when their parameters are, so a wrapped
//! cache can be shared across threads.

#![no_std]

#[cfg(not(feature = "hashbrown"))]
extern crate std;

/// Doubly linked list implementation with in-place editing capabilities.
///
/// **Note**: internal infrastructure. It exposes unsafe raw pointer
/// operations that require careful invariant maintenance; use the
/// high-level cache implementations instead.
pub(crate) mod list;

/// Cache configuration structures and the host policy name contract.
pub mod config;

/// Least Recently Used (LRU) cache implementation.
///
/// The recency-ordered building block of the crate, and the LRU policy.
pub mod lru;

/// Segmented LRU (SLRU) cache implementation.
///
/// Scan-resistant two-segment cache; also the main region of W-TinyLFU.
pub mod slru;

/// Least Frequently Used (LFU) cache implementation.
///
/// Exact per-entry frequency counting with bucketed recency order.
pub mod lfu;

/// Adaptive Replacement Cache (ARC) implementation.
///
/// Four-partition cache (two resident, two ghost) with a self-tuning
/// recency/frequency balance.
pub mod arc;

/// Frequency sketches and the doorkeeper admission filter.
///
/// Approximate popularity counters backing the TinyLFU admission test.
pub mod sketch;

/// TinyLFU admission cache: frequency sketch in front of an LRU region.
pub mod tinylfu;

/// Windowed TinyLFU: admission window + SLRU main region + sketch.
pub mod wtinylfu;

/// Cache metrics system.
///
/// Count-based metrics with deterministic reporting, common core plus
/// per-policy extensions.
pub mod metrics;

// Re-export cache types
pub use arc::ArcCache;
pub use lfu::LfuCache;
pub use lru::LruCache;
pub use slru::SlruCache;
pub use tinylfu::TinyLfuCache;
pub use wtinylfu::WTinyLfuCache;
