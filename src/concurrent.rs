// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sharded concurrent accumulator for the parallel scoring pass.
//!
//! The ranking pass reads disjoint posting lists from worker threads, but
//! several plus terms can land contributions on the same document. A single
//! mutex around the whole accumulator would serialize the pass; no lock at
//! all is unsound. Striping the key space over a fixed set of sublocks keeps
//! write contention bounded: two keys collide only when they hash to the same
//! shard, and a thread holds at most one shard at a time, so there is nothing
//! to deadlock on.
//!
//! # Invariants
//!
//! 1. **ONE_SHARD_PER_OP**: every operation locks exactly one shard.
//! 2. **NO_GLOBAL_LOCK**: there is no whole-map lock on any path.
//! 3. Finalizing with [`ConcurrentMap::build_ordered`] consumes the map; the
//!    shards are merged into a single map ordered by key.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Shard count used by the search pipeline.
///
/// A prime near 100 spreads small integer key sets (document ids) evenly
/// across shards even when the ids themselves are clustered.
pub const DEFAULT_SHARD_COUNT: usize = 101;

/// A `K -> V` map whose key space is striped over independently locked
/// shards.
///
/// Writers for keys in different shards proceed in parallel; writers for the
/// same shard serialize. The map is an accumulator: values are created on
/// first touch via `V::default()` and mutated through the guard returned by
/// [`get_mut`](Self::get_mut).
pub struct ConcurrentMap<K, V> {
    shards: Vec<Mutex<HashMap<K, V>>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash + Ord,
    V: Default,
{
    /// Create a map striped over `shard_count` sublocks.
    ///
    /// # Panics
    ///
    /// Panics if `shard_count` is zero.
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard count must be positive");
        Self {
            shards: (0..shard_count).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn shard_for(&self, key: &K) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards.len()
    }

    /// Exclusive handle to the value slot for `key`.
    ///
    /// The slot is created with `V::default()` on first access. The returned
    /// guard holds the key's shard for as long as it lives - keep the hold
    /// short; other keys in the same shard are blocked behind it.
    pub fn get_mut(&self, key: K) -> MappedMutexGuard<'_, V> {
        let shard = &self.shards[self.shard_for(&key)];
        MutexGuard::map(shard.lock(), |map| map.entry(key).or_default())
    }

    /// Merge all shards into a single map ordered by key.
    ///
    /// Consumes the accumulator, so no locking is needed: exclusive ownership
    /// proves no other thread can still hold a guard.
    pub fn build_ordered(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.extend(shard.into_inner());
        }
        merged
    }

    /// Number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// True if no key has been touched yet.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }
}
