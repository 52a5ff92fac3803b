// Copyright 2026 strata Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use strata_common::code::{Key, Value};
use strata_memory::{Cache, Stats};

#[derive(Debug, Default)]
struct TieredMetrics {
    hit: AtomicU64,
    miss: AtomicU64,
}

/// Point-in-time statistics of the tiered cache as a whole.
///
/// A get counts as a hit when either tier serves it and as a miss when
/// both tiers miss. Per-tier counters live on the tiers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieredStats {
    /// gets served by either tier
    pub hits: u64,
    /// gets missed by both tiers
    pub misses: u64,
}

impl TieredStats {
    /// `hits / (hits + misses)`, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Two-level cache with promote-on-hit.
///
/// L1 is the small fast tier, L2 the larger one. Every write goes through
/// to both tiers, so L2 always holds a superset of L1's keys and an L1
/// eviction never loses data outright: the entry stays reachable through
/// L2 and is promoted back into L1 on its next hit.
pub struct TieredCache<K, V>
where
    K: Key,
    V: Value,
{
    l1: Cache<K, V>,
    l2: Cache<K, V>,
    metrics: Arc<TieredMetrics>,
}

impl<K, V> Debug for TieredCache<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TieredCache")
            .field("l1", &self.l1)
            .field("l2", &self.l2)
            .finish()
    }
}

impl<K, V> Clone for TieredCache<K, V>
where
    K: Key,
    V: Value,
{
    fn clone(&self) -> Self {
        Self {
            l1: self.l1.clone(),
            l2: self.l2.clone(),
            metrics: self.metrics.clone(),
        }
    }
}

impl<K, V> TieredCache<K, V>
where
    K: Key,
    V: Value,
{
    pub(crate) fn new(l1: Cache<K, V>, l2: Cache<K, V>) -> Self {
        Self {
            l1,
            l2,
            metrics: Arc::new(TieredMetrics::default()),
        }
    }

    /// Access the L1 tier.
    pub fn l1(&self) -> &Cache<K, V> {
        &self.l1
    }

    /// Access the L2 tier.
    pub fn l2(&self) -> &Cache<K, V> {
        &self.l2
    }

    /// Get the value for `key` from the nearest tier that holds it.
    ///
    /// An L1 hit returns immediately. An L2 hit promotes the entry into
    /// L1 before returning; the promotion is an internal side effect and
    /// may push an L1 victim out, which stays reachable through L2.
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.l1.get(key) {
            self.metrics.hit.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }

        if let Some(value) = self.l2.get(key) {
            tracing::trace!("[tiered cache]: promote entry from l2, key: {key:?}");
            self.l1.put(key.clone(), value.clone());
            self.metrics.hit.fetch_add(1, Ordering::Relaxed);
            return Some(value);
        }

        self.metrics.miss.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Insert `key` → `value` into both tiers.
    pub fn put(&self, key: K, value: V) {
        self.l1.put(key.clone(), value.clone());
        self.l2.put(key, value);
    }

    /// Insert `key` → `value` into both tiers with an explicit ttl.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        self.l1.put_with_ttl(key.clone(), value.clone(), ttl);
        self.l2.put_with_ttl(key, value, ttl);
    }

    /// Remove the entry for `key` from both tiers, returning its stored
    /// value if any tier held it.
    pub fn remove(&self, key: &K) -> Option<V> {
        let l1 = self.l1.remove(key);
        let l2 = self.l2.remove(key);
        l2.or(l1)
    }

    /// Whether a live entry exists in either tier.
    pub fn contains(&self, key: &K) -> bool {
        self.l1.contains(key) || self.l2.contains(key)
    }

    /// Drop all entries from both tiers and reset all statistics.
    pub fn clear(&self) {
        self.l1.clear();
        self.l2.clear();
        self.metrics.hit.store(0, Ordering::Relaxed);
        self.metrics.miss.store(0, Ordering::Relaxed);
    }

    /// Sweep expired entries from both tiers, returning how many were
    /// dropped in total.
    pub fn purge_expired(&self) -> usize {
        self.l1.purge_expired() + self.l2.purge_expired()
    }

    /// Combined statistics snapshot.
    pub fn stats(&self) -> TieredStats {
        TieredStats {
            hits: self.metrics.hit.load(Ordering::Relaxed),
            misses: self.metrics.miss.load(Ordering::Relaxed),
        }
    }

    /// L1 tier statistics snapshot.
    pub fn l1_stats(&self) -> Stats {
        self.l1.stats()
    }

    /// L2 tier statistics snapshot.
    pub fn l2_stats(&self) -> Stats {
        self.l2.stats()
    }
}
