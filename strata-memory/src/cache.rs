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

use std::{fmt::Debug, hash::Hash, sync::Arc, time::Duration};

use equivalent::Equivalent;
use hashbrown::HashMap;
use parking_lot::Mutex;

use strata_common::{
    clock::{Clock, SystemClock},
    code::{Key, Value},
};

use crate::{
    entry::Entry,
    error::{Error, Result},
    eviction::{Eviction, EvictionConfig},
    metrics::{Metrics, Stats},
};

/// In-memory cache builder.
pub struct CacheBuilder {
    capacity: usize,
    eviction_config: EvictionConfig,
    default_ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl CacheBuilder {
    /// Create a cache builder with the given capacity.
    ///
    /// Capacity is validated by [`CacheBuilder::build`]; it must be at
    /// least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            eviction_config: EvictionConfig::default(),
            default_ttl: None,
            clock: Arc::new(SystemClock::default()),
        }
    }

    /// Set the cache eviction algorithm.
    ///
    /// The default value is Lru.
    pub fn with_eviction_config(mut self, eviction_config: impl Into<EvictionConfig>) -> Self {
        self.eviction_config = eviction_config.into();
        self
    }

    /// Set the ttl applied to entries inserted without an explicit one.
    ///
    /// The default is no ttl at all.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set the clock that timestamps entries.
    ///
    /// The default is a [`SystemClock`] owned by this cache.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the cache with the given configuration.
    pub fn build<K, V>(self) -> Result<Cache<K, V>>
    where
        K: Key,
        V: Value,
    {
        if self.capacity == 0 {
            return Err(Error::ConfigError("capacity must be at least 1".to_string()));
        }

        Ok(Cache {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState {
                    entries: HashMap::with_capacity(self.capacity),
                    eviction: self.eviction_config.into_policy(),
                    metrics: Metrics::default(),
                }),
                capacity: self.capacity,
                default_ttl: self.default_ttl,
                clock: self.clock,
            }),
        })
    }
}

struct CacheState<K, V>
where
    K: Key,
    V: Value,
{
    entries: HashMap<K, Entry<K, V>>,
    eviction: Box<dyn Eviction<K, V>>,
    metrics: Metrics,
}

struct CacheInner<K, V>
where
    K: Key,
    V: Value,
{
    state: Mutex<CacheState<K, V>>,
    capacity: usize,
    default_ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

/// Bounded in-memory cache with pluggable eviction.
///
/// The entry map, the eviction policy, and the statistics live behind one
/// lock; a lookup is a mutation too, since it refreshes the hit entry's
/// access metadata. Cloning is cheap and clones share state.
pub struct Cache<K, V>
where
    K: Key,
    V: Value,
{
    inner: Arc<CacheInner<K, V>>,
}

impl<K, V> Clone for Cache<K, V>
where
    K: Key,
    V: Value,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Debug for Cache<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("capacity", &self.inner.capacity)
            .finish()
    }
}

impl<K, V> Cache<K, V>
where
    K: Key,
    V: Value,
{
    /// Get the value for `key`, if a live entry exists.
    ///
    /// A hit refreshes the entry's access metadata and returns a clone of
    /// the value. An entry whose ttl has elapsed is treated as absent,
    /// removed here, and counted as a miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let now = self.inner.clock.now();

        let mut guard = self.inner.state.lock();
        let state = &mut *guard;

        let expired = match state.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(now);
                state.metrics.record_hit();
                return Some(entry.value().clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            state.entries.remove(key);
            tracing::trace!("[cache]: drop expired entry on lookup");
        }
        state.metrics.record_miss();
        None
    }

    /// Insert `key` → `value` with the store's default ttl.
    ///
    /// See [`Cache::put_with_ttl`].
    pub fn put(&self, key: K, value: V) {
        self.put_with_ttl(key, value, None);
    }

    /// Insert `key` → `value`; an explicit `ttl` overrides the store's
    /// default.
    ///
    /// A write to a live key replaces the entry wholesale: fresh
    /// timestamps, reset access count, new ttl. A write to a fresh key on
    /// a full store first evicts exactly one victim chosen by the
    /// eviction policy.
    pub fn put_with_ttl(&self, key: K, value: V, ttl: Option<Duration>) {
        let now = self.inner.clock.now();
        let ttl = ttl.or(self.inner.default_ttl);

        let mut guard = self.inner.state.lock();
        let state = &mut *guard;

        if let Some(entry) = state.entries.get_mut(&key) {
            *entry = Entry::new(key, value, now, ttl);
            return;
        }

        if state.entries.len() >= self.inner.capacity {
            // Capacity is at least 1 and the store is full, so the entry
            // set handed to the policy is never empty.
            let victim = state
                .eviction
                .select_victim(&mut state.entries.values(), now)
                .expect("full store must yield an eviction victim");
            state.entries.remove(&victim);
            state.metrics.record_eviction();
            tracing::trace!("[cache]: evict entry, key: {victim:?}");
        }

        state
            .entries
            .insert(key.clone(), Entry::new(key, value, now, ttl));
    }

    /// Remove the entry for `key`, returning its stored value.
    ///
    /// Removing an absent key is a no-op; the call is idempotent.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let mut guard = self.inner.state.lock();
        guard.entries.remove(key).map(Entry::into_value)
    }

    /// Whether a live (non-expired) entry exists for `key`.
    ///
    /// Touches no access metadata and records neither a hit nor a miss.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        Q: Hash + Equivalent<K> + ?Sized,
    {
        let now = self.inner.clock.now();
        let guard = self.inner.state.lock();
        guard
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Drop all entries and reset the statistics.
    pub fn clear(&self) {
        let mut guard = self.inner.state.lock();
        let state = &mut *guard;
        state.entries.clear();
        state.metrics.reset();
    }

    /// Proactively remove every expired entry, returning how many were
    /// dropped.
    ///
    /// Lookups already reclaim expired entries lazily; a periodic sweep
    /// keeps them from occupying capacity in between. Neither hits nor
    /// misses are recorded.
    pub fn purge_expired(&self) -> usize {
        let now = self.inner.clock.now();

        let mut guard = self.inner.state.lock();
        let before = guard.entries.len();
        guard.entries.retain(|_, entry| !entry.is_expired(now));
        let dropped = before - guard.entries.len();

        if dropped > 0 {
            tracing::trace!("[cache]: purge {dropped} expired entries");
        }
        dropped
    }

    /// Live entry count, expired-but-unreclaimed entries included.
    pub fn len(&self) -> usize {
        self.inner.state.lock().entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Statistics snapshot.
    pub fn stats(&self) -> Stats {
        let guard = self.inner.state.lock();
        Stats {
            hits: guard.metrics.hit,
            misses: guard.metrics.miss,
            evictions: guard.metrics.evict,
            size: guard.entries.len(),
            capacity: self.inner.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    use strata_common::clock::ManualClock;

    use super::*;
    use crate::eviction::{
        fifo::FifoConfig, lfu::LfuConfig, lru::LruConfig, random::RandomConfig, ttl::TtlFirstConfig,
    };

    fn is_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn test_send_sync_static() {
        is_send_sync_static::<Cache<u64, u64>>();
        is_send_sync_static::<CacheBuilder>();
    }

    fn cache_with_clock(
        capacity: usize,
        eviction_config: impl Into<EvictionConfig>,
    ) -> (Cache<String, u32>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = CacheBuilder::new(capacity)
            .with_eviction_config(eviction_config)
            .with_clock(clock.clone())
            .build()
            .unwrap();
        (cache, clock)
    }

    fn tick(clock: &ManualClock) {
        clock.advance(Duration::from_millis(1));
    }

    #[test]
    fn test_zero_capacity_fails() {
        let res: Result<Cache<u64, u64>> = CacheBuilder::new(0).build();
        assert!(matches!(res, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_lru_scenario() {
        let (cache, clock) = cache_with_clock(2, LruConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        cache.put("b".to_string(), 2);
        tick(&clock);
        assert_eq!(cache.get("a"), Some(1));
        tick(&clock);
        cache.put("c".to_string(), 3);
        tick(&clock);

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("c"), Some(3));

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert!((stats.hit_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fifo_ignores_recency() {
        let (cache, clock) = cache_with_clock(2, FifoConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        cache.put("b".to_string(), 2);
        tick(&clock);
        assert_eq!(cache.get("a"), Some(1));
        tick(&clock);
        cache.put("c".to_string(), 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_lfu_overwrite_resets_frequency() {
        let (cache, clock) = cache_with_clock(2, LfuConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        assert_eq!(cache.get("a"), Some(1));
        tick(&clock);
        assert_eq!(cache.get("a"), Some(1));
        tick(&clock);
        cache.put("b".to_string(), 2);
        tick(&clock);
        assert_eq!(cache.get("b"), Some(2));
        tick(&clock);

        // Overwriting resets a's access count to zero, so it loses to b.
        cache.put("a".to_string(), 10);
        tick(&clock);
        cache.put("c".to_string(), 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_eviction_count() {
        let (cache, clock) = cache_with_clock(4, LruConfig::default());

        for (i, key) in ["a", "b", "c", "d", "e", "f", "g"].into_iter().enumerate() {
            cache.put(key.to_string(), i as u32);
            tick(&clock);
        }

        let stats = cache.stats();
        assert_eq!(stats.evictions, 3);
        assert_eq!(stats.size, 4);
        assert_eq!(cache.len(), 4);
    }

    #[test_log::test]
    fn test_capacity_invariant_fuzzy() {
        const CAPACITY: usize = 16;

        let cache: Cache<u64, u64> = CacheBuilder::new(CAPACITY)
            .with_eviction_config(LruConfig::default())
            .build()
            .unwrap();

        let mut rng = SmallRng::seed_from_u64(114514);
        let mut gets = 0u64;
        for _ in 0..10000 {
            let key = rng.random_range(0..64u64);
            gets += 1;
            if cache.get(&key).is_none() {
                cache.put(key, key);
            }
            assert!(cache.len() <= CAPACITY);
        }

        let stats = cache.stats();
        assert_eq!(stats.hits + stats.misses, gets);
        assert_eq!(cache.len(), CAPACITY);
    }

    #[test]
    fn test_ttl_expiry_is_a_miss() {
        let (cache, clock) = cache_with_clock(4, LruConfig::default());

        cache.put_with_ttl("a".to_string(), 1, Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(15));

        assert_eq!(cache.get("a"), None);
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
        // The expired entry was reclaimed on lookup.
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_ttl_boundary_is_live() {
        let (cache, clock) = cache_with_clock(4, LruConfig::default());

        cache.put_with_ttl("a".to_string(), 1, Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(10));

        assert_eq!(cache.get("a"), Some(1));
    }

    #[test]
    fn test_default_ttl_with_override() {
        let clock = Arc::new(ManualClock::new());
        let cache: Cache<String, u32> = CacheBuilder::new(4)
            .with_default_ttl(Duration::from_millis(10))
            .with_clock(clock.clone())
            .build()
            .unwrap();

        cache.put("a".to_string(), 1);
        cache.put_with_ttl("b".to_string(), 2, Some(Duration::from_millis(100)));
        clock.advance(Duration::from_millis(15));

        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
    }

    #[test]
    fn test_remove_idempotent() {
        let (cache, _clock) = cache_with_clock(4, LruConfig::default());

        cache.put("a".to_string(), 1);
        assert_eq!(cache.remove("a"), Some(1));
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.remove("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clear_resets_statistics() {
        let (cache, clock) = cache_with_clock(2, LruConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        cache.put("b".to_string(), 2);
        tick(&clock);
        cache.put("c".to_string(), 3);
        let _ = cache.get("a");
        let _ = cache.get("c");

        cache.clear();
        assert!(cache.is_empty());
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.evictions), (0, 0, 0));
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_purge_expired() {
        let (cache, clock) = cache_with_clock(8, LruConfig::default());

        cache.put_with_ttl("a".to_string(), 1, Some(Duration::from_millis(5)));
        cache.put_with_ttl("b".to_string(), 2, Some(Duration::from_millis(5)));
        cache.put("c".to_string(), 3);
        clock.advance(Duration::from_millis(10));

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c"));

        // The sweep records neither hits nor misses.
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (0, 0));
    }

    #[test]
    fn test_contains_does_not_touch() {
        let (cache, clock) = cache_with_clock(2, LruConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        cache.put("b".to_string(), 2);
        tick(&clock);

        // An existence probe must not refresh recency, so a stays the
        // Lru victim.
        assert!(cache.contains("a"));
        cache.put("c".to_string(), 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (0, 0));
    }

    #[test]
    fn test_overwrite_replaces_value_in_place() {
        let (cache, clock) = cache_with_clock(2, LruConfig::default());

        cache.put("a".to_string(), 1);
        tick(&clock);
        assert_eq!(cache.get("a"), Some(1));
        cache.put("a".to_string(), 2);
        assert_eq!(cache.get("a"), Some(2));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_random_policy_respects_capacity() {
        let clock = Arc::new(ManualClock::new());
        let cache: Cache<u64, u64> = CacheBuilder::new(8)
            .with_eviction_config(RandomConfig { seed: Some(42) })
            .with_clock(clock.clone())
            .build()
            .unwrap();

        let keys = (0..100u64).collect_vec();
        for key in keys {
            cache.put(key, key);
            tick(&clock);
        }

        assert_eq!(cache.len(), 8);
        assert_eq!(cache.stats().evictions, 92);
    }

    #[test]
    fn test_ttl_first_evicts_expired_over_live() {
        let (cache, clock) = cache_with_clock(2, TtlFirstConfig::default());

        cache.put_with_ttl("a".to_string(), 1, Some(Duration::from_millis(5)));
        tick(&clock);
        cache.put("b".to_string(), 2);
        clock.advance(Duration::from_millis(10));

        // b is the Lru victim, but a has expired and goes first.
        assert_eq!(cache.get("b"), Some(2));
        cache.put("c".to_string(), 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_stats_snapshot() {
        let (cache, _clock) = cache_with_clock(4, LruConfig::default());

        cache.put("a".to_string(), 1);
        let _ = cache.get("a");
        let _ = cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.utilization(), 0.25);
        assert_eq!(stats.hit_rate(), 0.5);
    }
}
