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

use std::{sync::Arc, time::Duration};

use serde::Serialize;

use strata_common::{
    clock::{Clock, SystemClock},
    code::Value,
};
use strata_memory::{Cache, CacheBuilder, EvictionConfig, Stats};

type KeyFn<I> = Box<dyn Fn(&I) -> Vec<u8> + Send + Sync>;
type BypassFn<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;
type OpFn<I, V, E> = Box<dyn Fn(&I) -> Result<V, E> + Send + Sync>;

/// Memoized wrapper around a deterministic, side-effect-free operation.
///
/// Results are kept in an internal [`Cache`] keyed by a canonical
/// serialization of the input. A failing operation propagates its error
/// unchanged and stores nothing, so transient failures are never pinned
/// in the cache.
///
/// There is no single-flight coalescing: concurrent calls that miss on
/// the same input may each invoke the operation, and the last one to
/// finish overwrites the stored value. The operation itself always runs
/// outside the cache lock.
pub struct Memoized<I, V, E>
where
    V: Value,
{
    cache: Cache<Vec<u8>, V>,
    op: OpFn<I, V, E>,
    key_fn: KeyFn<I>,
    bypass: Option<BypassFn<I>>,
}

impl<I, V, E> Memoized<I, V, E>
where
    V: Value,
{
    /// Get the memoized result for `input`, computing it on a miss.
    ///
    /// When the bypass predicate accepts `input`, the cache is skipped
    /// for both read and write and no statistics are recorded.
    pub fn get(&self, input: &I) -> Result<V, E> {
        self.call(input, None)
    }

    /// Same as [`Memoized::get`], with a per-call ttl on the stored
    /// result.
    pub fn get_with_ttl(&self, input: &I, ttl: Duration) -> Result<V, E> {
        self.call(input, Some(ttl))
    }

    fn call(&self, input: &I, ttl: Option<Duration>) -> Result<V, E> {
        if self.bypass.as_ref().is_some_and(|pred| pred(input)) {
            return (self.op)(input);
        }

        let key = (self.key_fn)(input);
        if let Some(value) = self.cache.get(key.as_slice()) {
            return Ok(value);
        }

        let value = (self.op)(input)?;
        self.cache.put_with_ttl(key, value.clone(), ttl);
        Ok(value)
    }

    /// Statistics snapshot of the backing cache.
    ///
    /// Bypassed calls never show up here.
    pub fn stats(&self) -> Stats {
        self.cache.stats()
    }
}

/// Builder for [`Memoized`].
pub struct MemoBuilder<I> {
    capacity: usize,
    eviction_config: EvictionConfig,
    default_ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
    key_fn: KeyFn<I>,
    bypass: Option<BypassFn<I>>,
}

impl<I> MemoBuilder<I>
where
    I: Serialize,
{
    /// Create a memoization builder with the given backing capacity.
    ///
    /// The default key function serializes the input with `bincode`,
    /// which is stable for a fixed input. It panics on inputs that do
    /// not serialize; install [`MemoBuilder::with_key_fn`] for such
    /// types.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            eviction_config: EvictionConfig::default(),
            default_ttl: None,
            clock: Arc::new(SystemClock::default()),
            key_fn: Box::new(|input| {
                bincode::serialize(input).expect("memoization input must serialize")
            }),
            bypass: None,
        }
    }
}

impl<I> MemoBuilder<I> {
    /// Set the backing cache eviction algorithm.
    ///
    /// The default value is Lru.
    pub fn with_eviction_config(mut self, eviction_config: impl Into<EvictionConfig>) -> Self {
        self.eviction_config = eviction_config.into();
        self
    }

    /// Set the ttl applied to results stored without a per-call one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set the clock of the backing cache.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the canonical key serialization.
    ///
    /// Inputs that map to the same key share one memoized result.
    pub fn with_key_fn(mut self, key_fn: impl Fn(&I) -> Vec<u8> + Send + Sync + 'static) -> Self {
        self.key_fn = Box::new(key_fn);
        self
    }

    /// Install a bypass predicate.
    ///
    /// Inputs it accepts skip the cache entirely: the operation runs
    /// directly, nothing is stored, and no statistics are recorded.
    pub fn with_bypass(mut self, pred: impl Fn(&I) -> bool + Send + Sync + 'static) -> Self {
        self.bypass = Some(Box::new(pred));
        self
    }

    /// Build the wrapper around `op`.
    pub fn build<V, E>(
        self,
        op: impl Fn(&I) -> Result<V, E> + Send + Sync + 'static,
    ) -> strata_memory::Result<Memoized<I, V, E>>
    where
        V: Value,
    {
        let mut builder = CacheBuilder::new(self.capacity)
            .with_eviction_config(self.eviction_config)
            .with_clock(self.clock);
        if let Some(ttl) = self.default_ttl {
            builder = builder.with_default_ttl(ttl);
        }
        let cache = builder.build()?;

        Ok(Memoized {
            cache,
            op: Box::new(op),
            key_fn: self.key_fn,
            bypass: self.bypass,
        })
    }
}
