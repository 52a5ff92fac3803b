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

use strata_common::{
    clock::{Clock, SystemClock},
    code::{Key, Value},
};
use strata_memory::{CacheBuilder, Error, EvictionConfig, Result};

use crate::tiered::cache::TieredCache;

/// Tiered cache builder.
///
/// Both tiers share one clock so their timestamps are comparable.
pub struct TieredCacheBuilder {
    l1_capacity: usize,
    l2_capacity: usize,
    l1_eviction_config: EvictionConfig,
    l2_eviction_config: EvictionConfig,
    default_ttl: Option<Duration>,
    clock: Arc<dyn Clock>,
}

impl TieredCacheBuilder {
    /// Create a tiered cache builder with the given tier capacities.
    ///
    /// Capacities are validated by [`TieredCacheBuilder::build`]: both
    /// must be at least 1 and L1 must not exceed L2.
    pub fn new(l1_capacity: usize, l2_capacity: usize) -> Self {
        Self {
            l1_capacity,
            l2_capacity,
            l1_eviction_config: EvictionConfig::default(),
            l2_eviction_config: EvictionConfig::default(),
            default_ttl: None,
            clock: Arc::new(SystemClock::default()),
        }
    }

    /// Set the L1 tier eviction algorithm.
    ///
    /// The default value is Lru.
    pub fn with_l1_eviction_config(mut self, eviction_config: impl Into<EvictionConfig>) -> Self {
        self.l1_eviction_config = eviction_config.into();
        self
    }

    /// Set the L2 tier eviction algorithm.
    ///
    /// The default value is Lru.
    pub fn with_l2_eviction_config(mut self, eviction_config: impl Into<EvictionConfig>) -> Self {
        self.l2_eviction_config = eviction_config.into();
        self
    }

    /// Set the ttl applied by both tiers to entries inserted without an
    /// explicit one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// Set the clock shared by both tiers.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the tiered cache with the given configuration.
    pub fn build<K, V>(self) -> Result<TieredCache<K, V>>
    where
        K: Key,
        V: Value,
    {
        if self.l1_capacity > self.l2_capacity {
            return Err(Error::ConfigError(format!(
                "l1 capacity ({}) must not exceed l2 capacity ({})",
                self.l1_capacity, self.l2_capacity
            )));
        }

        let l1 = self
            .tier_builder(self.l1_capacity, self.l1_eviction_config.clone())
            .build()?;
        let l2 = self
            .tier_builder(self.l2_capacity, self.l2_eviction_config.clone())
            .build()?;

        Ok(TieredCache::new(l1, l2))
    }

    fn tier_builder(&self, capacity: usize, eviction_config: EvictionConfig) -> CacheBuilder {
        let mut builder = CacheBuilder::new(capacity)
            .with_eviction_config(eviction_config)
            .with_clock(self.clock.clone());
        if let Some(ttl) = self.default_ttl {
            builder = builder.with_default_ttl(ttl);
        }
        builder
    }
}
