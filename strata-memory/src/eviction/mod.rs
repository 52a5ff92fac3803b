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

//! Eviction algorithms.
//!
//! A policy picks the victim to drop when the store is full. Selection is
//! a read-only scan over the live entry set; all tie-breaks are
//! deterministic so victim choice is reproducible for a fixed workload
//! (the random policy is the exception, and it is seedable).

use std::time::Duration;

use strata_common::code::{Key, Value};

use crate::{entry::Entry, error::Result};

pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod random;
pub mod ttl;

use fifo::{Fifo, FifoConfig};
use lfu::{Lfu, LfuConfig};
use lru::{Lru, LruConfig};
use random::{Random, RandomConfig};
use ttl::{TtlFirst, TtlFirstConfig};

/// Victim selection policy for a full store.
pub trait Eviction<K, V>: Send + Sync + 'static
where
    K: Key,
    V: Value,
{
    /// Pick the entry to evict from the current entry set.
    ///
    /// Returns the key of exactly one entry yielded by `entries`, or
    /// [`Error::EmptyStoreEviction`] when `entries` yields nothing.
    ///
    /// [`Error::EmptyStoreEviction`]: crate::error::Error::EmptyStoreEviction
    fn select_victim<'e>(
        &mut self,
        entries: &mut dyn Iterator<Item = &'e Entry<K, V>>,
        now: Duration,
    ) -> Result<K>;
}

/// Eviction algorithm configurations.
#[derive(Debug, Clone)]
pub enum EvictionConfig {
    /// FIFO eviction algorithm config.
    Fifo(FifoConfig),
    /// LRU eviction algorithm config.
    Lru(LruConfig),
    /// LFU eviction algorithm config.
    Lfu(LfuConfig),
    /// Random eviction algorithm config.
    Random(RandomConfig),
    /// TTL-first eviction algorithm config.
    TtlFirst(TtlFirstConfig),
}

impl Default for EvictionConfig {
    fn default() -> Self {
        Self::Lru(LruConfig::default())
    }
}

impl From<FifoConfig> for EvictionConfig {
    fn from(value: FifoConfig) -> EvictionConfig {
        EvictionConfig::Fifo(value)
    }
}

impl From<LruConfig> for EvictionConfig {
    fn from(value: LruConfig) -> EvictionConfig {
        EvictionConfig::Lru(value)
    }
}

impl From<LfuConfig> for EvictionConfig {
    fn from(value: LfuConfig) -> EvictionConfig {
        EvictionConfig::Lfu(value)
    }
}

impl From<RandomConfig> for EvictionConfig {
    fn from(value: RandomConfig) -> EvictionConfig {
        EvictionConfig::Random(value)
    }
}

impl From<TtlFirstConfig> for EvictionConfig {
    fn from(value: TtlFirstConfig) -> EvictionConfig {
        EvictionConfig::TtlFirst(value)
    }
}

impl EvictionConfig {
    pub(crate) fn into_policy<K, V>(self) -> Box<dyn Eviction<K, V>>
    where
        K: Key,
        V: Value,
    {
        match self {
            Self::Fifo(config) => Box::new(Fifo::new(config)),
            Self::Lru(config) => Box::new(Lru::new(config)),
            Self::Lfu(config) => Box::new(Lfu::new(config)),
            Self::Random(config) => Box::new(Random::new(config)),
            Self::TtlFirst(config) => Box::new(TtlFirst::new(config)),
        }
    }
}
