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

use std::time::Duration;

use rand::{rngs::SmallRng, seq::IteratorRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use strata_common::code::{Key, Value};

use super::Eviction;
use crate::{
    entry::Entry,
    error::{Error, Result},
};

/// Random eviction algorithm config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomConfig {
    /// Rng seed. Pin it for reproducible victim sequences; defaults to os
    /// entropy.
    pub seed: Option<u64>,
}

/// Random eviction algorithm.
///
/// Evicts a uniformly chosen entry.
pub struct Random {
    rng: SmallRng,
}

impl Random {
    /// Create the policy from its config.
    pub fn new(config: RandomConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self { rng }
    }
}

impl<K, V> Eviction<K, V> for Random
where
    K: Key,
    V: Value,
{
    fn select_victim<'e>(
        &mut self,
        entries: &mut dyn Iterator<Item = &'e Entry<K, V>>,
        _now: Duration,
    ) -> Result<K> {
        entries
            .choose(&mut self.rng)
            .map(|entry| entry.key().clone())
            .ok_or(Error::EmptyStoreEviction)
    }
}
