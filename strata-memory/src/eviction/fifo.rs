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

use serde::{Deserialize, Serialize};

use strata_common::code::{Key, Value};

use super::Eviction;
use crate::{
    entry::Entry,
    error::{Error, Result},
};

/// Fifo eviction algorithm config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FifoConfig {}

/// Fifo eviction algorithm.
///
/// Evicts the oldest insertion regardless of access recency; ties fall to
/// key order so victim choice stays deterministic.
pub struct Fifo {
    _config: FifoConfig,
}

impl Fifo {
    /// Create the policy from its config.
    pub fn new(config: FifoConfig) -> Self {
        Self { _config: config }
    }
}

impl<K, V> Eviction<K, V> for Fifo
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
            .min_by_key(|entry| (entry.inserted_at(), entry.key()))
            .map(|entry| entry.key().clone())
            .ok_or(Error::EmptyStoreEviction)
    }
}
