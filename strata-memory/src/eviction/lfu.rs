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

/// Lfu eviction algorithm config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LfuConfig {}

/// Lfu eviction algorithm.
///
/// Evicts the entry with the fewest hits; ties fall to the one accessed
/// least recently.
pub struct Lfu {
    _config: LfuConfig,
}

impl Lfu {
    /// Create the policy from its config.
    pub fn new(config: LfuConfig) -> Self {
        Self { _config: config }
    }
}

impl<K, V> Eviction<K, V> for Lfu
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
            .min_by_key(|entry| (entry.access_count(), entry.last_accessed_at()))
            .map(|entry| entry.key().clone())
            .ok_or(Error::EmptyStoreEviction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eviction::test_utils::{entry, select};

    #[test]
    fn test_lfu_picks_least_frequently_used() {
        let entries = vec![
            entry(1, 0, &[10, 20, 30]),
            entry(2, 0, &[40]),
            entry(3, 0, &[15, 25]),
        ];

        let mut lfu = Lfu::new(LfuConfig::default());
        assert_eq!(select(&mut lfu, &entries, 100).unwrap(), 2);
    }

    #[test]
    fn test_lfu_frequency_beats_recency() {
        // Entry 1 is the most recently touched but the least hit.
        let entries = vec![entry(1, 0, &[90]), entry(2, 0, &[10, 20])];

        let mut lfu = Lfu::new(LfuConfig::default());
        assert_eq!(select(&mut lfu, &entries, 100).unwrap(), 1);
    }

    #[test]
    fn test_lfu_tie_breaks_on_recency() {
        let entries = vec![entry(1, 0, &[10, 50]), entry(2, 0, &[20, 30])];

        let mut lfu = Lfu::new(LfuConfig::default());
        assert_eq!(select(&mut lfu, &entries, 100).unwrap(), 2);
    }

    #[test]
    fn test_lfu_empty_set_fails() {
        let mut lfu = Lfu::new(LfuConfig::default());
        assert!(matches!(
            select(&mut lfu, &[], 0),
            Err(Error::EmptyStoreEviction)
        ));
    }
}
