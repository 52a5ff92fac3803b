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

/// Ttl-first eviction algorithm config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TtlFirstConfig {}

/// Ttl-first eviction algorithm.
///
/// Prefers entries whose ttl has already elapsed, earliest insertion
/// first. When nothing has expired it falls back to Lru.
pub struct TtlFirst {
    _config: TtlFirstConfig,
}

impl TtlFirst {
    /// Create the policy from its config.
    pub fn new(config: TtlFirstConfig) -> Self {
        Self { _config: config }
    }
}

impl<K, V> Eviction<K, V> for TtlFirst
where
    K: Key,
    V: Value,
{
    fn select_victim<'e>(
        &mut self,
        entries: &mut dyn Iterator<Item = &'e Entry<K, V>>,
        now: Duration,
    ) -> Result<K> {
        // Single pass tracking both the best expired candidate and the Lru
        // fallback.
        let mut expired: Option<&Entry<K, V>> = None;
        let mut fallback: Option<&Entry<K, V>> = None;

        for entry in entries {
            if entry.is_expired(now)
                && expired.is_none_or(|best| {
                    (entry.inserted_at(), entry.key()) < (best.inserted_at(), best.key())
                })
            {
                expired = Some(entry);
            }
            if fallback.is_none_or(|best| {
                (entry.last_accessed_at(), entry.inserted_at())
                    < (best.last_accessed_at(), best.inserted_at())
            }) {
                fallback = Some(entry);
            }
        }

        expired
            .or(fallback)
            .map(|entry| entry.key().clone())
            .ok_or(Error::EmptyStoreEviction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eviction::test_utils::{entry, entry_with_ttl, select};

    #[test]
    fn test_ttl_first_prefers_expired() {
        let entries = vec![
            entry(1, 0, &[]),
            entry_with_ttl(2, 10, 20),
            entry_with_ttl(3, 0, 100),
        ];

        // At t=50 only entry 2 has expired; it wins over the Lru choice.
        let mut policy = TtlFirst::new(TtlFirstConfig::default());
        assert_eq!(select(&mut policy, &entries, 50).unwrap(), 2);
    }

    #[test]
    fn test_ttl_first_earliest_insertion_among_expired() {
        let entries = vec![
            entry_with_ttl(1, 20, 5),
            entry_with_ttl(2, 10, 5),
            entry_with_ttl(3, 30, 5),
        ];

        let mut policy = TtlFirst::new(TtlFirstConfig::default());
        assert_eq!(select(&mut policy, &entries, 100).unwrap(), 2);
    }

    #[test]
    fn test_ttl_first_falls_back_to_lru() {
        let entries = vec![
            entry(1, 0, &[40]),
            entry(2, 0, &[20]),
            entry_with_ttl(3, 0, 1000),
        ];

        // Nothing has expired at t=50; entry 3 was never hit, so it is the
        // least recently used.
        let mut policy = TtlFirst::new(TtlFirstConfig::default());
        assert_eq!(select(&mut policy, &entries, 50).unwrap(), 3);
    }

    #[test]
    fn test_ttl_first_empty_set_fails() {
        let mut policy = TtlFirst::new(TtlFirstConfig::default());
        assert!(matches!(
            select(&mut policy, &[], 0),
            Err(Error::EmptyStoreEviction)
        ));
    }
}
