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

use std::{fmt::Debug, time::Duration};

use strata_common::code::{Key, Value};

/// A single cached record and its bookkeeping metadata.
///
/// Metadata is only mutated through the owning store while its lock is
/// held; policies observe entries read-only during victim selection.
pub struct Entry<K, V>
where
    K: Key,
    V: Value,
{
    key: K,
    value: V,
    inserted_at: Duration,
    last_accessed_at: Duration,
    access_count: u64,
    ttl: Option<Duration>,
}

impl<K, V> Debug for Entry<K, V>
where
    K: Key,
    V: Value,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry").field("key", &self.key).finish()
    }
}

impl<K, V> Entry<K, V>
where
    K: Key,
    V: Value,
{
    pub(crate) fn new(key: K, value: V, now: Duration, ttl: Option<Duration>) -> Self {
        Self {
            key,
            value,
            inserted_at: now,
            last_accessed_at: now,
            access_count: 0,
            ttl,
        }
    }

    /// Get the immutable reference of the entry key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Get the immutable reference of the entry value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Timestamp of the insertion that created this entry.
    pub fn inserted_at(&self) -> Duration {
        self.inserted_at
    }

    /// Timestamp of the latest hit, or the insertion timestamp before the
    /// first hit.
    pub fn last_accessed_at(&self) -> Duration {
        self.last_accessed_at
    }

    /// Hits served by this entry.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Time-to-live, if any.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Whether the entry's ttl has strictly elapsed at `now`.
    pub fn is_expired(&self, now: Duration) -> bool {
        match self.ttl {
            Some(ttl) => now.saturating_sub(self.inserted_at) > ttl,
            None => false,
        }
    }

    /// Refresh access metadata on a hit.
    pub(crate) fn touch(&mut self, now: Duration) {
        self.last_accessed_at = now;
        self.access_count += 1;
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}
