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

//! In-memory caching core for strata.
//!
//! The store is a bounded key → entry map behind a single lock. Victim
//! selection on a full store is delegated to a pluggable [`eviction`]
//! policy, entries expire lazily by ttl, and every operation keeps the
//! hit/miss/eviction counters current.

mod cache;
mod entry;
mod error;
mod metrics;

pub mod eviction;

pub use cache::{Cache, CacheBuilder};
pub use entry::Entry;
pub use error::{Error, Result};
pub use eviction::{
    fifo::FifoConfig, lfu::LfuConfig, lru::LruConfig, random::RandomConfig, ttl::TtlFirstConfig,
    Eviction, EvictionConfig,
};
pub use metrics::Stats;
