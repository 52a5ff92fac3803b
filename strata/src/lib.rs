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

//! strata - tiered in-memory cache for Rust.
//!
//! A bounded, policy-pluggable, ttl-aware cache store with optional
//! two-level composition and function memoization on top.
//!
//! ```
//! use strata::prelude::*;
//!
//! let cache: Cache<String, u32> = CacheBuilder::new(16)
//!     .with_eviction_config(LruConfig::default())
//!     .build()
//!     .unwrap();
//!
//! cache.put("hello".to_string(), 42);
//! assert_eq!(cache.get("hello"), Some(42));
//! assert_eq!(cache.stats().hits, 1);
//! ```

/// Memoization of deterministic operations.
pub mod memo;
/// The commonly used imports.
pub mod prelude;
/// Two-level cache composition.
pub mod tiered;

pub use strata_common as common;
pub use strata_memory as memory;

pub use prelude::*;
