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

use std::fmt::Debug;

/// Key trait for the caches.
///
/// `Ord` backs deterministic tie-breaks in victim selection.
pub trait Key: Send + Sync + 'static + std::hash::Hash + Eq + Ord + Clone + Debug {}
impl<T: Send + Sync + 'static + std::hash::Hash + Eq + Ord + Clone + Debug> Key for T {}

/// Value trait for the caches.
///
/// The store owns the authoritative copy; lookups hand out clones.
pub trait Value: Send + Sync + 'static + Clone {}
impl<T: Send + Sync + 'static + Clone> Value for T {}
