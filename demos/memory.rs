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

use strata::prelude::*;

fn main() {
    let clock = Arc::new(ManualClock::new());
    let cache: Cache<String, String> = CacheBuilder::new(2)
        .with_eviction_config(LruConfig::default())
        .with_clock(clock.clone())
        .build()
        .unwrap();

    cache.put("a".to_string(), "alpha".to_string());
    clock.advance(Duration::from_millis(1));
    cache.put("b".to_string(), "beta".to_string());
    clock.advance(Duration::from_millis(1));

    // Touch a, then overflow: the Lru victim is b.
    assert_eq!(cache.get("a"), Some("alpha".to_string()));
    clock.advance(Duration::from_millis(1));
    cache.put("c".to_string(), "gamma".to_string());

    assert!(cache.contains("a"));
    assert!(!cache.contains("b"));
    assert!(cache.contains("c"));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.evictions, 1);

    println!(
        "memory demo: size={}/{} hit_rate={:.2}",
        stats.size,
        stats.capacity,
        stats.hit_rate()
    );
}
