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
    let tiered: TieredCache<u64, u64> = TieredCacheBuilder::new(1, 4)
        .with_l1_eviction_config(LruConfig::default())
        .with_l2_eviction_config(LfuConfig::default())
        .with_clock(clock.clone())
        .build()
        .unwrap();

    tiered.put(1, 100);
    clock.advance(Duration::from_millis(1));
    tiered.put(2, 200);
    clock.advance(Duration::from_millis(1));

    // Key 1 was pushed out of L1 by key 2 but survives in L2; the hit
    // below promotes it back into L1.
    assert_eq!(tiered.get(&1), Some(100));
    assert_eq!(tiered.l2_stats().hits, 1);
    clock.advance(Duration::from_millis(1));
    assert_eq!(tiered.get(&1), Some(100));
    assert_eq!(tiered.l1_stats().hits, 1);

    let stats = tiered.stats();
    assert_eq!((stats.hits, stats.misses), (2, 0));

    println!("tiered demo: combined hit_rate={:.2}", stats.hit_rate());
}
