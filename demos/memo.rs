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

use strata::prelude::*;

fn expensive_square(input: &u64) -> Result<u64, String> {
    if *input > 1_000_000 {
        return Err(format!("input out of range: {input}"));
    }
    Ok(input * input)
}

fn main() {
    let memo = MemoBuilder::new(64)
        // Tiny inputs are cheaper to recompute than to cache.
        .with_bypass(|input: &u64| *input < 10)
        .build(expensive_square)
        .unwrap();

    assert_eq!(memo.get(&3), Ok(9));
    assert_eq!(memo.get(&1000), Ok(1_000_000));
    assert_eq!(memo.get(&1000), Ok(1_000_000));
    assert!(memo.get(&2_000_000).is_err());

    let stats = memo.stats();
    // The bypassed call is invisible; the failed call was not stored.
    assert_eq!((stats.hits, stats.misses), (1, 2));
    assert_eq!(stats.size, 1);

    println!("memo demo: hit_rate={:.2}", stats.hit_rate());
}
