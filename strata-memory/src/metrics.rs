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

/// Operation counters of one cache store.
///
/// Lives inside the locked store state, so plain integers suffice.
#[derive(Debug, Default)]
pub(crate) struct Metrics {
    /// get hits
    pub hit: u64,
    /// get misses
    pub miss: u64,
    /// evictions under capacity pressure
    pub evict: u64,
}

impl Metrics {
    pub fn record_hit(&mut self) {
        self.hit += 1;
    }

    pub fn record_miss(&mut self) {
        self.miss += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evict += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Point-in-time statistics snapshot of a cache store.
///
/// Rates are derived on read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// get hits
    pub hits: u64,
    /// get misses
    pub misses: u64,
    /// evictions under capacity pressure
    pub evictions: u64,
    /// live entries at snapshot time
    pub size: usize,
    /// configured capacity
    pub capacity: usize,
}

impl Stats {
    /// `hits / (hits + misses)`, or `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// `size / capacity`. Capacity is always at least 1.
    pub fn utilization(&self) -> f64 {
        self.size as f64 / self.capacity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_without_accesses() {
        let stats = Stats {
            hits: 0,
            misses: 0,
            evictions: 0,
            size: 0,
            capacity: 10,
        };
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_derived_rates() {
        let stats = Stats {
            hits: 3,
            misses: 1,
            evictions: 2,
            size: 5,
            capacity: 10,
        };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(stats.utilization(), 0.5);
    }

    #[test]
    fn test_metrics_reset() {
        let mut metrics = Metrics::default();
        metrics.record_hit();
        metrics.record_miss();
        metrics.record_eviction();
        assert_eq!((metrics.hit, metrics.miss, metrics.evict), (1, 1, 1));

        metrics.reset();
        assert_eq!((metrics.hit, metrics.miss, metrics.evict), (0, 0, 0));
    }
}
