use crate::metrics::cell::MetricsCell;
use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsReadRecorder, CoreMetricsRecorder, MetricsReset};

// ---------------------------------------------------------------------------
// CoreOnlyMetrics (FIFO, LIFO, MRU, LFU, Basic)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct CoreOnlyMetrics {
    pub get_calls: MetricsCell,
    pub get_hits: MetricsCell,
    pub get_misses: MetricsCell,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub clear_calls: u64,
}

impl CoreOnlyMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the counters and attaches the current gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls.get(),
            get_hits: self.get_hits.get(),
            get_misses: self.get_misses.get(),
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            clear_calls: self.clear_calls,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsReadRecorder for CoreOnlyMetrics {
    fn record_get_hit(&self) {
        self.get_calls.incr();
        self.get_hits.incr();
    }
    fn record_get_miss(&self) {
        self.get_calls.incr();
        self.get_misses.incr();
    }
}

impl CoreMetricsRecorder for CoreOnlyMetrics {
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl MetricsReset for CoreOnlyMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_counters_split_hits_and_misses() {
        let m = CoreOnlyMetrics::new();
        m.record_get_hit();
        m.record_get_hit();
        m.record_get_miss();

        let snap = m.snapshot(2, 4);
        assert_eq!(snap.get_calls, 3);
        assert_eq!(snap.get_hits, 2);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.cache_len, 2);
        assert_eq!(snap.capacity, 4);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut m = CoreOnlyMetrics::new();
        m.record_insert_call();
        m.record_insert_new();
        m.record_evicted_entry();
        m.reset_metrics();

        assert_eq!(m.snapshot(0, 1), CacheMetricsSnapshot {
            capacity: 1,
            ..Default::default()
        });
    }
}
