//! # Metrics Traits
//!
//! Recording and snapshotting are split into small traits so policy code only
//! ever writes counters and tests/benches only ever read them.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │  written by CacheStore on every
//!   │  insert/evict/clear         │  insert / discard / clear
//!   ├─────────────────────────────┤
//!   │   CoreMetricsReadRecorder   │  written through &self on every
//!   │  get_hit/get_miss           │  lookup
//!   └──────────────┬──────────────┘
//!                  │ implemented by
//!                  ▼
//!   ┌─────────────────────────────┐     ┌──────────────────────────────┐
//!   │      CoreOnlyMetrics        │────►│ MetricsSnapshotProvider<S>   │
//!   └─────────────────────────────┘     │ (bench/test)                 │
//!                                       └──────────────────────────────┘
//! ```

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Lookup counters for `&self` read paths (uses interior mutability).
pub trait CoreMetricsReadRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
