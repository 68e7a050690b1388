//! Cache counters, compiled only with the `metrics` feature.
//!
//! Every policy records into a [`CoreOnlyMetrics`] held by its store and
//! exposes `metrics_snapshot()`.
//!
//! ```
//! # #[cfg(feature = "metrics")]
//! # {
//! use evictkit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(1);
//! cache.insert("a", 1);
//! cache.get(&"a");
//! cache.get(&"b");
//! cache.insert("b", 2);
//!
//! let snap = cache.metrics_snapshot();
//! assert_eq!(snap.get_hits, 1);
//! assert_eq!(snap.get_misses, 1);
//! assert_eq!(snap.evicted_entries, 1);
//! # }
//! ```

pub mod cell;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::CoreOnlyMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{
    CoreMetricsReadRecorder, CoreMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};
