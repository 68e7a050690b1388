pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::config::{CacheConfig, DEFAULT_MAX_ITEMS};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, KeyOrder, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::basic::BasicCache;
pub use crate::policy::fifo::FifoCache;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lifo::LifoCache;
pub use crate::policy::mru::MruCache;
pub use crate::store::{DiscardWriter, EvictionListener, EvictionLog, FnListener};
pub use crate::traits::{CoreCache, FifoCacheTrait, LfuCacheTrait};
