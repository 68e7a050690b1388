//! evictkit: small fixed-capacity key/value caches with pluggable eviction.
//!
//! | Policy                       | Evicts                                         |
//! |------------------------------|------------------------------------------------|
//! | [`FifoCache`]                | the oldest insertion                           |
//! | [`LifoCache`]                | the entry put just before the newcomer         |
//! | [`MruCache`]                 | the most recently used entry, newcomer aside   |
//! | [`LfuCache`]                 | the least frequently used, LRU on ties         |
//! | [`BasicCache`]               | nothing                                        |
//!
//! Each eviction is reported once to an [`EvictionListener`] and logged as a
//! `tracing` debug event. Install a subscriber to see them.
//!
//! ```
//! use evictkit::prelude::*;
//!
//! let log = EvictionLog::new();
//! let mut cache = LfuCache::new(2).with_listener(log.clone());
//!
//! cache.put(Some("A"), Some(1));
//! cache.put(Some("B"), Some(2));
//! cache.get(&"A");
//! cache.put(Some("C"), Some(3));
//!
//! assert_eq!(log.keys(), vec!["B"]);
//! print!("{}", cache.render_cache());
//! ```
//!
//! [`FifoCache`]: policy::fifo::FifoCache
//! [`LifoCache`]: policy::lifo::LifoCache
//! [`MruCache`]: policy::mru::MruCache
//! [`LfuCache`]: policy::lfu::LfuCache
//! [`BasicCache`]: policy::basic::BasicCache
//! [`EvictionListener`]: store::EvictionListener

pub mod builder;
pub mod config;
pub mod ds;
pub mod error;
pub mod policy;
pub mod store;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod traits;
