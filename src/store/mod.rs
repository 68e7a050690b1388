//! The bounded key → item table shared by every policy.
//!
//! Policies own eviction *order*; [`CacheStore`] owns the entries, the
//! capacity bound, eviction counting, notification and logging. A policy
//! only decides *which* key goes.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐        ┌───────────────────────────┐
//!   │ Policy (FIFO/LIFO/MRU/LFU)   │        │ CacheStore<K, V>          │
//!   │                              │ upsert │                           │
//!   │  order / frequency metadata  ├───────►│  table: FxHashMap<K, V>   │
//!   │                              │discard │  capacity                 │
//!   │  picks the victim key        ├───────►│  evictions                │
//!   └──────────────────────────────┘        │  listener ──► on_evict()  │
//!                                           │  tracing::debug!          │
//!                                           └───────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`CacheStore`]: bounded table plus eviction plumbing
//! - [`EvictionListener`] and the stock listeners in [`listener`]
//!
//! ## Thread Safety
//!
//! Not thread-safe. The boxed listener is neither `Send` nor `Sync`, so a
//! store (and every cache built on one) stays on the thread that made it
//! unless the caller wraps it in its own synchronization.

pub mod listener;

pub use listener::{DiscardWriter, EvictionListener, EvictionLog, FnListener};

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CoreOnlyMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsReadRecorder, CoreMetricsRecorder};

/// Bounded mapping from key to item.
///
/// The bound is checked by the owning policy, which calls [`discard`] when
/// an insert has pushed the table past [`capacity`].
///
/// [`discard`]: CacheStore::discard
/// [`capacity`]: CacheStore::capacity
pub struct CacheStore<K, V> {
    table: FxHashMap<K, V>,
    capacity: usize,
    policy: &'static str,
    evictions: u64,
    listener: Option<Box<dyn EvictionListener<K, V>>>,
    #[cfg(feature = "metrics")]
    metrics: CoreOnlyMetrics,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty store. `policy` names the owner in log events.
    pub(crate) fn new(capacity: usize, policy: &'static str) -> Self {
        // Unbounded stores must not pre-allocate their bound.
        let prealloc = capacity.min(1024);
        Self {
            table: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            capacity,
            policy,
            evictions: 0,
            listener: None,
            #[cfg(feature = "metrics")]
            metrics: CoreOnlyMetrics::default(),
        }
    }

    pub(crate) fn set_listener(&mut self, listener: Box<dyn EvictionListener<K, V>>) {
        self.listener = Some(listener);
    }

    /// Looks up an item without touching any bookkeeping.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Looks up an item on behalf of a caller's `get`, counting hit or miss.
    #[inline]
    pub(crate) fn lookup(&self, key: &K) -> Option<&V> {
        let found = self.table.get(key);
        self.record_get(found.is_some());
        found
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Maximum number of entries once an operation returns.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` when inserting one more new key would exceed the bound.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.table.len() >= self.capacity
    }

    /// `true` when the table holds more entries than the bound allows.
    #[inline]
    pub fn is_over_capacity(&self) -> bool {
        self.table.len() > self.capacity
    }

    /// Total number of evictions since creation.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Name of the owning policy.
    pub fn policy(&self) -> &'static str {
        self.policy
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter()
    }

    /// Inserts or overwrites `key`, returning the previous item.
    pub(crate) fn upsert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.table.insert(key, value);
        self.record_insert(previous.is_none());
        previous
    }

    /// Overwrites the item of a key already present, returning the old item.
    pub(crate) fn replace(&mut self, key: &K, value: V) -> Option<V> {
        let previous = std::mem::replace(self.table.get_mut(key)?, value);
        self.record_insert(false);
        Some(previous)
    }

    /// Removes the policy-chosen victim, notifies the listener, and logs it.
    ///
    /// Returns `None` (and notifies nobody) if `key` is not in the table.
    pub(crate) fn discard(&mut self, key: &K) -> Option<V> {
        let value = self.table.remove(key)?;
        self.evictions += 1;
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evict_call();
            self.metrics.record_evicted_entry();
        }

        tracing::debug!(
            policy = self.policy,
            len = self.table.len(),
            capacity = self.capacity,
            evictions = self.evictions,
            "evicted entry"
        );
        if let Some(listener) = self.listener.as_mut() {
            listener.on_evict(key, &value);
        }
        Some(value)
    }

    pub(crate) fn clear(&mut self) {
        tracing::trace!(policy = self.policy, len = self.table.len(), "clear");
        self.table.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }

    #[inline]
    fn record_get(&self, hit: bool) {
        #[cfg(feature = "metrics")]
        if hit {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        #[cfg(not(feature = "metrics"))]
        let _ = hit;
    }

    #[inline]
    fn record_insert(&mut self, new: bool) {
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert_call();
            if new {
                self.metrics.record_insert_new();
            } else {
                self.metrics.record_insert_update();
            }
        }
        #[cfg(not(feature = "metrics"))]
        let _ = new;
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.table.len(), self.capacity)
    }
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    /// Renders the table as `Current cache:` followed by sorted `key: item` lines.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(4);
    /// cache.insert("B", "World");
    /// cache.insert("A", "Hello");
    ///
    /// assert_eq!(cache.render_cache(), "Current cache:\nA: Hello\nB: World\n");
    /// ```
    pub fn render(&self) -> String {
        let mut entries: Vec<_> = self.table.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut out = String::from("Current cache:\n");
        for (key, value) in entries {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out
    }
}

impl<K, V> fmt::Debug for CacheStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("policy", &self.policy)
            .field("len", &self.table.len())
            .field("capacity", &self.capacity)
            .field("evictions", &self.evictions)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_reports_previous() {
        let mut store = CacheStore::new(2, "test");
        assert_eq!(store.upsert("a", 1), None);
        assert_eq!(store.upsert("a", 2), Some(1));
        assert_eq!(store.get(&"a"), Some(&2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_only_touches_existing_keys() {
        let mut store = CacheStore::new(2, "test");
        assert_eq!(store.replace(&"a", 1), None);
        assert!(store.is_empty());

        store.upsert("a", 1);
        assert_eq!(store.replace(&"a", 5), Some(1));
        assert_eq!(store.get(&"a"), Some(&5));
    }

    #[test]
    fn capacity_predicates() {
        let mut store = CacheStore::new(1, "test");
        assert!(!store.is_full());
        store.upsert(1, "one");
        assert!(store.is_full());
        assert!(!store.is_over_capacity());
        store.upsert(2, "two");
        assert!(store.is_over_capacity());
    }

    #[test]
    fn discard_counts_and_notifies_once() {
        let log = EvictionLog::new();
        let mut store = CacheStore::new(1, "test");
        store.set_listener(Box::new(log.clone()));
        store.upsert("a", 1);
        store.upsert("b", 2);

        assert_eq!(store.discard(&"a"), Some(1));
        assert_eq!(store.discard(&"a"), None);
        assert_eq!(store.evictions(), 1);
        assert_eq!(log.keys(), vec!["a"]);
    }

    #[test]
    fn discard_emits_debug_event() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let out = Captured::default();
        let sink = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut store = CacheStore::new(1, "lifo");
            store.upsert("a", 1);
            store.upsert("b", 2);
            store.discard(&"a");
        });

        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("evicted entry"), "{text}");
        assert!(text.contains("evictions=1"), "{text}");
        assert!(text.contains("lifo"), "{text}");
    }

    #[test]
    fn clear_keeps_eviction_total() {
        let mut store = CacheStore::new(1, "test");
        store.upsert(1, 1);
        store.upsert(2, 2);
        store.discard(&1);
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.evictions(), 1);
        assert_eq!(store.capacity(), 1);
    }

    #[test]
    fn render_sorts_keys() {
        let mut store = CacheStore::new(4, "test");
        store.upsert("C", 3);
        store.upsert("A", 1);
        store.upsert("B", 2);

        assert_eq!(store.render(), "Current cache:\nA: 1\nB: 2\nC: 3\n");
    }

    #[test]
    fn debug_omits_entries() {
        let store: CacheStore<u8, u8> = CacheStore::new(3, "fifo");
        let dbg = format!("{store:?}");
        assert!(dbg.contains("fifo"));
        assert!(dbg.contains("capacity: 3"));
    }
}
