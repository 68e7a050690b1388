//! LIFO (Last In, First Out) cache replacement policy.
//!
//! Keys form a stack ordered by their latest put. When a put overflows the
//! cache, the victim is the entry *directly below* the top: the key put just
//! before the one that caused the overflow. The newcomer itself always stays.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        LifoCache<K, V> Layout                               │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  store: CacheStore<K, V>          stack: KeyOrder<K>                │   │
//! │   │       key → item                        put order                   │   │
//! │   │                                                                     │   │
//! │   │  ┌──────────┬──────┐          ┌─────────────────────────┐           │   │
//! │   │  │   Key    │ Item │          │ Bottom         Top      │           │   │
//! │   │  ├──────────┼──────┤          ├─────────────────────────┤           │   │
//! │   │  │   "A"    │  v1  │          │ [A]  [B]  [C]           │           │   │
//! │   │  │   "B"    │  v2  │          │       ↑    ↑            │           │   │
//! │   │  │   "C"    │  v3  │          │     EVICT  newcomer     │           │   │
//! │   │  └──────────┴──────┘          └─────────────────────────┘           │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow
//! ───────────
//!
//!   insert(key, item):
//!     1. Store (key, item), overwriting if present
//!     2. Move key to the top of the stack (new or existing)
//!     3. Over capacity? discard the key just below the top
//!
//!   get(key):
//!     1. Lookup only, the stack is untouched
//! ```
//!
//! ## Operations
//!
//! | Operation  | Time   | Notes                                      |
//! |------------|--------|--------------------------------------------|
//! | `get`      | O(1)   | Pure lookup                                |
//! | `insert`   | O(1)   | Linked stack, victim found via prev link   |
//! | `peek_top` | O(1)   | Most recently put entry                    |
//! | `clear`    | O(n)   | Does not notify the listener               |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::lifo::LifoCache;
//! use evictkit::store::EvictionLog;
//!
//! let log = EvictionLog::new();
//! let mut cache = LifoCache::new(2).with_listener(log.clone());
//!
//! cache.insert("A", 1);
//! cache.insert("B", 2);
//! cache.insert("C", 3);
//!
//! assert_eq!(log.keys(), vec!["B"]);
//! assert!(cache.contains(&"A"));
//! assert!(cache.contains(&"C"));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; wrap in external synchronization for shared use.

use std::fmt;
use std::hash::Hash;

use crate::config::CacheConfig;
use crate::ds::KeyOrder;
use crate::error::{ConfigError, InvariantError, check_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::store::{CacheStore, EvictionListener};
use crate::traits::CoreCache;

const POLICY: &str = "lifo";

/// Last-in, first-out cache that evicts the entry below the newest put.
pub struct LifoCache<K, V> {
    store: CacheStore<K, V>,
    /// Bottom (oldest put) to top (newest put).
    stack: KeyOrder<K>,
}

impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a LIFO cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a LIFO cache, returning an error on a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            store: CacheStore::new(capacity, POLICY),
            stack: KeyOrder::with_capacity(capacity.saturating_add(1).min(1024)),
        })
    }

    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.max_items)
    }

    pub fn try_with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::try_new(config.max_items)
    }

    /// Reports every eviction to `listener`, replacing any previous one.
    pub fn with_listener(mut self, listener: impl EvictionListener<K, V> + 'static) -> Self {
        self.store.set_listener(Box::new(listener));
        self
    }

    /// Retrieves an item without affecting the stack.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.lookup(key)
    }

    /// Inserts or overwrites a key and moves it to the top of the stack.
    ///
    /// If the cache is now over capacity, the key directly below the top is
    /// evicted.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.stack.push_or_move_back(key.clone());
        let previous = self.store.upsert(key, value);
        self.evict_if_needed();
        previous
    }

    fn evict_if_needed(&mut self) {
        if self.store.is_over_capacity() {
            debug_assert_eq!(
                self.store.len(),
                self.store.capacity() + 1,
                "lifo overflow by more than one entry"
            );
            if let Some(victim) = self.stack.pop_second_newest() {
                self.store.discard(&victim);
            }
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.store.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    #[inline]
    pub fn evictions(&self) -> u64 {
        self.store.evictions()
    }

    /// Returns the most recently put entry.
    pub fn peek_top(&self) -> Option<(&K, &V)> {
        let key = self.stack.newest()?;
        self.store.get(key).map(|value| (key, value))
    }

    /// Iterates entries from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.stack
            .iter()
            .filter_map(|key| self.store.get(key).map(|value| (key, value)))
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&mut self) {
        self.store.clear();
        self.stack.clear();

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Checks that the stack and the table hold exactly the same keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.stack.len() != self.store.len() {
            return Err(InvariantError::new(format!(
                "stack length {} != table length {}",
                self.stack.len(),
                self.store.len()
            )));
        }
        if self.store.len() > self.store.capacity() {
            return Err(InvariantError::new(format!(
                "table length {} exceeds capacity {}",
                self.store.len(),
                self.store.capacity()
            )));
        }
        if self.stack.iter().any(|k| !self.store.contains(k)) {
            return Err(InvariantError::new("stack names a key missing from the table"));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.stack.debug_validate_invariants();
        if let Err(e) = self.check_invariants() {
            panic!("lifo invariant violated: {}", e);
        }
    }
}

impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    /// Renders `Current cache:` followed by sorted `key: item` lines.
    pub fn render_cache(&self) -> String {
        self.store.render()
    }

    pub fn print_cache(&self) {
        print!("{}", self.render_cache());
    }
}

impl<K, V> fmt::Debug for LifoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifoCache")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LifoCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LifoCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LifoCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LifoCache::len(self)
    }

    fn capacity(&self) -> usize {
        LifoCache::capacity(self)
    }

    fn clear(&mut self) {
        LifoCache::clear(self);
    }

    fn evictions(&self) -> u64 {
        LifoCache::evictions(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.store.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}
