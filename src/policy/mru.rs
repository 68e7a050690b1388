//! MRU (Most Recently Used) cache replacement policy.
//!
//! Every put and every successful `get` moves a key to the most-recent end.
//! When a put overflows the cache, the victim is the most recently used key
//! *other than* the one just put. That is the key directly before the
//! most-recent end.
//!
//! ## Architecture
//!
//! ```text
//!   store: CacheStore<K, V>      recency: KeyOrder<K>
//!
//!   least recent ─► [A] ◄──► [B] ◄──► [C] ◄── most recent
//!                             ▲        ▲
//!                           EVICT    just put
//! ```
//!
//! | Operation  | Time   | Notes                                   |
//! |------------|--------|-----------------------------------------|
//! | `get`      | O(1)   | Hit moves the key to the recent end     |
//! | `insert`   | O(1)   | At most one eviction                    |
//! | `touch`    | O(1)   | Like a hit, without returning the item  |
//! | `peek_mru` | O(1)   | No reordering                           |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::mru::MruCache;
//! use evictkit::store::EvictionLog;
//!
//! let log = EvictionLog::new();
//! let mut cache = MruCache::new(2).with_listener(log.clone());
//!
//! cache.insert("A", 1);
//! cache.insert("B", 2);
//! cache.get(&"A");
//! cache.insert("C", 3);
//!
//! assert_eq!(log.keys(), vec!["A"]);
//! ```

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

const POLICY: &str = "mru";

/// Most-recently-used cache.
pub struct MruCache<K, V> {
    store: CacheStore<K, V>,
    recency: KeyOrder<K>,
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an MRU cache holding at most `capacity` entries.
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

    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            store: CacheStore::new(capacity, POLICY),
            recency: KeyOrder::with_capacity(capacity.saturating_add(1).min(1024)),
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

    /// Retrieves an item; a hit makes the key the most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.recency.move_to_back(key) {
            #[cfg(debug_assertions)]
            self.validate_invariants();
        }
        self.store.lookup(key)
    }

    /// Marks `key` as most recently used; returns `false` if it is absent.
    pub fn touch(&mut self, key: &K) -> bool {
        self.recency.move_to_back(key)
    }

    /// Inserts or overwrites a key and marks it most recently used.
    ///
    /// If the cache is now over capacity, the key used just before this one
    /// is evicted.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.recency.push_or_move_back(key.clone());
        let previous = self.store.upsert(key, value);
        self.evict_if_needed();
        previous
    }

    fn evict_if_needed(&mut self) {
        if self.store.is_over_capacity() {
            debug_assert_eq!(
                self.store.len(),
                self.store.capacity() + 1,
                "mru overflow by more than one entry"
            );
            if let Some(victim) = self.recency.pop_second_newest() {
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

    /// Returns the most recently used entry without reordering.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let key = self.recency.newest()?;
        self.store.get(key).map(|value| (key, value))
    }

    /// Iterates entries from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.recency
            .iter()
            .filter_map(|key| self.store.get(key).map(|value| (key, value)))
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&mut self) {
        self.store.clear();
        self.recency.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.recency.len() != self.store.len() {
            return Err(InvariantError::new(format!(
                "recency length {} != table length {}",
                self.recency.len(),
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
        if self.recency.iter().any(|k| !self.store.contains(k)) {
            return Err(InvariantError::new(
                "recency list names a key missing from the table",
            ));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        self.recency.debug_validate_invariants();
        if let Err(e) = self.check_invariants() {
            panic!("mru invariant violated: {}", e);
        }
    }
}

impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    pub fn render_cache(&self) -> String {
        self.store.render()
    }

    pub fn print_cache(&self) {
        print!("{}", self.render_cache());
    }
}

impl<K, V> fmt::Debug for MruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MruCache")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<K, V> CoreCache<K, V> for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        MruCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        MruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        MruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        MruCache::len(self)
    }

    fn capacity(&self) -> usize {
        MruCache::capacity(self)
    }

    fn clear(&mut self) {
        MruCache::clear(self);
    }

    fn evictions(&self) -> u64 {
        MruCache::evictions(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.store.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for MruCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}
