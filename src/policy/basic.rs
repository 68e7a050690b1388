//! Unbounded cache with no eviction.
//!
//! Shares the `put`/`get` contract of the bounded policies, including the
//! silent handling of missing keys and items, but never discards anything.
//! [`capacity`](BasicCache::capacity) reports `usize::MAX`.
//!
//! ```
//! use evictkit::policy::basic::BasicCache;
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = BasicCache::new();
//! for i in 0..100 {
//!     cache.put(Some(i), Some(i * 2));
//! }
//! assert_eq!(cache.len(), 100);
//! assert_eq!(cache.evictions(), 0);
//! ```

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::store::CacheStore;
use crate::traits::CoreCache;

const POLICY: &str = "basic";

/// Plain key → item map behind the cache interface.
pub struct BasicCache<K, V> {
    store: CacheStore<K, V>,
}

impl<K, V> BasicCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            store: CacheStore::new(usize::MAX, POLICY),
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.lookup(key)
    }

    /// Inserts or overwrites a key, returning the previous item.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.store.upsert(key, value)
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

    /// Always 0: the table is unbounded.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.store.evictions()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<K, V> BasicCache<K, V>
where
    K: Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    pub fn render_cache(&self) -> String {
        self.store.render()
    }

    pub fn print_cache(&self) {
        print!("{}", self.render_cache());
    }
}

impl<K, V> Default for BasicCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for BasicCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCache")
            .field("store", &self.store)
            .finish()
    }
}

impl<K, V> CoreCache<K, V> for BasicCache<K, V>
where
    K: Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BasicCache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        BasicCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        BasicCache::contains(self, key)
    }

    fn len(&self) -> usize {
        BasicCache::len(self)
    }

    fn capacity(&self) -> usize {
        BasicCache::capacity(self)
    }

    fn clear(&mut self) {
        BasicCache::clear(self);
    }

    fn evictions(&self) -> u64 {
        BasicCache::evictions(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BasicCache<K, V>
where
    K: Eq + Hash,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.store.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for BasicCache<K, V>
where
    K: Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}
