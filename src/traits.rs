//! # Cache Traits
//!
//! [`CoreCache`] is the surface every policy shares. Policies whose victim
//! selection is worth inspecting add a small extension trait on top.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │            CoreCache<K, V>              │
//!                  │                                         │
//!                  │  put(&mut, Option<K>, Option<V>)        │
//!                  │  insert(&mut, K, V) → Option<V>         │
//!                  │  get(&mut, &K) → Option<&V>             │
//!                  │  get_opt(&mut, Option<&K>)              │
//!                  │  contains / len / is_empty / capacity   │
//!                  │  clear / evictions                      │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!                ┌────────────────────┴────────────────────┐
//!                ▼                                         ▼
//!   ┌────────────────────────────┐          ┌────────────────────────────┐
//!   │   FifoCacheTrait<K, V>     │          │   LfuCacheTrait<K, V>      │
//!   │                            │          │                            │
//!   │  peek_oldest() → (&K, &V)  │          │  peek_lfu() → (&K, &V)     │
//!   │  age_rank(&K) → usize      │          │  frequency(&K) → u64       │
//!   │                            │          │  min_frequency() → u64     │
//!   └────────────────────────────┘          └────────────────────────────┘
//! ```
//!
//! LIFO and MRU expose their extras (`peek_top`, `peek_mru`, `touch`) as
//! inherent methods.
//!
//! ## Optional Inputs
//!
//! [`put`](CoreCache::put) and [`get_opt`](CoreCache::get_opt) accept
//! `Option` arguments and treat `None` as a silent no-op. They exist for
//! callers whose keys or items may be missing; everything else should use
//! [`insert`](CoreCache::insert) and [`get`](CoreCache::get).
//!
//! ## Thread Safety
//!
//! None of the caches are thread-safe. Wrap one in a `Mutex` for shared use.

/// Core cache operations that all caches support.
///
/// # Example
///
/// ```
/// use evictkit::traits::CoreCache;
/// use evictkit::policy::fifo::FifoCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = FifoCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the insert pushes the cache past its capacity, exactly one entry is
    /// evicted according to the policy, and the eviction listener is told.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lifo::LifoCache;
    ///
    /// let mut cache = LifoCache::new(10);
    ///
    /// // New key returns None
    /// assert_eq!(cache.insert(1, "first"), None);
    ///
    /// // Existing key returns previous value
    /// assert_eq!(cache.insert(1, "second"), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update recency or frequency depending on the policy. A miss never
    /// changes anything. Use [`contains`](Self::contains) to check existence
    /// without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries held once an operation returns.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    ///
    /// Cleared entries are not reported to the eviction listener and do not
    /// count towards [`evictions`](Self::evictions).
    fn clear(&mut self);

    /// Total number of evictions since the cache was created.
    fn evictions(&self) -> u64;

    /// Inserts when both `key` and `item` are present; otherwise does nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(2);
    /// assert_eq!(cache.put(None, Some("x")), None);
    /// assert_eq!(cache.put(Some("A"), None), None);
    /// assert!(cache.is_empty());
    ///
    /// cache.put(Some("A"), Some("x"));
    /// assert_eq!(cache.put(Some("A"), Some("y")), Some("x"));
    /// ```
    fn put(&mut self, key: Option<K>, item: Option<V>) -> Option<V> {
        match (key, item) {
            (Some(key), Some(item)) => self.insert(key, item),
            _ => None,
        }
    }

    /// Looks up an optional key; `None` misses without side effects.
    fn get_opt(&mut self, key: Option<&K>) -> Option<&V> {
        match key {
            Some(key) => self.get(key),
            None => None,
        }
    }
}

/// FIFO-specific inspection.
///
/// FIFO caches offer no arbitrary removal; the only way out is eviction.
pub trait FifoCacheTrait<K, V>: CoreCache<K, V> {
    /// Returns the entry that would be evicted next.
    fn peek_oldest(&self) -> Option<(&K, &V)>;

    /// Position of `key` in insertion order, `0` being the oldest.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::{CoreCache, FifoCacheTrait};
    /// use evictkit::policy::fifo::FifoCache;
    ///
    /// let mut cache = FifoCache::new(3);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    ///
    /// assert_eq!(cache.age_rank(&"a"), Some(0));
    /// assert_eq!(cache.age_rank(&"b"), Some(1));
    /// assert_eq!(cache.age_rank(&"z"), None);
    /// ```
    fn age_rank(&self, key: &K) -> Option<usize>;
}

/// LFU-specific inspection.
///
/// # Example
///
/// ```
/// use evictkit::traits::{CoreCache, LfuCacheTrait};
/// use evictkit::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
///
/// // Access key 2 to increase its frequency
/// cache.get(&2);
///
/// assert_eq!(cache.frequency(&2), Some(2));
/// assert_eq!(cache.min_frequency(), Some(1));
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
/// ```
pub trait LfuCacheTrait<K, V>: CoreCache<K, V> {
    /// Returns the entry that would be evicted next, without touching it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count of `key`, or `None` if absent.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Smallest frequency in the cache, or `None` when empty.
    fn min_frequency(&self) -> Option<u64>;
}
