//! FIFO (First In, First Out) cache replacement policy.
//!
//! Evicts the entry that was inserted earliest. Overwriting an existing key
//! replaces its item but keeps its place in line; lookups never reorder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FifoCache<K, V> Layout                               │
//! │                                                                             │
//! │   ┌─────────────────────────────────────────────────────────────────────┐   │
//! │   │  store: CacheStore<K, V>          queue: VecDeque<K>                │   │
//! │   │       key → item                        insertion order             │   │
//! │   │                                                                     │   │
//! │   │  ┌──────────┬──────┐          ┌─────────────────────────┐           │   │
//! │   │  │   Key    │ Item │          │ Front          Back     │           │   │
//! │   │  ├──────────┼──────┤          ├─────────────────────────┤           │   │
//! │   │  │   "A"    │  v1  │          │ [A]  [B]  [C]           │           │   │
//! │   │  │   "B"    │  v2  │          │  ↑              ↑       │           │   │
//! │   │  │   "C"    │  v3  │          │ EVICT         newest    │           │   │
//! │   │  └──────────┴──────┘          └─────────────────────────┘           │   │
//! │   └─────────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Insert Flow (new key)
//! ──────────────────────
//!
//!   insert("D", v4):
//!     1. Push "D" to the back of the queue
//!     2. Store (D, v4)
//!     3. Over capacity? pop the front ("A") and discard it
//!
//! Insert Flow (existing key)
//! ──────────────────────────
//!
//!   insert("B", v5):
//!     1. Replace the item in place
//!     2. Queue untouched: "B" keeps its age
//! ```
//!
//! ## Operations
//!
//! | Operation     | Time   | Notes                                  |
//! |---------------|--------|----------------------------------------|
//! | `get`         | O(1)   | Pure lookup, no reordering             |
//! | `insert`      | O(1)   | At most one eviction                   |
//! | `contains`    | O(1)   | Table lookup only                      |
//! | `peek_oldest` | O(1)   | Front of the queue                     |
//! | `age_rank`    | O(n)   | Linear scan of the queue               |
//! | `clear`       | O(n)   | Does not notify the listener           |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::policy::fifo::FifoCache;
//! use evictkit::store::EvictionLog;
//!
//! let log = EvictionLog::new();
//! let mut cache = FifoCache::new(2).with_listener(log.clone());
//!
//! cache.insert("A", 1);
//! cache.insert("B", 2);
//! cache.get(&"A"); // does not save "A"
//! cache.insert("C", 3);
//!
//! assert_eq!(log.keys(), vec!["A"]);
//! assert!(cache.contains(&"B"));
//! assert!(cache.contains(&"C"));
//! ```
//!
//! ## Thread Safety
//!
//! - [`FifoCache`]: Not thread-safe, designed for single-threaded use
//! - For concurrent access, wrap in external synchronization

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use crate::config::CacheConfig;
use crate::error::{ConfigError, InvariantError, check_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::store::{CacheStore, EvictionListener};
use crate::traits::{CoreCache, FifoCacheTrait};

const POLICY: &str = "fifo";

/// First-in, first-out cache.
///
/// # Example
///
/// ```
/// use evictkit::policy::fifo::FifoCache;
///
/// let mut cache = FifoCache::new(100);
/// cache.insert("key1", "value1");
/// assert!(cache.contains(&"key1"));
///
/// // Update existing key
/// cache.insert("key1", "new_value");
/// assert_eq!(cache.get(&"key1"), Some(&"new_value"));
/// ```
pub struct FifoCache<K, V> {
    store: CacheStore<K, V>,
    /// Keys oldest-first; always the same set as the store's keys.
    queue: VecDeque<K>,
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a FIFO cache holding at most `capacity` entries.
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

    /// Creates a FIFO cache, returning an error on a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            store: CacheStore::new(capacity, POLICY),
            queue: VecDeque::with_capacity(capacity.saturating_add(1).min(1024)),
        })
    }

    /// Creates a FIFO cache bounded by `config.max_items`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.max_items)
    }

    /// Creates a FIFO cache from a configuration, returning an error if it is
    /// invalid.
    pub fn try_with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::try_new(config.max_items)
    }

    /// Reports every eviction to `listener`, replacing any previous one.
    pub fn with_listener(mut self, listener: impl EvictionListener<K, V> + 'static) -> Self {
        self.store.set_listener(Box::new(listener));
        self
    }

    /// Retrieves an item without affecting eviction order.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.store.lookup(key)
    }

    /// Inserts or overwrites a key, returning the previous item.
    ///
    /// A new key joins the back of the queue. If that pushes the cache over
    /// capacity, the front of the queue is evicted. An existing key keeps
    /// its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            let previous = self.store.replace(&key, value);

            #[cfg(debug_assertions)]
            self.validate_invariants();
            return previous;
        }

        self.queue.push_back(key.clone());
        self.store.upsert(key, value);
        self.evict_if_needed();
        None
    }

    fn evict_if_needed(&mut self) {
        if self.store.is_over_capacity() {
            if let Some(victim) = self.queue.pop_front() {
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

    /// Total number of evictions since creation.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.store.evictions()
    }

    /// Returns the entry that would be evicted next.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        let key = self.queue.front()?;
        self.store.get(key).map(|value| (key, value))
    }

    /// Position of `key` in insertion order, `0` being the oldest.
    pub fn age_rank(&self, key: &K) -> Option<usize> {
        self.queue.iter().position(|k| k == key)
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.queue
            .iter()
            .filter_map(|key| self.store.get(key).map(|value| (key, value)))
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&mut self) {
        self.store.clear();
        self.queue.clear();

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Checks that the queue and the table hold exactly the same keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.queue.len() != self.store.len() {
            return Err(InvariantError::new(format!(
                "queue length {} != table length {}",
                self.queue.len(),
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
        if let Some(pos) = self.queue.iter().position(|k| !self.store.contains(k)) {
            return Err(InvariantError::new(format!(
                "queue position {pos} names a key missing from the table"
            )));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("fifo invariant violated: {}", e);
        }
    }
}

impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    /// Renders `Current cache:` followed by sorted `key: item` lines.
    pub fn render_cache(&self) -> String {
        self.store.render()
    }

    /// Prints [`render_cache`](Self::render_cache) to standard output.
    pub fn print_cache(&self) {
        print!("{}", self.render_cache());
    }
}

impl<K, V> fmt::Debug for FifoCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FifoCache")
            .field("store", &self.store)
            .field("queue_len", &self.queue.len())
            .finish()
    }
}

impl<K, V> CoreCache<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        FifoCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        FifoCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        FifoCache::contains(self, key)
    }

    fn len(&self) -> usize {
        FifoCache::len(self)
    }

    fn capacity(&self) -> usize {
        FifoCache::capacity(self)
    }

    fn clear(&mut self) {
        FifoCache::clear(self);
    }

    fn evictions(&self) -> u64 {
        FifoCache::evictions(self)
    }
}

impl<K, V> FifoCacheTrait<K, V> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn peek_oldest(&self) -> Option<(&K, &V)> {
        FifoCache::peek_oldest(self)
    }

    fn age_rank(&self, key: &K) -> Option<usize> {
        FifoCache::age_rank(self, key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.store.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EvictionLog;

    // ==============================================
    // Basic Operations
    // ==============================================

    mod basic_operations {
        use super::*;

        #[test]
        fn new_cache_is_empty() {
            let cache: FifoCache<&str, i32> = FifoCache::new(3);
            assert!(cache.is_empty());
            assert_eq!(cache.len(), 0);
            assert_eq!(cache.capacity(), 3);
            assert_eq!(cache.evictions(), 0);
        }

        #[test]
        fn insert_and_get() {
            let mut cache = FifoCache::new(3);
            cache.insert("A", "Hello");
            assert_eq!(cache.get(&"A"), Some(&"Hello"));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn update_existing_key() {
            let mut cache = FifoCache::new(3);
            assert_eq!(cache.insert("A", 1), None);
            assert_eq!(cache.insert("A", 2), Some(1));
            assert_eq!(cache.get(&"A"), Some(&2));
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn get_missing_key_returns_none() {
            let mut cache = FifoCache::new(2);
            cache.insert(1, 10);
            assert_eq!(cache.get(&2), None);
            assert_eq!(cache.len(), 1);
        }

        #[test]
        fn clear_removes_all_entries_without_notifying() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(2).with_listener(log.clone());
            cache.insert("a", 1);
            cache.insert("b", 2);
            cache.clear();

            assert!(cache.is_empty());
            assert!(log.is_empty());
            assert_eq!(cache.peek_oldest(), None);
        }

        #[test]
        fn with_config_uses_max_items() {
            let config = CacheConfig::new(7).unwrap();
            let cache: FifoCache<u8, u8> = FifoCache::with_config(&config);
            assert_eq!(cache.capacity(), 7);
        }
    }

    // ==============================================
    // FIFO Behavior
    // ==============================================

    mod fifo_behavior {
        use super::*;

        #[test]
        fn evicts_oldest_insertion() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(2).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.insert("C", 3);

            assert_eq!(log.keys(), vec!["A"]);
            assert!(!cache.contains(&"A"));
            assert!(cache.contains(&"B"));
            assert!(cache.contains(&"C"));
            assert_eq!(cache.evictions(), 1);
        }

        #[test]
        fn overwrite_keeps_age() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(2).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.insert("A", 10);
            cache.insert("C", 3);

            assert_eq!(log.keys(), vec!["A"]);
            assert_eq!(cache.get(&"B"), Some(&2));
        }

        #[test]
        fn get_does_not_change_eviction_order() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(3).with_listener(log.clone());
            cache.insert(1, "a");
            cache.insert(2, "b");
            cache.insert(3, "c");

            for _ in 0..5 {
                assert_eq!(cache.get(&1), Some(&"a"));
            }
            cache.insert(4, "d");

            assert_eq!(log.keys(), vec![1]);
        }

        #[test]
        fn continuous_insertions_evict_in_order() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(3).with_listener(log.clone());
            for i in 0..10 {
                cache.insert(i, i * 10);
            }

            assert_eq!(log.keys(), (0..7).collect::<Vec<_>>());
            assert_eq!(cache.len(), 3);
            assert_eq!(cache.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![7, 8, 9]);
        }

        #[test]
        fn peek_and_age_rank_follow_queue() {
            let mut cache = FifoCache::new(3);
            cache.insert("x", 1);
            cache.insert("y", 2);
            cache.insert("z", 3);

            assert_eq!(cache.peek_oldest(), Some((&"x", &1)));
            assert_eq!(cache.age_rank(&"x"), Some(0));
            assert_eq!(cache.age_rank(&"z"), Some(2));
            assert_eq!(cache.age_rank(&"w"), None);

            cache.insert("w", 4);
            assert_eq!(cache.peek_oldest(), Some((&"y", &2)));
            assert_eq!(cache.age_rank(&"w"), Some(2));
        }
    }

    // ==============================================
    // Optional Inputs
    // ==============================================

    mod optional_inputs {
        use super::*;

        #[test]
        fn put_with_missing_parts_is_a_no_op() {
            let log = EvictionLog::new();
            let mut cache = FifoCache::new(1).with_listener(log.clone());
            cache.put(Some("A"), Some(1));

            assert_eq!(cache.put(None, Some(2)), None);
            assert_eq!(cache.put(Some("B"), None), None);
            assert_eq!(cache.len(), 1);
            assert!(log.is_empty());
        }

        #[test]
        fn get_opt_none_misses() {
            let mut cache = FifoCache::new(1);
            cache.insert("A", 1);
            assert_eq!(CoreCache::get_opt(&mut cache, None), None);
            assert_eq!(CoreCache::get_opt(&mut cache, Some(&"A")), Some(&1));
        }
    }

    // ==============================================
    // Edge Cases
    // ==============================================

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_cache() {
            let mut cache = FifoCache::new(1);
            cache.insert("a", 1);
            cache.insert("b", 2);
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&"b"), Some(&2));
            assert_eq!(cache.evictions(), 1);
        }

        #[test]
        fn zero_capacity_is_rejected() {
            assert!(FifoCache::<u8, u8>::try_new(0).is_err());
            assert!(FifoCache::<u8, u8>::try_with_config(&CacheConfig { max_items: 0 }).is_err());
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn new_panics_on_zero_capacity() {
            let _ = FifoCache::<u8, u8>::new(0);
        }

        #[test]
        fn render_cache_sorts_keys() {
            let mut cache = FifoCache::new(4);
            cache.insert("B", "World");
            cache.insert("A", "Hello");
            assert_eq!(cache.render_cache(), "Current cache:\nA: Hello\nB: World\n");
        }

        #[test]
        fn render_empty_cache() {
            let cache: FifoCache<u8, u8> = FifoCache::new(2);
            assert_eq!(cache.render_cache(), "Current cache:\n");
        }
    }

    #[test]
    fn validate_invariants_after_operations() {
        let mut cache = FifoCache::new(5);
        for i in 0..20 {
            cache.insert(i % 8, i);
            cache.check_invariants().unwrap();
        }
        cache.clear();
        cache.check_invariants().unwrap();
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// len() never exceeds capacity and every overflow evicts exactly once.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_one_eviction_per_overflow(
                capacity in 1usize..16,
                ops in prop::collection::vec((0u8..32, any::<u16>()), 0..200)
            ) {
                let log = EvictionLog::new();
                let mut cache = FifoCache::new(capacity).with_listener(log.clone());
                for (key, value) in ops {
                    let was_new = !cache.contains(&key);
                    let was_full = cache.len() == capacity;
                    let before = log.len();
                    cache.insert(key, value);

                    let expected = usize::from(was_new && was_full);
                    prop_assert_eq!(log.len() - before, expected);
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }
                prop_assert_eq!(cache.evictions(), log.len() as u64);
            }

            /// Victims leave in the order their keys first arrived.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_evicts_in_arrival_order(
                capacity in 1usize..8,
                keys in prop::collection::vec(0u8..16, 0..100)
            ) {
                let log = EvictionLog::new();
                let mut cache = FifoCache::new(capacity).with_listener(log.clone());
                let mut model: VecDeque<u8> = VecDeque::new();
                let mut expected = Vec::new();
                for key in keys {
                    if !model.contains(&key) {
                        model.push_back(key);
                        if model.len() > capacity {
                            expected.extend(model.pop_front());
                        }
                    }
                    cache.insert(key, ());
                }
                prop_assert_eq!(log.keys(), expected);
            }
        }
    }
}
