//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the fewest uses. Among entries with equally few uses
//! it evicts the one used longest ago. Every operation is O(1): frequencies
//! live in [`FrequencyBuckets`], a linked chain of recency-ordered buckets
//! with a `min_freq` pointer.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  FrequencyBuckets<K>                                               │ │
//!   │   │                                                                    │ │
//!   │   │  min_freq = 1                                                      │ │
//!   │   │  freq=1: head ──► [C] ◄──► [B] ◄── tail  (B evicted first)         │ │
//!   │   │  freq=3: head ──► [A] ◄── tail                                     │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  CacheStore<K, V> (items live here)                                │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LFU vs LRU Comparison
//!
//! ```text
//!   Access pattern: A, B, A, C, A, D, A, E, A, F  (A accessed 5 times, others 1 each)
//!   Cache capacity: 3
//!
//!   LFU (frequency-based):
//!   ═══════════════════════════════════════════════════════════════════════════
//!     After A,B,A,C: {A:2, B:1, C:1}
//!     Insert D:      {A:2, C:1, D:1}  ← B evicted (freq=1, used before C)
//!     Insert E:      {A:3, D:1, E:1}  ← C evicted
//!     Insert F:      {A:5, E:1, F:1}  ← D evicted
//!
//!   A (hot item) is never at risk.
//! ```
//!
//! ## Eviction Flow
//!
//! ```text
//!   insert(new key) with len == capacity:
//!     1. pop_min(): tail of the min_freq bucket
//!     2. Discard it from the store, notify the listener
//!     3. Insert the new key at freq=1 (min_freq becomes 1)
//!
//!   insert(existing key) / get(hit):
//!     1. freq += 1, key moves to the head of bucket freq+1
//!     2. If its old bucket empties and was min_freq, min_freq advances
//! ```
//!
//! ## Example
//!
//! ```
//! use evictkit::policy::lfu::LfuCache;
//! use evictkit::store::EvictionLog;
//!
//! let log = EvictionLog::new();
//! let mut cache = LfuCache::new(2).with_listener(log.clone());
//!
//! cache.insert("A", 1);
//! cache.insert("B", 2);
//! cache.get(&"A");
//! cache.insert("C", 3);
//!
//! assert_eq!(log.keys(), vec!["B"]);
//! assert_eq!(cache.frequency(&"A"), Some(2));
//! assert_eq!(cache.frequency(&"C"), Some(1));
//! ```

use std::fmt;
use std::hash::Hash;

use crate::config::CacheConfig;
use crate::ds::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError, check_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::store::{CacheStore, EvictionListener};
use crate::traits::{CoreCache, LfuCacheTrait};

const POLICY: &str = "lfu";

/// Least-frequently-used cache with least-recently-used tie-break.
pub struct LfuCache<K, V> {
    store: CacheStore<K, V>,
    buckets: FrequencyBuckets<K>,
}

impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates an LFU cache holding at most `capacity` entries.
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

    /// Creates an LFU cache, returning an error on a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        check_capacity(capacity)?;
        Ok(Self {
            store: CacheStore::new(capacity, POLICY),
            buckets: FrequencyBuckets::with_capacity(capacity.min(1024)),
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

    /// Retrieves an item; a hit counts as one more use.
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(4);
    /// cache.insert(1, "one");
    /// assert_eq!(cache.get(&1), Some(&"one"));
    /// assert_eq!(cache.frequency(&1), Some(2));
    ///
    /// // A miss changes nothing.
    /// assert_eq!(cache.get(&2), None);
    /// assert_eq!(cache.min_frequency(), Some(2));
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.buckets.touch(key).is_some() {
            #[cfg(debug_assertions)]
            self.validate_invariants();
        }
        self.store.lookup(key)
    }

    /// Inserts or overwrites a key, returning the previous item.
    ///
    /// Overwriting counts as a use. A new key arriving at a full cache first
    /// evicts the least frequently used entry, then starts at frequency 1.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.store.contains(&key) {
            self.buckets.touch(&key);
            let previous = self.store.replace(&key, value);

            #[cfg(debug_assertions)]
            self.validate_invariants();
            return previous;
        }

        self.evict_if_needed();
        self.buckets.insert(key.clone());
        self.store.upsert(key, value);

        #[cfg(debug_assertions)]
        self.validate_invariants();
        None
    }

    /// Makes room for one new key.
    fn evict_if_needed(&mut self) {
        if !self.store.is_full() {
            return;
        }
        if let Some((victim, freq)) = self.buckets.pop_min() {
            tracing::trace!(freq, "lfu victim selected");
            self.store.discard(&victim);
        }
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

    /// Use count of `key`: 1 on insert, plus one per overwrite or hit.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }

    /// Smallest use count in the cache, or `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }

    /// Returns the entry that would be evicted next, without touching it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        let (key, _) = self.buckets.peek_min()?;
        self.store.get(key).map(|value| (key, value))
    }

    /// Iterates entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.store.iter()
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&mut self) {
        self.store.clear();
        self.buckets.clear();
    }

    /// Checks the bucket structure and its agreement with the table.
    ///
    /// ```
    /// use evictkit::policy::lfu::LfuCache;
    ///
    /// let mut cache = LfuCache::new(2);
    /// cache.insert("a", 1);
    /// cache.insert("b", 2);
    /// cache.get(&"a");
    /// assert!(cache.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.buckets.check_invariants()?;
        if self.buckets.len() != self.store.len() {
            return Err(InvariantError::new(format!(
                "bucket entries {} != table length {}",
                self.buckets.len(),
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
        if self.store.iter().any(|(k, _)| !self.buckets.contains(k)) {
            return Err(InvariantError::new("table key has no frequency entry"));
        }
        Ok(())
    }

    #[cfg(debug_assertions)]
    fn validate_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("lfu invariant violated: {}", e);
        }
    }
}

impl<K, V> LfuCache<K, V>
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

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("store", &self.store)
            .field("min_freq", &self.buckets.min_freq())
            .finish()
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        LfuCache::insert(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self);
    }

    fn evictions(&self) -> u64 {
        LfuCache::evictions(self)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }

    fn min_frequency(&self) -> Option<u64> {
        LfuCache::min_frequency(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Returns a snapshot of cache metrics.
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.store.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
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
            let cache: LfuCache<u32, u32> = LfuCache::new(5);
            assert!(cache.is_empty());
            assert_eq!(cache.capacity(), 5);
            assert_eq!(cache.min_frequency(), None);
            assert_eq!(cache.peek_lfu(), None);
        }

        #[test]
        fn insert_starts_at_frequency_one() {
            let mut cache = LfuCache::new(5);
            cache.insert("a", 1);
            assert_eq!(cache.frequency(&"a"), Some(1));
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn overwrite_counts_as_use() {
            let mut cache = LfuCache::new(5);
            cache.insert("a", 1);
            assert_eq!(cache.insert("a", 2), Some(1));
            assert_eq!(cache.frequency(&"a"), Some(2));
            assert_eq!(cache.get(&"a"), Some(&2));
            assert_eq!(cache.frequency(&"a"), Some(3));
        }

        #[test]
        fn contains_does_not_count() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            assert!(cache.contains(&"a"));
            assert!(cache.contains(&"a"));
            assert_eq!(cache.frequency(&"a"), Some(1));
        }

        #[test]
        fn clear_resets_frequencies() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            cache.get(&"a");
            cache.clear();

            assert!(cache.is_empty());
            assert_eq!(cache.frequency(&"a"), None);
            assert_eq!(cache.min_frequency(), None);
            cache.insert("a", 1);
            assert_eq!(cache.frequency(&"a"), Some(1));
        }
    }

    // ==============================================
    // Eviction Behavior
    // ==============================================

    mod eviction_behavior {
        use super::*;

        #[test]
        fn evicts_least_frequent() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(2).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.get(&"A");
            cache.get(&"A");
            cache.insert("C", 3);

            assert_eq!(log.keys(), vec!["B"]);
            assert!(cache.contains(&"A"));
            assert!(cache.contains(&"C"));
        }

        #[test]
        fn tie_break_evicts_least_recent() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(3).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.insert("C", 3);
            cache.insert("D", 4);

            assert_eq!(log.keys(), vec!["A"]);
        }

        #[test]
        fn tie_break_among_raised_keys() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(2).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.get(&"B");
            cache.get(&"A");
            // Both at freq 2; B reached it first.
            cache.insert("C", 3);

            assert_eq!(log.keys(), vec!["B"]);
            assert_eq!(cache.min_frequency(), Some(1));
        }

        #[test]
        fn newcomer_is_evicted_before_older_hot_keys() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(2).with_listener(log.clone());
            cache.insert(1, ());
            cache.get(&1);
            cache.insert(2, ());
            cache.get(&2);
            cache.insert(3, ());
            cache.insert(4, ());

            assert_eq!(log.keys(), vec![1, 3]);
        }

        #[test]
        fn overwrite_at_capacity_does_not_evict() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(2).with_listener(log.clone());
            cache.insert("A", 1);
            cache.insert("B", 2);
            cache.insert("B", 3);

            assert!(log.is_empty());
            assert_eq!(cache.peek_lfu(), Some((&"A", &1)));
        }

        #[test]
        fn min_frequency_advances_when_bucket_empties() {
            let mut cache = LfuCache::new(3);
            cache.insert("a", ());
            cache.insert("b", ());
            cache.get(&"a");
            assert_eq!(cache.min_frequency(), Some(1));
            cache.get(&"b");
            assert_eq!(cache.min_frequency(), Some(2));
            cache.get(&"b");
            assert_eq!(cache.min_frequency(), Some(2));
            assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some("a"));
        }
    }

    // ==============================================
    // Edge Cases
    // ==============================================

    mod edge_cases {
        use super::*;

        #[test]
        fn single_capacity_cache() {
            let log = EvictionLog::new();
            let mut cache = LfuCache::new(1).with_listener(log.clone());
            cache.insert("a", 1);
            cache.get(&"a");
            cache.get(&"a");
            cache.insert("b", 2);

            assert_eq!(log.keys(), vec!["a"]);
            assert_eq!(cache.frequency(&"b"), Some(1));
        }

        #[test]
        fn zero_capacity_is_rejected() {
            assert!(LfuCache::<u8, u8>::try_new(0).is_err());
            assert!(LfuCache::<u8, u8>::try_with_config(&CacheConfig { max_items: 0 }).is_err());
        }

        #[test]
        fn miss_and_none_key_do_not_mutate() {
            let mut cache = LfuCache::new(2);
            cache.insert("a", 1);
            assert_eq!(cache.get(&"zz"), None);
            assert_eq!(cache.get_opt(None), None);
            cache.put(None, Some(9));
            cache.put(Some("b"), None);

            assert_eq!(cache.len(), 1);
            assert_eq!(cache.frequency(&"a"), Some(1));
            assert_eq!(cache.evictions(), 0);
        }

        #[test]
        fn render_cache_lists_sorted() {
            let mut cache = LfuCache::new(3);
            cache.insert(3, "c");
            cache.insert(1, "a");
            assert_eq!(cache.render_cache(), "Current cache:\n1: a\n3: c\n");
        }
    }

    // ==============================================
    // Property Tests
    // ==============================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashMap;

        #[derive(Debug, Clone)]
        enum Op {
            Put(Option<u8>, Option<u8>),
            Get(u8),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            let key = prop::option::weighted(0.85, 0u8..12);
            let item = prop::option::weighted(0.85, any::<u8>());
            prop_oneof![
                (key, item).prop_map(|(k, v)| Op::Put(k, v)),
                (0u8..12).prop_map(Op::Get),
            ]
        }

        /// Naive O(n) LFU: key → (freq, last use tick).
        #[derive(Default)]
        struct Model {
            entries: HashMap<u8, (u64, u64)>,
            tick: u64,
        }

        impl Model {
            fn use_key(&mut self, key: u8) {
                self.tick += 1;
                let tick = self.tick;
                let entry = self.entries.entry(key).or_insert((0, 0));
                entry.0 += 1;
                entry.1 = tick;
            }

            fn victim(&self) -> Option<u8> {
                self.entries
                    .iter()
                    .min_by_key(|(_, entry)| **entry)
                    .map(|(&k, _)| k)
            }
        }

        proptest! {
            /// The cache evicts exactly what the naive model evicts.
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_matches_reference_model(
                capacity in 1usize..6,
                ops in prop::collection::vec(op_strategy(), 0..200)
            ) {
                let log = EvictionLog::new();
                let mut cache = LfuCache::new(capacity).with_listener(log.clone());
                let mut model = Model::default();
                let mut expected = Vec::new();

                for op in ops {
                    match op {
                        Op::Put(Some(key), Some(item)) => {
                            let is_new = !model.entries.contains_key(&key);
                            if is_new && model.entries.len() == capacity {
                                if let Some(victim) = model.victim() {
                                    model.entries.remove(&victim);
                                    expected.push(victim);
                                }
                            }
                            model.use_key(key);
                            cache.put(Some(key), Some(item));
                        }
                        Op::Put(key, item) => {
                            // A missing key or item leaves the model untouched.
                            prop_assert_eq!(cache.put(key, item), None);
                        }
                        Op::Get(key) => {
                            let hit = model.entries.contains_key(&key);
                            if hit {
                                model.use_key(key);
                            }
                            prop_assert_eq!(cache.get(&key).is_some(), hit);
                        }
                    }
                    prop_assert!(cache.len() <= capacity);
                    prop_assert!(cache.check_invariants().is_ok());
                }

                prop_assert_eq!(log.keys(), expected);
                for (key, (freq, _)) in &model.entries {
                    prop_assert_eq!(cache.frequency(key), Some(*freq));
                }
            }
        }
    }
}
