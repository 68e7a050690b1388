//! Unified cache builder for all eviction policies.
//!
//! Picks a policy at runtime and hides which concrete cache sits behind the
//! returned [`Cache`].
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::store::EvictionLog;
//!
//! let log = EvictionLog::new();
//! let mut cache = CacheBuilder::new(2)
//!     .listener(log.clone())
//!     .build::<u64, String>(CachePolicy::Fifo);
//!
//! cache.insert(1, "one".to_string());
//! cache.insert(2, "two".to_string());
//! cache.insert(3, "three".to_string());
//!
//! assert_eq!(log.keys(), vec![1]);
//! assert_eq!(cache.get(&3), Some(&"three".to_string()));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::config::CacheConfig;
use crate::error::{ConfigError, check_capacity};
use crate::policy::basic::BasicCache;
use crate::policy::fifo::FifoCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lifo::LifoCache;
use crate::policy::mru::MruCache;
use crate::store::EvictionListener;
use crate::traits::CoreCache;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// No eviction; capacity is ignored.
    Basic,
    /// First In, First Out eviction.
    Fifo,
    /// Last In, First Out eviction (victim is the entry below the newcomer).
    Lifo,
    /// Most Recently Used eviction.
    Mru,
    /// Least Frequently Used eviction, least recently used on ties.
    Lfu,
}

impl CachePolicy {
    /// Every policy, in declaration order.
    pub const ALL: [CachePolicy; 5] = [
        CachePolicy::Basic,
        CachePolicy::Fifo,
        CachePolicy::Lifo,
        CachePolicy::Mru,
        CachePolicy::Lfu,
    ];

    /// Lowercase name, as used in log events.
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Basic => "basic",
            CachePolicy::Fifo => "fifo",
            CachePolicy::Lifo => "lifo",
            CachePolicy::Mru => "mru",
            CachePolicy::Lfu => "lfu",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Parses a policy name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::new(format!("unknown cache policy {s:?}")))
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

enum CacheInner<K, V> {
    Basic(BasicCache<K, V>),
    Fifo(FifoCache<K, V>),
    Lifo(LifoCache<K, V>),
    Mru(MruCache<K, V>),
    Lfu(LfuCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Policy backing this cache.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Basic(_) => CachePolicy::Basic,
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lifo(_) => CachePolicy::Lifo,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
        }
    }

    /// Insert a key-value pair, returning the previous value if present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Basic(basic) => basic.insert(key, value),
            CacheInner::Fifo(fifo) => fifo.insert(key, value),
            CacheInner::Lifo(lifo) => lifo.insert(key, value),
            CacheInner::Mru(mru) => mru.insert(key, value),
            CacheInner::Lfu(lfu) => lfu.insert(key, value),
        }
    }

    /// Get a reference to a value, updating recency or frequency as the
    /// policy requires.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Basic(basic) => basic.get(key),
            CacheInner::Fifo(fifo) => fifo.get(key),
            CacheInner::Lifo(lifo) => lifo.get(key),
            CacheInner::Mru(mru) => mru.get(key),
            CacheInner::Lfu(lfu) => lfu.get(key),
        }
    }

    /// Check if a key exists without updating access state.
    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Basic(basic) => basic.contains(key),
            CacheInner::Fifo(fifo) => fifo.contains(key),
            CacheInner::Lifo(lifo) => lifo.contains(key),
            CacheInner::Mru(mru) => mru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Basic(basic) => basic.len(),
            CacheInner::Fifo(fifo) => fifo.len(),
            CacheInner::Lifo(lifo) => lifo.len(),
            CacheInner::Mru(mru) => mru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Basic(basic) => basic.capacity(),
            CacheInner::Fifo(fifo) => fifo.capacity(),
            CacheInner::Lifo(lifo) => lifo.capacity(),
            CacheInner::Mru(mru) => mru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
        }
    }

    pub fn evictions(&self) -> u64 {
        match &self.inner {
            CacheInner::Basic(basic) => basic.evictions(),
            CacheInner::Fifo(fifo) => fifo.evictions(),
            CacheInner::Lifo(lifo) => lifo.evictions(),
            CacheInner::Mru(mru) => mru.evictions(),
            CacheInner::Lfu(lfu) => lfu.evictions(),
        }
    }

    /// Removes every entry without notifying the listener.
    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Basic(basic) => basic.clear(),
            CacheInner::Fifo(fifo) => fifo.clear(),
            CacheInner::Lifo(lifo) => lifo.clear(),
            CacheInner::Mru(mru) => mru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
        }
    }
}

impl<K, V> Cache<K, V>
where
    K: Clone + Eq + Hash + Ord + fmt::Display,
    V: fmt::Display,
{
    pub fn render_cache(&self) -> String {
        match &self.inner {
            CacheInner::Basic(basic) => basic.render_cache(),
            CacheInner::Fifo(fifo) => fifo.render_cache(),
            CacheInner::Lifo(lifo) => lifo.render_cache(),
            CacheInner::Mru(mru) => mru.render_cache(),
            CacheInner::Lfu(lfu) => lfu.render_cache(),
        }
    }

    pub fn print_cache(&self) {
        print!("{}", self.render_cache());
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Cache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }

    fn evictions(&self) -> u64 {
        Cache::evictions(self)
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("policy", &self.policy())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Builder for creating cache instances.
///
/// `L` is the eviction listener handed to the built cache; `()` ignores
/// evictions.
pub struct CacheBuilder<L = ()> {
    capacity: usize,
    listener: L,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            listener: (),
        }
    }

    /// Create a builder bounded by `config.max_items`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_items)
    }
}

impl<L> CacheBuilder<L> {
    /// Reports evictions of the built cache to `listener`.
    pub fn listener<L2>(self, listener: L2) -> CacheBuilder<L2> {
        CacheBuilder {
            capacity: self.capacity,
            listener,
        }
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is zero. See [`try_build`](Self::try_build).
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// let cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
        L: EvictionListener<K, V> + 'static,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build a cache, returning an error if the capacity is zero.
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    ///
    /// assert!(CacheBuilder::new(0).try_build::<u64, u64>(CachePolicy::Mru).is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
        L: EvictionListener<K, V> + 'static,
    {
        check_capacity(self.capacity)?;
        let inner = match policy {
            CachePolicy::Basic => CacheInner::Basic(BasicCache::new()),
            CachePolicy::Fifo => {
                CacheInner::Fifo(FifoCache::try_new(self.capacity)?.with_listener(self.listener))
            },
            CachePolicy::Lifo => {
                CacheInner::Lifo(LifoCache::try_new(self.capacity)?.with_listener(self.listener))
            },
            CachePolicy::Mru => {
                CacheInner::Mru(MruCache::try_new(self.capacity)?.with_listener(self.listener))
            },
            CachePolicy::Lfu => {
                CacheInner::Lfu(LfuCache::try_new(self.capacity)?.with_listener(self.listener))
            },
        };
        tracing::debug!(policy = %policy, capacity = self.capacity, "built cache");

        Ok(Cache { inner })
    }
}

impl<L> fmt::Debug for CacheBuilder<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheBuilder")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
