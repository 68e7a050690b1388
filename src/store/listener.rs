//! Eviction listeners.
//!
//! Every policy reports each evicted entry to an [`EvictionListener`] exactly
//! once, right after the entry leaves the table. The listener replaces a
//! hard-coded `DISCARD: <key>` print, so callers choose where the
//! notification goes:
//!
//! | Listener          | Effect                                          |
//! |-------------------|-------------------------------------------------|
//! | [`DiscardWriter`] | writes `DISCARD: <key>` lines to an `io::Write` |
//! | [`EvictionLog`]   | records evicted keys in a shared `Vec`          |
//! | [`FnListener`]    | calls a closure                                 |
//!
//! ## Example
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
//! cache.insert("C", 3);
//!
//! assert_eq!(log.keys(), vec!["A"]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Receives every entry a cache evicts.
pub trait EvictionListener<K, V> {
    /// Called once per eviction with the entry that was discarded.
    fn on_evict(&mut self, key: &K, value: &V);
}

/// Ignores every eviction.
impl<K, V> EvictionListener<K, V> for () {
    fn on_evict(&mut self, _key: &K, _value: &V) {}
}

// ---------------------------------------------------------------------------
// DiscardWriter
// ---------------------------------------------------------------------------

/// Writes `DISCARD: <key>` for every eviction.
///
/// # Example
///
/// ```
/// use evictkit::policy::lifo::LifoCache;
/// use evictkit::store::DiscardWriter;
///
/// let mut cache = LifoCache::new(1).with_listener(DiscardWriter::new(Vec::new()));
/// cache.insert("A", 1);
/// cache.insert("B", 2);
/// ```
pub struct DiscardWriter<W> {
    out: W,
}

impl DiscardWriter<io::Stdout> {
    /// Writes to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiscardWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<K, V, W> EvictionListener<K, V> for DiscardWriter<W>
where
    K: fmt::Display,
    W: Write,
{
    fn on_evict(&mut self, key: &K, _value: &V) {
        if let Err(err) = writeln!(self.out, "DISCARD: {key}") {
            tracing::warn!(error = %err, "failed to write discard notice");
        }
    }
}

impl<W> fmt::Debug for DiscardWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscardWriter").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// EvictionLog
// ---------------------------------------------------------------------------

/// Records evicted keys; clones share one log.
///
/// Hand one clone to the cache and keep another to inspect eviction order.
#[derive(Debug)]
pub struct EvictionLog<K> {
    keys: Rc<RefCell<Vec<K>>>,
}

impl<K> EvictionLog<K> {
    pub fn new() -> Self {
        Self {
            keys: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Number of evictions recorded so far.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Drains the recorded keys, oldest eviction first.
    pub fn take(&self) -> Vec<K> {
        std::mem::take(&mut *self.keys.borrow_mut())
    }
}

impl<K: Clone> EvictionLog<K> {
    /// Returns a copy of the recorded keys, oldest eviction first.
    pub fn keys(&self) -> Vec<K> {
        self.keys.borrow().clone()
    }

    /// Returns the most recently evicted key.
    pub fn last(&self) -> Option<K> {
        self.keys.borrow().last().cloned()
    }
}

impl<K> Clone for EvictionLog<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Rc::clone(&self.keys),
        }
    }
}

impl<K> Default for EvictionLog<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V> EvictionListener<K, V> for EvictionLog<K> {
    fn on_evict(&mut self, key: &K, _value: &V) {
        self.keys.borrow_mut().push(key.clone());
    }
}

// ---------------------------------------------------------------------------
// FnListener
// ---------------------------------------------------------------------------

/// Adapts a closure into an [`EvictionListener`].
///
/// # Example
///
/// ```
/// use evictkit::policy::mru::MruCache;
/// use evictkit::store::FnListener;
///
/// let mut cache = MruCache::new(1)
///     .with_listener(FnListener(|key: &&str, value: &i32| println!("{key}={value} left")));
/// cache.insert("a", 1);
/// cache.insert("b", 2);
/// ```
pub struct FnListener<F>(pub F);

impl<K, V, F> EvictionListener<K, V> for FnListener<F>
where
    F: FnMut(&K, &V),
{
    fn on_evict(&mut self, key: &K, value: &V) {
        (self.0)(key, value)
    }
}

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnListener").finish_non_exhaustive()
    }
}
