//! Frequency buckets for O(1) LFU tracking.
//!
//! Tracks per-key access counts with O(1) insert, touch and eviction.
//! Keys sharing a frequency live in one bucket, ordered by recency, so the
//! eviction candidate is always "least frequent, then least recently used".
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                        FrequencyBuckets<K> Layout                           │
//! │                                                                             │
//! │   ┌─────────────────────────────┐   ┌─────────────────────────────────┐     │
//! │   │  index: HashMap<K, SlotId>  │   │  entries: SlotArena<Entry<K>>   │     │
//! │   │                             │   │                                 │     │
//! │   │  ┌───────────┬──────────┐   │   │  ┌──────┬───────────────────┐   │     │
//! │   │  │    Key    │  SlotId  │   │   │  │ Slot │ Entry             │   │     │
//! │   │  ├───────────┼──────────┤   │   │  ├──────┼───────────────────┤   │     │
//! │   │  │    "A"    │   id_0   │───┼───┼─►│ id_0 │ freq:3, prev/next │   │     │
//! │   │  │    "B"    │   id_1   │───┼───┼─►│ id_1 │ freq:1, prev/next │   │     │
//! │   │  │    "C"    │   id_2   │───┼───┼─►│ id_2 │ freq:1, prev/next │   │     │
//! │   │  └───────────┴──────────┘   │   │  └──────┴───────────────────┘   │     │
//! │   └─────────────────────────────┘   └─────────────────────────────────┘     │
//! │                                                                             │
//! │   ┌───────────────────────────────────────────────────────────────────┐     │
//! │   │  buckets: HashMap<u64, Bucket>  (frequency → doubly-linked list)  │     │
//! │   │                                                                   │     │
//! │   │  min_freq = 1                                                     │     │
//! │   │       │                                                           │     │
//! │   │       ▼                                                           │     │
//! │   │  freq=1: head ──► [id_2] ◄──► [id_1] ◄── tail                     │     │
//! │   │                     MRU          LRU (evict first)                │     │
//! │   │                                                                   │     │
//! │   │  freq=3: head ──► [id_0] ◄── tail                                 │     │
//! │   │                                                                   │     │
//! │   │  Bucket links: freq=1 ──next──► freq=3                            │     │
//! │   └───────────────────────────────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────────┘
//!
//! Touch Flow (increment frequency)
//! ─────────────────────────────────
//!
//!   touch("B"):
//!     1. Lookup id_1 in index
//!     2. Unlink id_1 from the freq=1 bucket
//!     3. If freq=1 bucket empty → remove bucket, advance min_freq
//!     4. Create freq=2 bucket between its neighbours if needed
//!     5. Push id_1 to the head (MRU) of freq=2
//!
//! Eviction Flow (pop_min)
//! ───────────────────────
//!
//!   pop_min():
//!     1. Use min_freq to find the lowest bucket
//!     2. Unlink the tail of that bucket (used longest ago)
//!     3. If bucket empty → remove bucket, advance min_freq
//!     4. Return (key, freq)
//! ```
//!
//! ## Tie-break order
//!
//! A key enters a bucket only through its most recent use (insert at freq 1,
//! or a touch that raised it to that frequency), and enters at the head. So
//! within one bucket, head-to-tail order is exactly last-use order, and the
//! tail of the `min_freq` bucket is the least recently used of the least
//! frequently used keys.
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                  |
//! |-------------|------|----------------------------------------|
//! | `insert`    | O(1) | New key starts at freq=1               |
//! | `touch`     | O(1) | Increment frequency, move to MRU       |
//! | `pop_min`   | O(1) | Evict LFU, LRU among ties              |
//! | `peek_min`  | O(1) | Eviction candidate without removal     |
//! | `frequency` | O(1) | Query current frequency                |
//!
//! ## Example Usage
//!
//! ```
//! use evictkit::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//!
//! freq.insert("A");
//! freq.insert("B");
//! freq.touch(&"A"); // A at freq=2
//!
//! assert_eq!(freq.min_freq(), Some(1));
//! assert_eq!(freq.pop_min(), Some(("B", 1)));
//! assert_eq!(freq.pop_min(), Some(("A", 2)));
//! assert_eq!(freq.pop_min(), None);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; owned by a single cache instance.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Link pointers first: they are touched on every move, the key only on eviction.
#[derive(Debug)]
#[repr(C)]
struct Entry<K> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) LFU metadata tracker with LRU tie-breaking within a frequency.
///
/// # Example
///
/// ```
/// use evictkit::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::new();
/// freq.insert("a");
/// freq.insert("b");
/// freq.touch(&"a");
///
/// assert_eq!(freq.frequency(&"a"), Some(2));
/// assert_eq!(freq.frequency(&"b"), Some(1));
/// assert_eq!(freq.peek_min(), Some((&"b", 1)));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K> {
    entries: SlotArena<Entry<K>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    /// 0 means "no entries".
    min_freq: u64,
}

/// Most items cluster at low frequencies, so a handful of buckets covers them.
pub const DEFAULT_BUCKET_PREALLOC: usize = 8;

impl<K> FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with reserved capacity for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: 0,
        }
    }

    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if `key` is tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the current frequency of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Returns the lowest frequency among tracked keys.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Returns the eviction candidate `(key, freq)` without removing it.
    pub fn peek_min(&self) -> Option<(&K, u64)> {
        let id = self.buckets.get(&self.min_freq)?.tail?;
        self.entries.get(id).map(|entry| (&entry.key, entry.freq))
    }

    /// Starts tracking `key` at frequency 1.
    ///
    /// Returns `false` (and changes nothing) if the key is already tracked.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// assert!(freq.insert("a"));
    /// assert!(!freq.insert("a"));
    /// assert_eq!(freq.frequency(&"a"), Some(1));
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq().filter(|&f| f > 1);
            self.insert_bucket(1, None, next);
        }
        self.list_push_front(1, id);
        self.min_freq = 1;
        true
    }

    /// Increments the frequency of `key` and returns the new frequency.
    ///
    /// Returns `None` if `key` is not tracked. The key becomes the most
    /// recently used entry of its new bucket. A key already at `u64::MAX`
    /// keeps its frequency and is only refreshed within its bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("key");
    ///
    /// assert_eq!(freq.touch(&"key"), Some(2));
    /// assert_eq!(freq.touch(&"key"), Some(3));
    /// assert_eq!(freq.touch(&"missing"), None);
    /// ```
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        let current_freq = self.entries.get(id)?.freq;
        if current_freq == u64::MAX {
            self.list_remove(current_freq, id)?;
            self.list_push_front(current_freq, id);
            return Some(current_freq);
        }
        let next_freq = current_freq + 1;

        let (prev_freq, next_existing) = {
            let bucket = self.buckets.get(&current_freq)?;
            (bucket.prev, bucket.next)
        };

        self.list_remove(current_freq, id)?;
        let bucket_empty = self.bucket_is_empty(current_freq);
        if bucket_empty {
            self.remove_bucket(current_freq, prev_freq, next_existing);
            if self.min_freq == current_freq {
                self.min_freq = next_existing.unwrap_or(0);
            }
        }

        if !self.buckets.contains_key(&next_freq) {
            let prev = if bucket_empty {
                prev_freq
            } else {
                Some(current_freq)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);
        if self.min_freq == 0 || next_freq < self.min_freq {
            self.min_freq = next_freq;
        }

        Some(next_freq)
    }

    /// Removes and returns the eviction candidate `(key, freq)`.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// freq.insert("a");
    /// freq.insert("b");
    /// freq.insert("c");
    /// freq.touch(&"a"); // a leaves freq=1
    ///
    /// assert_eq!(freq.pop_min(), Some(("b", 1)));
    /// assert_eq!(freq.pop_min(), Some(("c", 1)));
    /// assert_eq!(freq.pop_min(), Some(("a", 2)));
    /// assert_eq!(freq.pop_min(), None);
    /// ```
    pub fn pop_min(&mut self) -> Option<(K, u64)> {
        if self.min_freq == 0 {
            return None;
        }
        let id = self.buckets.get(&self.min_freq)?.tail?;
        let entry = self.unlink(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.freq))
    }

    /// Clears all state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Checks bucket chains, the index and `min_freq` against each other.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "entries ({}) and index ({}) differ in size",
                self.entries.len(),
                self.index.len()
            )));
        }

        if self.index.is_empty() {
            if !self.buckets.is_empty() || self.min_freq != 0 {
                return Err(InvariantError::new("empty tracker still has buckets"));
            }
            return Ok(());
        }

        if !self.buckets.contains_key(&self.min_freq) {
            return Err(InvariantError::new(format!(
                "min_freq {} has no bucket",
                self.min_freq
            )));
        }

        let mut linked = 0usize;
        for (&freq, bucket) in &self.buckets {
            if freq < self.min_freq {
                return Err(InvariantError::new(format!(
                    "bucket {freq} below min_freq {}",
                    self.min_freq
                )));
            }
            match bucket.prev {
                Some(prev) if self.buckets.get(&prev).and_then(|b| b.next) != Some(freq) => {
                    return Err(InvariantError::new(format!("bucket {freq} prev link broken")));
                },
                None if freq != self.min_freq => {
                    return Err(InvariantError::new(format!(
                        "bucket {freq} has no predecessor but is not the minimum"
                    )));
                },
                _ => {},
            }
            if let Some(next) = bucket.next {
                if next <= freq || self.buckets.get(&next).and_then(|b| b.prev) != Some(freq) {
                    return Err(InvariantError::new(format!("bucket {freq} next link broken")));
                }
            }

            let mut current = bucket.head;
            let mut last = None;
            let mut count = 0usize;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| InvariantError::new("bucket links a freed slot"))?;
                if entry.freq != freq || entry.prev != last {
                    return Err(InvariantError::new(format!(
                        "entry in bucket {freq} carries stale links or frequency"
                    )));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(InvariantError::new("bucket entry missing from index"));
                }
                last = Some(id);
                current = entry.next;
                count += 1;
                if count > self.entries.len() {
                    return Err(InvariantError::new(format!("bucket {freq} has a cycle")));
                }
            }
            if count == 0 || bucket.tail != last {
                return Err(InvariantError::new(format!(
                    "bucket {freq} is empty or has a wrong tail"
                )));
            }
            linked += count;
        }

        if linked != self.entries.len() {
            return Err(InvariantError::new(format!(
                "{linked} entries linked into buckets, {} tracked",
                self.entries.len()
            )));
        }
        Ok(())
    }

    /// Detaches `id` from its bucket, fixes `min_freq`, and frees the slot.
    fn unlink(&mut self, id: SlotId) -> Option<Entry<K>> {
        let freq = self.entries.get(id)?.freq;
        self.list_remove(freq, id)?;
        if self.bucket_is_empty(freq) {
            let (prev, next) = {
                let bucket = self.buckets.get(&freq)?;
                (bucket.prev, bucket.next)
            };
            self.remove_bucket(freq, prev, next);
            if self.min_freq == freq {
                self.min_freq = next.unwrap_or(0);
            }
        }
        self.entries.remove(id)
    }

    fn bucket_is_empty(&self, freq: u64) -> bool {
        self.buckets
            .get(&freq)
            .is_none_or(|bucket| bucket.head.is_none())
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );

        if let Some(prev_bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            prev_bucket.next = Some(freq);
        }
        if let Some(next_bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            next_bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev_bucket) = prev.and_then(|p| self.buckets.get_mut(&p)) {
            prev_bucket.next = next;
        }
        if let Some(next_bucket) = next.and_then(|n| self.buckets.get_mut(&n)) {
            next_bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            debug_assert!(false, "bucket {freq} missing on push");
            return;
        };

        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(entry) = self.entries.get_mut(old_head) {
                entry.prev = Some(id);
            }
        } else {
            bucket.tail = Some(id);
        }
        bucket.head = Some(id);
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };

        let bucket = self.buckets.get_mut(&freq)?;
        if let Some(prev) = prev {
            if let Some(entry) = self.entries.get_mut(prev) {
                entry.next = next;
            }
        } else {
            bucket.head = next;
        }
        if let Some(next) = next {
            if let Some(entry) = self.entries.get_mut(next) {
                entry.prev = prev;
            }
        } else {
            bucket.tail = prev;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = None;
        }
        Some(())
    }
}

impl<K> Default for FrequencyBuckets<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
