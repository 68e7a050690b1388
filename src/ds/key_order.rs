//! Keyed recency list: an [`IntrusiveList`] of keys plus a key → `SlotId` index.
//!
//! Gives O(1) append, move-to-back, removal by key and access to the two
//! newest keys. LIFO and MRU policies use it as their stack / access order;
//! both evict the key *directly below* the newest one through
//! [`pop_second_newest`](KeyOrder::pop_second_newest).
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!
//!   front (oldest) ─► [A] ◄──► [B] ◄──► [C] ◄── back (newest)
//!                               ▲        ▲
//!                      second_newest   newest
//! ```

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

/// Ordered set of keys with O(1) reordering.
#[derive(Debug)]
pub struct KeyOrder<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> KeyOrder<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Places `key` at the back, appending it if new or moving it if present.
    ///
    /// Returns `true` if the key was newly added.
    pub fn push_or_move_back(&mut self, key: K) -> bool {
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_back(id);
            return false;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        true
    }

    /// Moves an existing key to the back; returns `false` if it is absent.
    pub fn move_to_back(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.list.move_to_back(id),
            None => false,
        }
    }

    pub fn newest(&self) -> Option<&K> {
        self.list.back()
    }

    /// Removes and returns the key directly before the newest one.
    pub fn pop_second_newest(&mut self) -> Option<K> {
        let back = self.list.back_id()?;
        let id = self.list.prev_id(back)?;
        let key = self.list.remove(id)?;
        self.index.remove(&key);
        Some(key)
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        for (key, &id) in &self.index {
            assert!(self.list.get(id) == Some(key), "index points at wrong node");
        }
    }
}

impl<K> Default for KeyOrder<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
