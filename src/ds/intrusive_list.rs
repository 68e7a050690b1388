//! Doubly linked list whose nodes live in a [`SlotArena`].
//!
//! Nodes are addressed by [`SlotId`] rather than pointer, so a node can be
//! unlinked or relinked in O(1) given its id. [`KeyOrder`] keeps a key → id
//! index on top of this to reorder keys by value.
//!
//! ```text
//!   head                                      tail
//!   oldest ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄─ newest
//!                            ▲
//!                  prev_id(tail) = id_2
//! ```
//!
//! [`KeyOrder`]: crate::ds::KeyOrder

use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Arena-backed doubly linked list, head is oldest and tail is newest.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    nodes: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Oldest value.
    pub fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    /// Newest value.
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Id of the node linked directly before `id`.
    pub fn prev_id(&self, id: SlotId) -> Option<SlotId> {
        self.nodes.get(id)?.prev
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.value)
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Appends `value` as the newest node and returns its id.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.nodes.insert(Node {
            value,
            prev: None,
            next: None,
        });
        self.link_back(id);
        id
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(self.head?)
    }

    /// Unlinks `id` and frees its slot.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.nodes.remove(id).map(|node| node.value)
    }

    /// Relinks `id` as the newest node; `false` if `id` is not in the list.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return true;
        }
        if self.unlink(id).is_none() {
            return false;
        }
        self.link_back(id);
        true
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn link_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail.and_then(|t| self.nodes.get_mut(t)) {
            Some(tail) => tail.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let node = self.nodes.get_mut(id)?;
        let (prev, next) = (node.prev.take(), node.next.take());

        match prev.and_then(|p| self.nodes.get_mut(p)) {
            Some(p) => p.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.nodes.get_mut(n)) {
            Some(n) => n.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }

    /// Walks the chain and panics if links, ends, or length disagree.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert_eq!(self.head.is_none(), self.tail.is_none(), "half-empty ends");

        let mut count = 0usize;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.nodes.get(id) else {
                panic!("list links a freed slot");
            };
            assert_eq!(node.prev, prev, "broken back link");
            count += 1;
            assert!(count <= self.len(), "cycle in list");
            prev = Some(id);
            cursor = node.next;
        }
        assert_eq!(prev, self.tail, "tail is not the last node");
        assert_eq!(count, self.len());
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over an [`IntrusiveList`].
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}
