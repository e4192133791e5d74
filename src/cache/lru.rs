//! Recency List Module
//!
//! Intrusive doubly linked list threading cache entries in access order.
//!
//! The links live inside each `CacheEntry` (`prev`/`next`) and point at
//! arena slots, so every splice is O(1) and the list owns nothing:
//!
//! ```text
//!   head (MRU)                                   tail (LRU)
//!     [id_a] <──> [id_b] <──> [id_c] <──> [id_d]
//! ```

use crate::cache::{CacheEntry, SlotArena, SlotId};

// == Recency List ==
/// Head = most recently used, tail = least recently used.
#[derive(Debug, Default)]
pub struct RecencyList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Insert Head ==
    /// Links an unlinked entry in front of the current head.
    pub fn insert_head(&mut self, arena: &mut SlotArena<CacheEntry>, id: SlotId) {
        debug_assert!(arena.contains(id), "insert_head on an entry missing from the arena");
        let old_head = self.head;
        let Some(entry) = arena.get_mut(id) else {
            return;
        };
        entry.prev = None;
        entry.next = old_head;

        match old_head {
            Some(head) => {
                if let Some(head_entry) = arena.get_mut(head) {
                    head_entry.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    // == Move To Head ==
    /// Promotes a linked entry to most recently used.
    pub fn move_to_head(&mut self, arena: &mut SlotArena<CacheEntry>, id: SlotId) {
        if self.head == Some(id) {
            return;
        }

        debug_assert!(arena.contains(id), "move_to_head on an entry missing from the arena");
        let Some(entry) = arena.get(id) else {
            return;
        };
        let (prev, next) = (entry.prev, entry.next);

        if self.tail == Some(id) {
            // Tail: its predecessor becomes the new tail
            self.tail = prev;
            if let Some(prev_entry) = linked_mut(arena, prev) {
                prev_entry.next = None;
            }
        } else {
            // Interior: bypass
            if let Some(prev_entry) = linked_mut(arena, prev) {
                prev_entry.next = next;
            }
            if let Some(next_entry) = linked_mut(arena, next) {
                next_entry.prev = prev;
            }
        }

        let old_head = self.head;
        if let Some(entry) = arena.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        if let Some(head_entry) = linked_mut(arena, old_head) {
            head_entry.prev = Some(id);
        }
        self.head = Some(id);
    }

    // == Remove Tail ==
    /// Detaches and returns the least recently used entry.
    ///
    /// The entry stays in the arena; the caller drops its index mapping and
    /// frees it. Calling this on an empty list is a bug.
    pub fn remove_tail(&mut self, arena: &mut SlotArena<CacheEntry>) -> Option<SlotId> {
        debug_assert!(self.tail.is_some(), "remove_tail on an empty recency list");
        let old_tail = self.tail?;
        self.unlink(arena, old_tail);
        Some(old_tail)
    }

    // == Unlink ==
    /// Detaches an entry from any position, leaving it in the arena.
    pub fn unlink(&mut self, arena: &mut SlotArena<CacheEntry>, id: SlotId) {
        debug_assert!(arena.contains(id), "unlink on an entry missing from the arena");
        let Some(entry) = arena.get_mut(id) else {
            return;
        };
        let (prev, next) = (entry.prev.take(), entry.next.take());

        match linked_mut(arena, prev) {
            Some(prev_entry) => prev_entry.next = next,
            None => self.head = next,
        }
        match linked_mut(arena, next) {
            Some(next_entry) => next_entry.prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    /// Forgets every link. Entries must be dropped from the arena separately.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iteration ==
    /// Walks slot ids from head to tail.
    pub fn ids<'a>(&self, arena: &'a SlotArena<CacheEntry>) -> RecencyIter<'a> {
        RecencyIter {
            arena,
            current: self.head,
        }
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self, arena: &SlotArena<CacheEntry>) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;

        while let Some(id) = current {
            assert!(seen.insert(id), "cycle in recency list");
            let entry = arena.get(id).expect("linked entry missing from arena");
            assert_eq!(entry.prev, prev);
            if entry.next.is_none() {
                assert_eq!(self.tail, Some(id));
            }
            prev = Some(id);
            current = entry.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
    }
}

fn linked_mut(arena: &mut SlotArena<CacheEntry>, id: Option<SlotId>) -> Option<&mut CacheEntry> {
    match id {
        Some(id) => arena.get_mut(id),
        None => None,
    }
}

/// Iterator over slot ids from most to least recently used.
pub struct RecencyIter<'a> {
    arena: &'a SlotArena<CacheEntry>,
    current: Option<SlotId>,
}

impl<'a> Iterator for RecencyIter<'a> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.arena.get(id)?;
        self.current = entry.next;
        Some(id)
    }
}
