//! Slot Arena Module
//!
//! Generation-checked slot storage for cache entries.
//!
//! Entries are addressed by `SlotId { index, generation }`. Removing a value
//! bumps its slot generation, so an id held after eviction no longer resolves
//! instead of silently aliasing whatever reuses the slot.

use crate::error::Result;

// == Slot Id ==
/// Stable handle to a value stored in a `SlotArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u64,
}

impl SlotId {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation the slot had when this id was issued.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

// == Slot Arena ==
/// Vector-backed arena with a free list and per-slot generations.
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    // == Constructor ==
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    // == Insert ==
    /// Stores `value` and returns its id.
    ///
    /// Growth is fallible; on failure the arena is left unchanged and the
    /// value is dropped.
    pub fn insert(&mut self, value: T) -> Result<SlotId> {
        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            self.len += 1;
            return Ok(SlotId {
                index,
                generation: slot.generation,
            });
        }

        self.slots.try_reserve(1)?;
        // Keep the free list able to hold every slot so `remove` never allocates.
        let needed = self.slots.len() + 1;
        if self.free_list.capacity() < needed {
            self.free_list.try_reserve(needed - self.free_list.len())?;
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        self.len += 1;
        Ok(SlotId {
            index,
            generation: 0,
        })
    }

    // == Remove ==
    /// Removes and returns the value for `id`; `None` if the id is stale.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    // == Lookup ==
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every value. Slots are kept so generations keep increasing.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index);
            }
        }
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
