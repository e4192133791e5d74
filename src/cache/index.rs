//! Key Index Module
//!
//! Adapter over `HashMap` resolving a key to the slot of its entry.

use std::collections::HashMap;

use crate::cache::SlotId;
use crate::error::Result;

// == Key Index ==
/// Maps keys to the `SlotId` of their owning entry.
///
/// Holds only ids; entries themselves are owned by the store's arena.
#[derive(Debug, Default)]
pub struct KeyIndex {
    map: HashMap<String, SlotId>,
}

impl KeyIndex {
    // == Constructor ==
    /// Creates an index pre-sized for `size_hint` keys (0 = default sizing).
    pub fn with_size_hint(size_hint: usize) -> Result<Self> {
        let mut map = HashMap::new();
        if size_hint > 0 {
            map.try_reserve(size_hint)?;
        }
        Ok(Self { map })
    }

    /// Ensures one more key can be inserted without reallocating.
    pub fn reserve_one(&mut self) -> Result<()> {
        self.map.try_reserve(1)?;
        Ok(())
    }

    /// Inserts or overwrites the mapping, returning the previous id.
    pub fn put(&mut self, key: String, id: SlotId) -> Option<SlotId> {
        self.map.insert(key, id)
    }

    pub fn get(&self, key: &str) -> Option<SlotId> {
        self.map.get(key).copied()
    }

    /// Removes the mapping; absent keys are ignored.
    pub fn delete(&mut self, key: &str) -> Option<SlotId> {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
