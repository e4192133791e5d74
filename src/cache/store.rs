//! Cache Store Module
//!
//! Main cache engine keeping a key index and a recency list in lockstep over
//! one arena of entries, evicting from the least recently used end.

use tracing::{debug, trace};

use crate::cache::entry::copy_str;
use crate::cache::{CacheEntry, CacheStats, KeyIndex, RecencyList, SlotArena};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded LRU cache of byte payloads keyed by path.
///
/// The arena is the sole owner of entries. The index and the recency list
/// only hold `SlotId`s into it, and both always cover the same set of
/// entries.
///
/// Not synchronized: callers sharing a store must wrap each call in their
/// own critical section.
#[derive(Debug)]
pub struct CacheStore {
    /// Entry storage
    entries: SlotArena<CacheEntry>,
    /// Key to slot lookup
    index: KeyIndex,
    /// Access order, head = most recently used
    lru: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries, must be greater than zero
    /// * `index_size_hint` - Initial index sizing, 0 for the default
    ///
    /// # Errors
    /// `InvalidRequest` for a zero capacity, `Allocation` if the index cannot
    /// be pre-sized.
    pub fn new(max_size: usize, index_size_hint: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidRequest(
                "Cache capacity must be greater than zero".to_string(),
            ));
        }

        let store = Self {
            entries: SlotArena::new(),
            index: KeyIndex::with_size_hint(index_size_hint)?,
            lru: RecencyList::new(),
            stats: CacheStats::new(),
            max_size,
        };
        debug!(
            "Cache store created: max_size={}, index_size_hint={}",
            max_size, index_size_hint
        );
        Ok(store)
    }

    // == Put ==
    /// Stores a copy of `payload` under `key`, making it most recently used.
    ///
    /// An existing entry for `key` has its content replaced in place and is
    /// promoted. Otherwise a new entry is linked at the head and, if that
    /// takes the store over capacity, least recently used entries are
    /// evicted until it fits.
    ///
    /// Every allocation happens before any link or mapping changes, so an
    /// `Allocation` error leaves the store untouched.
    pub fn put(&mut self, key: &str, content_type: &str, payload: &[u8]) -> Result<()> {
        if let Some(id) = self.index.get(key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.replace_content(content_type, payload)?;
                self.lru.move_to_head(&mut self.entries, id);
                self.stats.record_update();
                trace!("Replaced cached entry: {} ({} bytes)", key, payload.len());
                return Ok(());
            }
        }

        let entry = CacheEntry::new(key, content_type, payload)?;
        let index_key = copy_str(key)?;
        self.index.reserve_one()?;
        let id = self.entries.insert(entry)?;

        self.lru.insert_head(&mut self.entries, id);
        self.index.put(index_key, id);
        trace!("Cached new entry: {} ({} bytes)", key, payload.len());

        self.evict_overflow();
        Ok(())
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    ///
    /// A miss returns `None` and leaves order and size unchanged. The
    /// returned borrow ends at the next mutating call.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        let Some(id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.lru.move_to_head(&mut self.entries, id);
        self.stats.record_hit();
        self.entries.get(id)
    }

    // == Peek ==
    /// Looks up `key` without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry> {
        self.index.get(key).and_then(|id| self.entries.get(id))
    }

    // == Delete ==
    /// Removes the entry for `key`.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        let id = self
            .index
            .delete(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        self.lru.unlink(&mut self.entries, id);
        self.entries.remove(id);
        Ok(())
    }

    // == Eviction ==
    /// Drops tail entries until the store is within capacity.
    ///
    /// Loops rather than evicting once so that any growth step stays bounded.
    fn evict_overflow(&mut self) {
        while self.lru.len() > self.max_size {
            let Some(id) = self.lru.remove_tail(&mut self.entries) else {
                break;
            };
            if let Some(entry) = self.entries.remove(id) {
                self.index.delete(entry.key());
                self.stats.record_eviction();
                debug!("Evicted least recently used entry: {}", entry.key());
            }
        }
    }

    // == Stats ==
    /// Returns current cache statistics.
    ///
    /// `total_entries` is filled in from the live entry count on each call.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len());
        stats
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> + '_ {
        self.lru
            .ids(&self.entries)
            .filter_map(move |id| self.entries.get(id).map(CacheEntry::key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.get(key).is_some()
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.lru.clear();
        self.index.clear();
        self.entries.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.lru.debug_validate_invariants(&self.entries);
        assert_eq!(self.entries.len(), self.lru.len());
        assert_eq!(self.index.len(), self.lru.len());
        assert!(self.lru.len() <= self.max_size);

        for id in self.lru.ids(&self.entries) {
            let entry = self.entries.get(id).expect("linked entry missing");
            assert_eq!(self.index.get(entry.key()), Some(id));
        }
    }
}
