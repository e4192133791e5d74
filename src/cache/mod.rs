//! Cache Module
//!
//! Bounded in-memory cache of byte payloads with LRU eviction.

mod arena;
mod entry;
mod index;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use arena::{SlotArena, SlotId};
pub use entry::CacheEntry;
pub use index::KeyIndex;
pub use lru::{RecencyIter, RecencyList};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum key length accepted by the HTTP layer, in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum payload size accepted by the HTTP layer, in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
