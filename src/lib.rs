//! Path Cache - a bounded in-memory response cache
//!
//! Caches rendered responses keyed by request path, evicting the least
//! recently used entry once the configured entry count is exceeded.
//!
//! The engine lives in [`cache`]; [`api`] serves it over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStore};
pub use config::Config;
pub use error::{CacheError, Result};
