//! Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) serialized into
//! JSON response bodies. Cached payloads themselves are returned raw.

pub mod responses;

// Re-export commonly used types
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse, StoreResponse};
