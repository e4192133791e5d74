//! API Module
//!
//! HTTP handlers and routing that serve cached responses keyed by path.
//!
//! # Endpoints
//! - `PUT /cache/*path` - Cache a response body
//! - `GET /cache/*path` - Serve a cached response body
//! - `DELETE /cache/*path` - Drop a cached response
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
