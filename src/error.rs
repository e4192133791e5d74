//! Error types for the response cache
//!
//! Provides unified error handling using thiserror.

use std::collections::TryReserveError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and the serving layer.
///
/// A lookup miss is not an error for `CacheStore::get`; `NotFound` is only
/// produced by operations that require the key to exist (delete, HTTP GET).
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key not found in cache
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data or construction parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Memory could not be obtained for an entry or for index growth
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TryReserveError> for CacheError {
    fn from(err: TryReserveError) -> Self {
        CacheError::Allocation(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Allocation(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
