//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::{CacheStore, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{DeleteResponse, HealthResponse, StatsResponse, StoreResponse};

/// Content type recorded when a PUT carries no `Content-Type` header.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Route prefix stripped from the request path to form the cache key.
const CACHE_ROUTE_PREFIX: &str = "/cache";

/// Application state shared across all handlers.
///
/// The store is not synchronized itself, so every handler holds the lock
/// for the whole of its cache call. Lookups take the write lock because a
/// hit reorders the recency list.
#[derive(Clone)]
pub struct AppState {
    /// Lock-protected cache store
    pub cache: Arc<RwLock<CacheStore>>,
}

impl AppState {
    /// Creates a new AppState with the given cache store.
    pub fn new(cache: CacheStore) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.max_entries, config.index_size_hint)?;
        Ok(Self::new(cache))
    }
}

/// Derives the cache key from the raw request path.
///
/// The path is used as sent, without percent-decoding, so `/cache/a%2Fb`
/// and `/cache/a/b` are distinct keys.
fn cache_key(uri: &Uri) -> Result<String> {
    let path = uri.path();
    let key = path.strip_prefix(CACHE_ROUTE_PREFIX).unwrap_or(path);
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(key.to_string())
}

/// Handler for PUT /cache/*path
///
/// Caches the raw request body under the path, recording the request's
/// `Content-Type`. A header that is not visible ASCII is rejected rather
/// than replaced with the default.
pub async fn put_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StoreResponse>> {
    let key = cache_key(&uri)?;
    if body.len() > MAX_VALUE_SIZE {
        return Err(CacheError::InvalidRequest(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }

    let content_type = match headers.get(header::CONTENT_TYPE) {
        Some(value) => value.to_str().map_err(|_| {
            CacheError::InvalidRequest("Content-Type must be visible ASCII".to_string())
        })?,
        None => DEFAULT_CONTENT_TYPE,
    };

    let mut cache = state.cache.write().await;
    cache.put(&key, content_type, &body)?;
    debug!("Stored {} as {}", key, content_type);

    Ok(Json(StoreResponse::new(key, body.len())))
}

/// Handler for GET /cache/*path
///
/// Returns the cached payload with its stored content type.
pub async fn get_handler(State(state): State<AppState>, uri: Uri) -> Result<Response> {
    let key = cache_key(&uri)?;

    // Write lock: a hit promotes the entry
    let mut cache = state.cache.write().await;
    let entry = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    let content_type = HeaderValue::from_str(entry.content_type())
        .map_err(|e| CacheError::Internal(e.to_string()))?;
    let body = entry.payload().to_vec();

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Handler for DELETE /cache/*path
pub async fn delete_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<DeleteResponse>> {
    let key = cache_key(&uri)?;

    let mut cache = state.cache.write().await;
    cache.delete(&key)?;

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Read lock suffices, stats never reorder entries
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        AppState::new(CacheStore::new(2, 0).unwrap())
    }

    fn uri(path: &str) -> Uri {
        path.parse().unwrap()
    }

    fn text_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
        headers
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = test_state();

        let result = put_handler(
            State(state.clone()),
            uri("/cache/index.html"),
            text_headers(),
            Bytes::from_static(b"<p>hi</p>"),
        )
        .await;
        let response = result.unwrap();
        assert_eq!(response.key, "/index.html");
        assert_eq!(response.length, 9);

        let response = get_handler(State(state.clone()), uri("/cache/index.html"))
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
    }

    #[tokio::test]
    async fn test_put_without_content_type_uses_default() {
        let state = test_state();

        let _response = put_handler(
            State(state.clone()),
            uri("/cache/blob"),
            HeaderMap::new(),
            Bytes::from_static(&[0, 1, 2]),
        )
        .await
        .unwrap();

        let cache = state.cache.read().await;
        let entry = cache.peek("/blob").unwrap();
        assert_eq!(entry.content_type(), DEFAULT_CONTENT_TYPE);
        assert_eq!(entry.payload(), &[0u8, 1, 2]);
    }

    #[tokio::test]
    async fn test_put_non_ascii_content_type_rejected() {
        let state = test_state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_bytes(b"text/plain; charset=\xe9").unwrap(),
        );

        let result = put_handler(
            State(state.clone()),
            uri("/cache/x"),
            headers,
            Bytes::from_static(b"value"),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));

        let cache = state.cache.read().await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_encoded_slash_is_a_distinct_key() {
        let state = test_state();

        let response = put_handler(
            State(state.clone()),
            uri("/cache/a%2Fb"),
            text_headers(),
            Bytes::from_static(b"encoded"),
        )
        .await
        .unwrap();
        assert_eq!(response.key, "/a%2Fb");

        let result = get_handler(State(state.clone()), uri("/cache/a/b")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert!(get_handler(State(state), uri("/cache/a%2Fb")).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), uri("/cache/nonexistent")).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        let _response = put_handler(
            State(state.clone()),
            uri("/cache/to_delete"),
            text_headers(),
            Bytes::from_static(b"value"),
        )
        .await
        .unwrap();

        let result = delete_handler(State(state.clone()), uri("/cache/to_delete")).await;
        assert!(result.is_ok());

        let result = get_handler(State(state), uri("/cache/to_delete")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_put_key_at_max_length() {
        let state = test_state();
        // Leading slash plus the rest fills the limit exactly
        let path = format!("/cache/{}", "x".repeat(MAX_KEY_LENGTH - 1));

        let response = put_handler(
            State(state.clone()),
            uri(&path),
            HeaderMap::new(),
            Bytes::from_static(b"value"),
        )
        .await
        .unwrap();
        assert_eq!(response.key.len(), MAX_KEY_LENGTH);

        let cache = state.cache.read().await;
        assert!(cache.contains(&response.key));
    }

    #[tokio::test]
    async fn test_put_key_too_long() {
        let state = test_state();
        let path = format!("/cache/{}", "x".repeat(MAX_KEY_LENGTH));

        let result = put_handler(
            State(state),
            uri(&path),
            HeaderMap::new(),
            Bytes::from_static(b"value"),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_put_value_too_large() {
        let state = test_state();

        let result = put_handler(
            State(state),
            uri("/cache/big"),
            HeaderMap::new(),
            Bytes::from(vec![b'x'; MAX_VALUE_SIZE + 1]),
        )
        .await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let _ = get_handler(State(state.clone()), uri("/cache/missing")).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 1);
        assert_eq!(response.capacity, 2);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_from_config_rejects_zero_capacity() {
        let config = Config {
            max_entries: 0,
            ..Config::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}
