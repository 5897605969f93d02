use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::api::AppState;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Constant-time byte comparison so the key can't be probed by timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Require `X-API-Key` to match the configured key. An empty configured key
/// leaves the server open, for local development.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let expected = &state.settings().api_key;
    if expected.is_empty() {
        return Ok(next.run(request).await);
    }

    let matches = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|key| constant_time_eq(key.as_bytes(), expected.as_bytes()));

    match matches {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            warn!(path = %request.uri().path(), "Invalid API key");
            Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API key", "detail": "Invalid API key"}))))
        }
        None => {
            warn!(path = %request.uri().path(), "Missing API key");
            Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Missing X-API-Key header", "detail": "Invalid API key"}))))
        }
    }
}
