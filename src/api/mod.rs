pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::llm::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher: Arc::new(dispatcher) }
    }

    pub fn settings(&self) -> &Settings {
        self.dispatcher.settings()
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings().allowed_origins);

    let protected = Router::new()
        .route("/analyze", post(routes::analyze::analyze_security))
        .route("/models", get(routes::models::get_available_models))
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let patterns = origins.to_vec();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .map(|o| origin_allowed(&patterns, o))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static("x-api-key"),
            HeaderName::from_static("x-provider-key"),
        ])
}

/// `*` allows everything; a trailing `*` is a prefix match; anything else is exact.
pub fn origin_allowed(patterns: &[String], origin: &str) -> bool {
    patterns.iter().any(|pattern| {
        if pattern == "*" {
            true
        } else if let Some(prefix) = pattern.strip_suffix('*') {
            origin.starts_with(prefix)
        } else {
            pattern == origin
        }
    })
}
