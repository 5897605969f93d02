use axum::Json;
use crate::api::models::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "seezo",
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("SEEZO_GIT_HASH").unwrap_or("dev"),
        built_at: option_env!("SEEZO_BUILD_TIMESTAMP").unwrap_or("unknown"),
    })
}
