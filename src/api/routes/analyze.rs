use axum::{extract::State, Json};
use tracing::{info, info_span, Instrument};

use crate::api::models::AnalysisRequest;
use crate::api::AppState;
use crate::errors::SeezoError;
use crate::models::AnalysisResult;

/// Analysis failures come back as a 200 carrying `status: "error"`; only
/// dispatcher-level rejections map to an HTTP error status.
pub async fn analyze_security(
    State(state): State<AppState>,
    Json(body): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, SeezoError> {
    let request_id = uuid::Uuid::new_v4();
    let AnalysisRequest { request, mut provider_config } = body;
    if provider_config.provider.trim().is_empty() {
        provider_config.provider = state.settings().default_provider.clone();
    }

    let span = info_span!("analyze", %request_id, provider = %provider_config.provider);
    async move {
        info!(url = %request.url, html_len = request.html_content.len(), "Received analysis request");
        let result = state.dispatcher.dispatch(&provider_config, request).await?;
        info!(status = ?result.status, "Analysis request finished");
        Ok(Json(result))
    }
    .instrument(span)
    .await
}
