use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::api::models::{ModelsQuery, ModelsResponse};
use crate::api::AppState;
use crate::errors::SeezoError;
use crate::models::ProviderSelection;

pub const PROVIDER_KEY_HEADER: &str = "X-Provider-Key";

pub async fn get_available_models(
    State(state): State<AppState>,
    Query(query): Query<ModelsQuery>,
    headers: HeaderMap,
) -> Result<Json<ModelsResponse>, SeezoError> {
    let provider = query
        .provider
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.settings().default_provider.clone());
    let api_key = headers
        .get(PROVIDER_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    info!(provider = %provider, with_key = api_key.is_some(), "Fetching models");
    let selection = ProviderSelection { provider, model_name: None, api_key };
    let models = state.dispatcher.list_models(&selection).await?;

    Ok(Json(ModelsResponse { models }))
}
