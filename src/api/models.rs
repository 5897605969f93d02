use serde::{Deserialize, Serialize};

use crate::models::{ProviderRequest, ProviderSelection};

#[derive(Deserialize)]
pub struct AnalysisRequest {
    pub request: ProviderRequest,
    pub provider_config: ProviderSelection,
}

#[derive(Deserialize)]
pub struct ModelsQuery {
    pub provider: Option<String>,
}

#[derive(Serialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub git_hash: &'static str,
    pub built_at: &'static str,
}
