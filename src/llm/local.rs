use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::errors::SeezoError;
use crate::models::ProviderIdentity;
use super::catalog;
use super::provider::{read_json, LLMProvider};
use super::types::{GenerationOptions, LLMResponse, ProviderTimeouts};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama running on the same host. Page content never leaves the machine.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    timeouts: ProviderTimeouts,
}

#[derive(Debug, Deserialize)]
struct OllamaModelList {
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

impl OllamaProvider {
    pub fn new(model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: model
                .unwrap_or_else(|| catalog::get_default_model("ollama"))
                .to_string(),
            timeouts: ProviderTimeouts::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeouts(mut self, timeouts: ProviderTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    async fn fetch_models(&self) -> Result<Vec<String>, SeezoError> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.timeouts.validation)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("Ollama", e))?;

        let data = read_json("Ollama", resp).await?;
        let list: OllamaModelList = serde_json::from_value(data)?;
        Ok(list.models.into_iter().map(|m| m.name).collect())
    }
}

/// `mistral` matches an installed `mistral:latest`; tagged names must match exactly.
fn model_installed(configured: &str, installed: &[String]) -> bool {
    installed.iter().any(|name| {
        name == configured
            || (!configured.contains(':')
                && name
                    .strip_prefix(configured)
                    .is_some_and(|rest| rest.starts_with(':')))
    })
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "num_predict": options.max_tokens,
            }
        });

        let resp = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("Ollama", e))?;

        let data = read_json("Ollama", resp).await?;
        let content = data["response"]
            .as_str()
            .ok_or_else(|| SeezoError::LLMApi("No response field in Ollama reply".into()))?
            .to_string();

        let input_tokens = data["prompt_eval_count"].as_u64();
        let output_tokens = data["eval_count"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Ollama completion");

        Ok(LLMResponse { content, input_tokens, output_tokens, model: self.model.clone() })
    }

    async fn validate_credentials(&self) -> bool {
        info!(base_url = %self.base_url, model = %self.model, "Validating Ollama service and model availability");
        match self.fetch_models().await {
            Ok(models) if model_installed(&self.model, &models) => true,
            Ok(models) => {
                warn!(model = %self.model, available = ?models, "Model not installed in Ollama");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama service unreachable");
                false
            }
        }
    }

    async fn list_available_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Failed to list Ollama models");
                Vec::new()
            }
        }
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity { name: "Ollama".to_string(), is_local: true }
    }

    fn model_name(&self) -> &str { &self.model }

    fn timeouts(&self) -> ProviderTimeouts { self.timeouts }
}
