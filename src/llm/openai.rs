use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::SeezoError;
use crate::models::ProviderIdentity;
use super::catalog;
use super::provider::{missing_key, read_json, LLMProvider};
use super::types::{GenerationOptions, LLMResponse, ProviderTimeouts};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeouts: ProviderTimeouts,
}

impl OpenAIProvider {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
            model: model
                .unwrap_or_else(|| catalog::get_default_model("openai"))
                .to_string(),
            base_url: DEFAULT_OPENAI_URL.to_string(),
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

    fn key(&self) -> Result<&str, SeezoError> {
        self.api_key.as_deref().ok_or_else(|| missing_key("OpenAI"))
    }

    async fn chat(&self, api_key: &str, prompt: &str, options: &GenerationOptions) -> Result<Value, SeezoError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("OpenAI", e))?;

        read_json("OpenAI", resp).await
    }

    async fn fetch_models(&self, api_key: &str) -> Result<Vec<String>, SeezoError> {
        let resp = self
            .client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
            .timeout(self.timeouts.validation)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("OpenAI", e))?;

        let data = read_json("OpenAI", resp).await?;
        let models = data["data"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|m| m["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok(models)
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
        let data = self.chat(self.key()?, prompt, options).await?;

        let content = data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| SeezoError::LLMApi("No content in OpenAI response".into()))?
            .to_string();
        let input_tokens = data["usage"]["prompt_tokens"].as_u64();
        let output_tokens = data["usage"]["completion_tokens"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "OpenAI completion");

        Ok(LLMResponse { content, input_tokens, output_tokens, model: self.model.clone() })
    }

    async fn validate_credentials(&self) -> bool {
        info!(model = %self.model, "Validating OpenAI API key");
        let Ok(api_key) = self.key() else {
            warn!("No OpenAI API key configured");
            return false;
        };
        // Any 2xx counts; a 1-token reply may carry no text.
        match self.chat(api_key, "test", &GenerationOptions::probe(&self.timeouts)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "OpenAI credential check failed");
                false
            }
        }
    }

    async fn list_available_models(&self) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return catalog::model_ids("openai");
        };
        match self.fetch_models(api_key).await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Failed to fetch OpenAI models");
                Vec::new()
            }
        }
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity { name: "OpenAI".to_string(), is_local: false }
    }

    fn model_name(&self) -> &str { &self.model }

    fn timeouts(&self) -> ProviderTimeouts { self.timeouts }
}
