use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::errors::SeezoError;
use crate::models::ProviderIdentity;
use super::catalog;
use super::provider::{missing_key, read_json, LLMProvider};
use super::types::{GenerationOptions, LLMResponse, ProviderTimeouts};

pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeouts: ProviderTimeouts,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
            model: model
                .unwrap_or_else(|| catalog::get_default_model("anthropic"))
                .to_string(),
            base_url: DEFAULT_ANTHROPIC_URL.to_string(),
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
        self.api_key.as_deref().ok_or_else(|| missing_key("Anthropic"))
    }

    async fn messages(&self, api_key: &str, prompt: &str, options: &GenerationOptions) -> Result<Value, SeezoError> {
        let body = json!({
            "model": self.model,
            "max_tokens": options.max_tokens,
            "temperature": options.temperature,
            "messages": [{"role": "user", "content": prompt}]
        });

        let resp = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("Anthropic", e))?;

        read_json("Anthropic", resp).await
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
        let data = self.messages(self.key()?, prompt, options).await?;

        let content = data["content"][0]["text"]
            .as_str()
            .ok_or_else(|| SeezoError::LLMApi("No content in Anthropic response".into()))?
            .to_string();

        let input_tokens = data["usage"]["input_tokens"].as_u64();
        let output_tokens = data["usage"]["output_tokens"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Anthropic completion");

        Ok(LLMResponse { content, input_tokens, output_tokens, model: self.model.clone() })
    }

    async fn validate_credentials(&self) -> bool {
        info!(model = %self.model, "Validating Anthropic API key");
        let Ok(api_key) = self.key() else {
            warn!("No Anthropic API key configured");
            return false;
        };
        // Any 2xx counts; a 1-token reply may carry no text.
        match self.messages(api_key, "test", &GenerationOptions::probe(&self.timeouts)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Anthropic credential check failed");
                false
            }
        }
    }

    /// Anthropic has no listing call we rely on; serve the catalog.
    async fn list_available_models(&self) -> Vec<String> {
        catalog::model_ids("anthropic")
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity { name: "Anthropic".to_string(), is_local: false }
    }

    fn model_name(&self) -> &str { &self.model }

    fn timeouts(&self) -> ProviderTimeouts { self.timeouts }
}
