use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::credentials::redact_credentials;
use crate::errors::SeezoError;
use crate::models::ProviderIdentity;
use super::catalog;
use super::provider::{missing_key, read_json, LLMProvider};
use super::types::{GenerationOptions, LLMResponse, ProviderTimeouts};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeouts: ProviderTimeouts,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.is_empty()).map(str::to_string),
            model: model
                .unwrap_or_else(|| catalog::get_default_model("gemini"))
                .to_string(),
            base_url: DEFAULT_GEMINI_URL.to_string(),
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

    /// The key travels in the query string, so strip it from anything that
    /// might end up in a result or a log line.
    fn scrub(&self, err: SeezoError) -> SeezoError {
        let Some(key) = self.api_key.as_deref() else {
            return err;
        };
        let clean = |msg: String| redact_credentials(&msg, &[key]);
        match err {
            SeezoError::Network(m) => SeezoError::Network(clean(m)),
            SeezoError::Timeout(m) => SeezoError::Timeout(clean(m)),
            SeezoError::LLMApi(m) => SeezoError::LLMApi(clean(m)),
            SeezoError::Authentication(m) => SeezoError::Authentication(clean(m)),
            other => other,
        }
    }

    async fn generate(&self, api_key: &str, prompt: &str, options: &GenerationOptions) -> Result<Value, SeezoError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": options.temperature,
                "maxOutputTokens": options.max_tokens,
            }
        });

        let resp = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .query(&[("key", api_key)])
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("Gemini", e.without_url()))?;

        read_json("Gemini", resp).await
    }

    fn completion_text(&self, data: &Value) -> Result<LLMResponse, SeezoError> {
        // Blocked prompts come back with no candidates but a feedback block.
        if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
            return Err(SeezoError::LLMApi(format!("Gemini blocked the prompt: {}", reason)));
        }

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                let reason = data["candidates"][0]["finishReason"].as_str().unwrap_or("unknown");
                SeezoError::LLMApi(format!("No content in Gemini response (finish reason {})", reason))
            })?
            .to_string();

        let input_tokens = data["usageMetadata"]["promptTokenCount"].as_u64();
        let output_tokens = data["usageMetadata"]["candidatesTokenCount"].as_u64();
        debug!(model = %self.model, input_tokens, output_tokens, "Gemini completion");

        Ok(LLMResponse { content, input_tokens, output_tokens, model: self.model.clone() })
    }

    async fn fetch_models(&self, api_key: &str) -> Result<Vec<String>, SeezoError> {
        let resp = self
            .client
            .get(format!("{}/models", self.base_url))
            .query(&[("key", api_key)])
            .timeout(self.timeouts.validation)
            .send()
            .await
            .map_err(|e| SeezoError::from_transport("Gemini", e.without_url()))?;

        let data = read_json("Gemini", resp).await?;
        Ok(gemini_model_names(&data))
    }
}

/// Names come back as `models/gemini-pro`; keep the bare id so it can be
/// passed straight back as a model name.
fn gemini_model_names(data: &Value) -> Vec<String> {
    data["models"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|m| m["name"].as_str())
                .filter(|name| name.to_lowercase().contains("gemini"))
                .map(|name| name.strip_prefix("models/").unwrap_or(name).to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| missing_key("Gemini"))?;
        self.generate(api_key, prompt, options)
            .await
            .and_then(|data| self.completion_text(&data))
            .map_err(|e| self.scrub(e))
    }

    async fn validate_credentials(&self) -> bool {
        info!(model = %self.model, "Validating Gemini API key");
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("No Gemini API key configured");
            return false;
        };
        // Any 2xx counts; a 1-token reply often stops with MAX_TOKENS and no parts.
        match self.generate(api_key, "test", &GenerationOptions::probe(&self.timeouts)).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %self.scrub(e), "Gemini credential check failed");
                false
            }
        }
    }

    async fn list_available_models(&self) -> Vec<String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return catalog::model_ids("gemini");
        };
        match self.fetch_models(api_key).await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %self.scrub(e), "Failed to fetch Gemini models");
                Vec::new()
            }
        }
    }

    fn identity(&self) -> ProviderIdentity {
        ProviderIdentity { name: "Gemini".to_string(), is_local: false }
    }

    fn model_name(&self) -> &str { &self.model }

    fn timeouts(&self) -> ProviderTimeouts { self.timeouts }
}
