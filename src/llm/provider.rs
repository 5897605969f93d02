use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::errors::SeezoError;
use crate::extract::{extract, into_analysis_result};
use crate::models::{AnalysisResult, ProviderIdentity, ProviderRequest};
use crate::prompts::build_prompt;
use super::types::{GenerationOptions, LLMResponse, ProviderTimeouts};

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send one prompt to the backend and return its raw text reply.
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<LLMResponse, SeezoError>;

    /// One lightweight round trip to confirm the backend is reachable and
    /// the credentials are accepted. Any failure is `false`.
    async fn validate_credentials(&self) -> bool;

    /// Models this backend can serve. Failure yields an empty list.
    async fn list_available_models(&self) -> Vec<String>;

    fn identity(&self) -> ProviderIdentity;

    /// Model identifier stamped into every result
    fn model_name(&self) -> &str;

    fn timeouts(&self) -> ProviderTimeouts {
        ProviderTimeouts::default()
    }

    /// Analyze one page. Never fails: backend and parsing problems come back
    /// as an error-shaped [`AnalysisResult`].
    async fn analyze_security(&self, request: &ProviderRequest) -> AnalysisResult {
        run_analysis(self, request).await
    }
}

/// Prompt, call, extract, stamp. Shared by every adapter.
pub async fn run_analysis<P>(provider: &P, request: &ProviderRequest) -> AnalysisResult
where
    P: LLMProvider + ?Sized,
{
    let identity = provider.identity();
    let model = provider.model_name();
    info!(
        provider = %identity.name,
        model,
        url = %request.url,
        html_len = request.html_content.len(),
        "Starting security analysis"
    );

    let prompt = build_prompt(&request.html_content, &request.url, request.context.as_ref());
    debug!(prompt_len = prompt.len(), "Built analysis prompt");

    let options = GenerationOptions::analysis(&provider.timeouts());
    match provider.complete(&prompt, &options).await {
        Ok(response) => {
            debug!(
                response_len = response.content.len(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                "Received model response"
            );
            let outcome = extract(&response.content);
            if let Err(e) = &outcome {
                warn!(provider = %identity.name, model, error = %e, "Could not extract analysis from model output");
            }
            let result = into_analysis_result(outcome, model);
            if result.is_success() {
                info!(
                    provider = %identity.name,
                    vulnerabilities = result.vulnerabilities.len(),
                    sensitive_assets = result.sensitive_assets.len(),
                    confidence = result.confidence_score,
                    "Analysis completed"
                );
            }
            result
        }
        Err(e) => {
            let class = e.classify();
            error!(
                provider = %identity.name,
                model,
                error_type = class.error_type,
                retryable = class.retryable,
                error = %e,
                "Analysis call failed"
            );
            AnalysisResult::failure(model, e.to_string())
        }
    }
}

/// Decode a backend reply, turning HTTP-level failures into typed errors.
pub(crate) async fn read_json(provider: &str, resp: Response) -> Result<Value, SeezoError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SeezoError::RateLimit(format!("{} rate limit exceeded", provider)));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(SeezoError::Authentication(format!("{} rejected the API key", provider)));
    }

    // Error bodies may come from a proxy and need not be JSON.
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|data| backend_error_message(&data));
        let msg = match detail {
            Some(detail) => format!("{} returned HTTP {}: {}", provider, status.as_u16(), detail),
            None => format!("{} returned HTTP {}", provider, status.as_u16()),
        };
        return Err(SeezoError::LLMApi(msg));
    }

    let data: Value = resp
        .json()
        .await
        .map_err(|e| SeezoError::LLMApi(format!("Failed to parse {} response: {}", provider, e)))?;

    if let Some(msg) = backend_error_message(&data) {
        return Err(SeezoError::LLMApi(format!("{}: {}", provider, msg)));
    }

    Ok(data)
}

/// `{"error": {"message": ..}}` or `{"error": ".."}`.
fn backend_error_message(data: &Value) -> Option<String> {
    let err = data.get("error").filter(|e| !e.is_null())?;
    let msg = err["message"]
        .as_str()
        .or_else(|| err.as_str())
        .unwrap_or("Unknown error");
    Some(msg.to_string())
}

pub(crate) fn missing_key(provider: &str) -> SeezoError {
    SeezoError::Authentication(format!("No {} API key configured", provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisStatus;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedProvider {
        reply: Result<String, String>,
        calls: AtomicU32,
    }

    impl ScriptedProvider {
        fn replying(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), calls: AtomicU32::new(0) }
        }

        fn failing(msg: &str) -> Self {
            Self { reply: Err(msg.to_string()), calls: AtomicU32::new(0) }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, _prompt: &str, options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(options.max_tokens, 4000);
            match &self.reply {
                Ok(text) => Ok(LLMResponse {
                    content: text.clone(),
                    input_tokens: None,
                    output_tokens: None,
                    model: "scripted-1".into(),
                }),
                Err(msg) => Err(SeezoError::Timeout(msg.clone())),
            }
        }

        async fn validate_credentials(&self) -> bool { true }
        async fn list_available_models(&self) -> Vec<String> { vec!["scripted-1".into()] }
        fn identity(&self) -> ProviderIdentity {
            ProviderIdentity { name: "Scripted".into(), is_local: true }
        }
        fn model_name(&self) -> &str { "scripted-1" }
    }

    fn request() -> ProviderRequest {
        ProviderRequest::new("<html><body><form action=\"/login\"></form></body></html>", "https://a.example")
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_error_result() {
        let provider = ScriptedProvider::failing("deadline elapsed");
        let result = provider.analyze_security(&request()).await;
        assert_eq!(result.status, AnalysisStatus::Error);
        assert_eq!(result.model_used, "scripted-1");
        assert!(result.error.as_deref().unwrap().contains("deadline elapsed"));
        assert!(result.is_consistent());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_reply_is_extracted() {
        let provider = ScriptedProvider::replying(
            "Sure!\n{\"vulnerabilities\":[{\"type\":\"CSRF\",\"description\":\"no token\",\"severity\":\"medium\",\"location\":\"form\"}],\"sensitive_assets\":[],\"recommendations\":[\"Add CSRF tokens\"],\"confidence_score\":0.8}",
        );
        let result = provider.analyze_security(&request()).await;
        assert_eq!(result.status, AnalysisStatus::Success);
        assert_eq!(result.vulnerabilities.len(), 1);
        assert_eq!(result.recommendations, vec!["Add CSRF tokens".to_string()]);
        assert_eq!(result.model_used, "scripted-1");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_error_result() {
        let provider = ScriptedProvider::replying("I cannot help with that.");
        let result = provider.analyze_security(&request()).await;
        assert_eq!(result.status, AnalysisStatus::Error);
        assert!(result.error.as_deref().unwrap().contains("No JSON object found"));
    }
}
