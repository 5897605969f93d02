use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Settings;
use crate::errors::SeezoError;
use crate::models::{AnalysisResult, ProviderRequest, ProviderSelection};
use super::anthropic::AnthropicProvider;
use super::catalog;
use super::gemini::GeminiProvider;
use super::local::OllamaProvider;
use super::openai::OpenAIProvider;
use super::provider::LLMProvider;

/// Builds an adapter for one request from the caller's selection.
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderSelection, &Settings) -> Box<dyn LLMProvider> + Send + Sync>;

/// Picks an adapter by name, gates it on credential validation, and runs
/// the analysis. The name table is filled once at construction.
pub struct Dispatcher {
    settings: Arc<Settings>,
    factories: BTreeMap<String, ProviderFactory>,
}

impl Dispatcher {
    /// Dispatcher with the four built-in backends registered.
    pub fn new(settings: Settings) -> Self {
        let mut dispatcher = Self::empty(settings);
        dispatcher.register("ollama", |sel, settings| {
            Box::new(
                OllamaProvider::new(sel.model_name.as_deref())
                    .with_base_url(&settings.ollama_base_url)
                    .with_timeouts(settings.timeouts()),
            )
        });
        dispatcher.register("openai", |sel, settings| {
            Box::new(
                OpenAIProvider::new(sel.api_key.as_deref(), sel.model_name.as_deref())
                    .with_base_url(&settings.openai_base_url)
                    .with_timeouts(settings.timeouts()),
            )
        });
        dispatcher.register("anthropic", |sel, settings| {
            Box::new(
                AnthropicProvider::new(sel.api_key.as_deref(), sel.model_name.as_deref())
                    .with_base_url(&settings.anthropic_base_url)
                    .with_timeouts(settings.timeouts()),
            )
        });
        dispatcher.register("gemini", |sel, settings| {
            Box::new(
                GeminiProvider::new(sel.api_key.as_deref(), sel.model_name.as_deref())
                    .with_base_url(&settings.gemini_base_url)
                    .with_timeouts(settings.timeouts()),
            )
        });
        dispatcher
    }

    /// Dispatcher with no backends; callers register their own.
    pub fn empty(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            factories: BTreeMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ProviderSelection, &Settings) -> Box<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_ascii_lowercase(), Arc::new(factory));
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Fill in the configured default model when the caller didn't pick one
    /// for the default provider.
    fn resolve(&self, selection: &ProviderSelection) -> ProviderSelection {
        let mut resolved = selection.clone();
        resolved.provider = selection.provider.trim().to_ascii_lowercase();
        resolved.model_name = selection.model_name.clone().filter(|m| !m.trim().is_empty());
        if resolved.model_name.is_none()
            && resolved.provider.eq_ignore_ascii_case(&self.settings.default_provider)
        {
            resolved.model_name = self.settings.default_model.clone();
        }
        resolved
    }

    pub fn create_provider(&self, selection: &ProviderSelection) -> Result<Box<dyn LLMProvider>, SeezoError> {
        let resolved = self.resolve(selection);
        let factory = self.factories.get(&resolved.provider).ok_or_else(|| {
            warn!(requested = %selection.provider, available = ?self.provider_names(), "Unknown provider");
            let label = catalog::get_provider(&resolved.provider)
                .map(|p| p.name)
                .unwrap_or(selection.provider.as_str());
            SeezoError::UnsupportedProvider(label.to_string())
        })?;
        Ok(factory(&resolved, &self.settings))
    }

    pub async fn validate(&self, selection: &ProviderSelection) -> Result<bool, SeezoError> {
        let provider = self.create_provider(selection)?;
        Ok(provider.validate_credentials().await)
    }

    pub async fn list_models(&self, selection: &ProviderSelection) -> Result<Vec<String>, SeezoError> {
        let provider = self.create_provider(selection)?;
        Ok(provider.list_available_models().await)
    }

    /// Select, validate, analyze. Configuration problems are errors; every
    /// outcome of the analysis itself is returned as the adapter produced it.
    pub async fn dispatch(
        &self,
        selection: &ProviderSelection,
        request: ProviderRequest,
    ) -> Result<AnalysisResult, SeezoError> {
        let provider = self.create_provider(selection)?;
        let identity = provider.identity();
        info!(provider = %identity.name, model = provider.model_name(), local = identity.is_local, url = %request.url, "Dispatching analysis");

        if !provider.validate_credentials().await {
            warn!(provider = %identity.name, "Provider validation failed");
            return Err(SeezoError::ProviderConfigInvalid(format!(
                "{} could not be reached or rejected the credentials",
                identity.name
            )));
        }

        self.analyze_with(Arc::from(provider), request).await
    }

    /// Run the analysis on its own task so a panicking adapter still yields
    /// an error-shaped result.
    async fn analyze_with(
        &self,
        provider: Arc<dyn LLMProvider>,
        request: ProviderRequest,
    ) -> Result<AnalysisResult, SeezoError> {
        let model = provider.model_name().to_string();
        let task = tokio::spawn(async move { provider.analyze_security(&request).await });
        match task.await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(model = %model, error = %e, "Analysis task aborted");
                Ok(AnalysisResult::failure(&model, format!("Analysis task failed: {}", e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{GenerationOptions, LLMResponse};
    use crate::models::{AnalysisStatus, ProviderIdentity};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Default)]
    struct Calls {
        validate: AtomicU32,
        complete: AtomicU32,
    }

    struct SpyProvider {
        calls: Arc<Calls>,
        valid: bool,
        reply: String,
        model: String,
    }

    #[async_trait]
    impl LLMProvider for SpyProvider {
        async fn complete(&self, _prompt: &str, _options: &GenerationOptions) -> Result<LLMResponse, SeezoError> {
            self.calls.complete.fetch_add(1, Ordering::SeqCst);
            if self.reply == "panic" {
                panic!("adapter bug");
            }
            Ok(LLMResponse { content: self.reply.clone(), input_tokens: None, output_tokens: None, model: self.model.clone() })
        }

        async fn validate_credentials(&self) -> bool {
            self.calls.validate.fetch_add(1, Ordering::SeqCst);
            self.valid
        }

        async fn list_available_models(&self) -> Vec<String> { vec![self.model.clone()] }

        fn identity(&self) -> ProviderIdentity {
            ProviderIdentity { name: "Spy".into(), is_local: false }
        }

        fn model_name(&self) -> &str { &self.model }
    }

    fn spy_dispatcher(valid: bool, reply: &str) -> (Dispatcher, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let mut dispatcher = Dispatcher::empty(Settings::default());
        let shared = calls.clone();
        let reply = reply.to_string();
        dispatcher.register("spy", move |sel, _| {
            Box::new(SpyProvider {
                calls: shared.clone(),
                valid,
                reply: reply.clone(),
                model: sel.model_name.clone().unwrap_or_else(|| "spy-default".into()),
            })
        });
        (dispatcher, calls)
    }

    fn request() -> ProviderRequest {
        ProviderRequest::new("<html></html>", "https://a.example")
    }

    #[tokio::test]
    async fn test_unknown_provider_makes_no_calls() {
        let (dispatcher, calls) = spy_dispatcher(true, "{}");
        let err = dispatcher.dispatch(&ProviderSelection::new("bogus"), request()).await.unwrap_err();
        assert!(matches!(err, SeezoError::UnsupportedProvider(_)));
        assert_eq!(calls.validate.load(Ordering::SeqCst), 0);
        assert_eq!(calls.complete.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_validation_short_circuits() {
        let (dispatcher, calls) = spy_dispatcher(false, "{}");
        let err = dispatcher.dispatch(&ProviderSelection::new("spy"), request()).await.unwrap_err();
        assert!(matches!(err, SeezoError::ProviderConfigInvalid(_)));
        assert_eq!(calls.validate.load(Ordering::SeqCst), 1);
        assert_eq!(calls.complete.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_is_passed_through_unchanged() {
        let (dispatcher, calls) = spy_dispatcher(true, "garbage without json");
        let selection = ProviderSelection {
            provider: "SPY".into(),
            model_name: Some("spy-large".into()),
            api_key: None,
        };
        let result = dispatcher.dispatch(&selection, request()).await.unwrap();
        assert_eq!(result.status, AnalysisStatus::Error);
        assert_eq!(result.model_used, "spy-large");
        assert_eq!(calls.complete.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_dispatch() {
        let (dispatcher, _) = spy_dispatcher(true, r#"{"recommendations":["Enable CSP"],"confidence_score":0.6}"#);
        let result = dispatcher.dispatch(&ProviderSelection::new("spy"), request()).await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.recommendations, vec!["Enable CSP".to_string()]);
    }

    #[tokio::test]
    async fn test_panicking_adapter_becomes_error_result() {
        let (dispatcher, _) = spy_dispatcher(true, "panic");
        let result = dispatcher.dispatch(&ProviderSelection::new("spy"), request()).await.unwrap();
        assert_eq!(result.status, AnalysisStatus::Error);
        assert_eq!(result.model_used, "spy-default");
        assert!(result.is_consistent());
    }

    #[tokio::test]
    async fn test_default_model_applies_to_default_provider() {
        let settings = Settings {
            default_provider: "ollama".into(),
            default_model: Some("llama3".into()),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(settings);
        let provider = dispatcher.create_provider(&ProviderSelection::new("Ollama")).unwrap();
        assert_eq!(provider.model_name(), "llama3");

        let provider = dispatcher.create_provider(&ProviderSelection::new("openai")).unwrap();
        assert_eq!(provider.model_name(), "gpt-4");
    }

    #[test]
    fn test_builtin_providers_registered() {
        let dispatcher = Dispatcher::new(Settings::default());
        assert_eq!(dispatcher.provider_names(), vec!["anthropic", "gemini", "ollama", "openai"]);
    }

    #[test]
    fn test_identity_of_builtins() {
        let dispatcher = Dispatcher::new(Settings::default());
        let local = dispatcher.create_provider(&ProviderSelection::new("ollama")).unwrap();
        assert!(local.identity().is_local);
        let cloud = dispatcher.create_provider(&ProviderSelection::new("gemini")).unwrap();
        assert!(!cloud.identity().is_local);
    }
}
