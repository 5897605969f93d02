use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::SeezoError;
use crate::llm::anthropic::DEFAULT_ANTHROPIC_URL;
use crate::llm::gemini::DEFAULT_GEMINI_URL;
use crate::llm::local::DEFAULT_OLLAMA_URL;
use crate::llm::openai::DEFAULT_OPENAI_URL;
use crate::llm::types::ProviderTimeouts;

/// Read-only configuration injected into the dispatcher and the HTTP layer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Shared secret for the `X-API-Key` header. Empty disables the check.
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub default_provider: String,
    pub default_model: Option<String>,
    pub ollama_base_url: String,
    pub openai_base_url: String,
    pub anthropic_base_url: String,
    pub gemini_base_url: String,
    pub validation_timeout_secs: u64,
    pub analysis_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![
                "chrome-extension://*".to_string(),
                "moz-extension://*".to_string(),
            ],
            default_provider: "ollama".to_string(),
            default_model: None,
            ollama_base_url: DEFAULT_OLLAMA_URL.to_string(),
            openai_base_url: DEFAULT_OPENAI_URL.to_string(),
            anthropic_base_url: DEFAULT_ANTHROPIC_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_URL.to_string(),
            validation_timeout_secs: 10,
            analysis_timeout_secs: 120,
        }
    }
}

impl Settings {
    pub fn timeouts(&self) -> ProviderTimeouts {
        ProviderTimeouts {
            validation: Duration::from_secs(self.validation_timeout_secs),
            analysis: Duration::from_secs(self.analysis_timeout_secs),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply `SEEZO_*` overrides. `lookup` is `std::env::var` in production.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SeezoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(v) = get("SEEZO_API_KEY") { self.api_key = v; }
        if let Some(v) = get("SEEZO_HOST") { self.host = v; }
        if let Some(v) = get("SEEZO_PORT") { self.port = parse_number("SEEZO_PORT", &v)?; }
        if let Some(v) = get("SEEZO_DEFAULT_PROVIDER") { self.default_provider = v; }
        if let Some(v) = get("SEEZO_DEFAULT_MODEL") { self.default_model = Some(v); }
        if let Some(v) = get("SEEZO_OLLAMA_URL") { self.ollama_base_url = v; }
        if let Some(v) = get("SEEZO_OPENAI_URL") { self.openai_base_url = v; }
        if let Some(v) = get("SEEZO_ANTHROPIC_URL") { self.anthropic_base_url = v; }
        if let Some(v) = get("SEEZO_GEMINI_URL") { self.gemini_base_url = v; }
        if let Some(v) = get("SEEZO_VALIDATION_TIMEOUT_SECS") {
            self.validation_timeout_secs = parse_number("SEEZO_VALIDATION_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("SEEZO_ANALYSIS_TIMEOUT_SECS") {
            self.analysis_timeout_secs = parse_number("SEEZO_ANALYSIS_TIMEOUT_SECS", &v)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SeezoError> {
        if self.validation_timeout_secs == 0 || self.analysis_timeout_secs == 0 {
            return Err(SeezoError::Config("Timeouts must be at least one second".into()));
        }
        if self.default_provider.trim().is_empty() {
            return Err(SeezoError::Config("default_provider must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, SeezoError> {
    value
        .trim()
        .parse()
        .map_err(|_| SeezoError::Config(format!("{} must be a number, got '{}'", name, value)))
}
