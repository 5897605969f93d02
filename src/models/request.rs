use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Rendered page handed in by the browser extension or automation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub html_content: String,
    pub url: String,
    #[serde(default)]
    pub context: Option<Map<String, Value>>,
}

impl ProviderRequest {
    pub fn new(html_content: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            html_content: html_content.into(),
            url: url.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }
}

/// Which backend to use for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSelection {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl ProviderSelection {
    pub fn new(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            ..Default::default()
        }
    }
}

/// Fixed descriptor of an adapter. `is_local` means no page data leaves the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub name: String,
    pub is_local: bool,
}
