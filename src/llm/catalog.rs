pub struct ProviderInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub env_var: &'static str,
    pub models: &'static [ModelInfo],
}

pub struct ModelInfo {
    pub id: &'static str,
    pub recommended: bool,
}

pub static PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        id: "ollama",
        name: "Ollama",
        env_var: "",
        models: &[
            ModelInfo { id: "mistral", recommended: true },
            ModelInfo { id: "llama3", recommended: false },
        ],
    },
    ProviderInfo {
        id: "openai",
        name: "OpenAI",
        env_var: "OPENAI_API_KEY",
        models: &[
            ModelInfo { id: "gpt-4", recommended: true },
            ModelInfo { id: "gpt-4-turbo-preview", recommended: false },
            ModelInfo { id: "gpt-3.5-turbo", recommended: false },
            ModelInfo { id: "gpt-3.5-turbo-16k", recommended: false },
        ],
    },
    ProviderInfo {
        id: "anthropic",
        name: "Anthropic",
        env_var: "ANTHROPIC_API_KEY",
        models: &[
            ModelInfo { id: "claude-3-opus-20240229", recommended: true },
            ModelInfo { id: "claude-3-sonnet-20240229", recommended: false },
            ModelInfo { id: "claude-3-haiku-20240307", recommended: false },
            ModelInfo { id: "claude-2.1", recommended: false },
            ModelInfo { id: "claude-2.0", recommended: false },
            ModelInfo { id: "claude-instant-1.2", recommended: false },
        ],
    },
    ProviderInfo {
        id: "gemini",
        name: "Gemini",
        env_var: "GEMINI_API_KEY",
        models: &[
            ModelInfo { id: "gemini-pro", recommended: true },
            ModelInfo { id: "gemini-pro-vision", recommended: false },
            ModelInfo { id: "gemini-1.0-pro", recommended: false },
            ModelInfo { id: "gemini-1.0-pro-vision", recommended: false },
        ],
    },
];

pub fn get_provider(id: &str) -> Option<&'static ProviderInfo> {
    PROVIDERS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

pub fn get_default_model(provider_id: &str) -> &'static str {
    if let Some(provider) = get_provider(provider_id) {
        provider.models.iter()
            .find(|m| m.recommended)
            .map(|m| m.id)
            .unwrap_or(provider.models[0].id)
    } else {
        "mistral"
    }
}

pub fn model_ids(provider_id: &str) -> Vec<String> {
    get_provider(provider_id)
        .map(|p| p.models.iter().map(|m| m.id.to_string()).collect())
        .unwrap_or_default()
}

/// API key from the provider's conventional environment variable, if set.
pub fn api_key_from_env(provider_id: &str) -> Option<String> {
    let provider = get_provider(provider_id)?;
    if provider.env_var.is_empty() {
        return None;
    }
    std::env::var(provider.env_var).ok().filter(|k| !k.is_empty())
}
