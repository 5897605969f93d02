use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeezoError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    #[error("Invalid provider configuration: {0}")]
    ProviderConfigInvalid(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SeezoError {
    /// Map a transport failure from reqwest onto the backend error kinds.
    pub fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SeezoError::Timeout(format!("{} request timed out: {}", provider, err))
        } else if err.is_decode() {
            SeezoError::LLMApi(format!("Failed to parse {} response: {}", provider, err))
        } else {
            SeezoError::Network(format!("{} request failed: {}", provider, err))
        }
    }
}
