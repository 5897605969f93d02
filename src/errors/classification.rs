use super::types::SeezoError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl SeezoError {
    /// Classify this error for logging and for callers deciding whether to
    /// re-invoke the dispatcher.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Transient backend conditions
            SeezoError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            SeezoError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            SeezoError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            SeezoError::LLMApi(_) => ErrorClassification {
                error_type: "LLMApiError",
                retryable: true,
            },

            // Caller has to change something first
            SeezoError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            SeezoError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            SeezoError::UnsupportedProvider(_) => ErrorClassification {
                error_type: "UnsupportedProviderError",
                retryable: false,
            },
            SeezoError::ProviderConfigInvalid(_) => ErrorClassification {
                error_type: "ProviderConfigInvalidError",
                retryable: false,
            },
            SeezoError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },

            SeezoError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },
            SeezoError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: true,
            },
            SeezoError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: true,
            },
        }
    }

    /// True for the dispatcher-level rejections that happen before any
    /// analysis call is made.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SeezoError::Config(_)
                | SeezoError::UnsupportedProvider(_)
                | SeezoError::ProviderConfigInvalid(_)
        )
    }
}
