use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Output tokens are capped here; a full verdict fits comfortably.
pub const ANALYSIS_MAX_TOKENS: u32 = 4000;
/// Low temperature keeps the output format stable across calls.
pub const ANALYSIS_TEMPERATURE: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
    pub content: String,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub model: String,
}

/// Per-call deadlines enforced by every adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderTimeouts {
    pub validation: Duration,
    pub analysis: Duration,
}

impl Default for ProviderTimeouts {
    fn default() -> Self {
        Self {
            validation: Duration::from_secs(10),
            analysis: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl GenerationOptions {
    /// Settings for a full security analysis.
    pub fn analysis(timeouts: &ProviderTimeouts) -> Self {
        Self {
            temperature: ANALYSIS_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
            timeout: timeouts.analysis,
        }
    }

    /// Smallest possible round trip, used to check credentials.
    pub fn probe(timeouts: &ProviderTimeouts) -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 1,
            timeout: timeouts.validation,
        }
    }
}
