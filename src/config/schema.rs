use serde_json::{json, Value};
use std::sync::LazyLock;

pub static SETTINGS_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "api_key": { "type": "string" },
            "host": { "type": "string" },
            "port": { "type": "integer", "minimum": 1, "maximum": 65535 },
            "allowed_origins": { "type": "array", "items": { "type": "string" } },
            "default_provider": { "type": "string", "enum": ["ollama", "openai", "anthropic", "gemini"] },
            "default_model": { "type": ["string", "null"] },
            "ollama_base_url": { "type": "string", "format": "uri" },
            "openai_base_url": { "type": "string", "format": "uri" },
            "anthropic_base_url": { "type": "string", "format": "uri" },
            "gemini_base_url": { "type": "string", "format": "uri" },
            "validation_timeout_secs": { "type": "integer", "minimum": 1 },
            "analysis_timeout_secs": { "type": "integer", "minimum": 1 }
        }
    })
});
