use std::path::Path;

use crate::errors::SeezoError;
use super::credentials::resolve_credential;
use super::schema::SETTINGS_SCHEMA;
use super::types::Settings;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Defaults, then the YAML file if one is given, then `SEEZO_*` variables.
pub async fn load_settings(path: Option<&Path>) -> Result<Settings, SeezoError> {
    let mut settings = match path {
        Some(path) => parse_settings_file(path).await?,
        None => Settings::default(),
    };

    settings.apply_overrides(|name| std::env::var(name).ok())?;
    settings.api_key = resolve_credential(&settings.api_key);
    settings.validate()?;

    debug!(
        provider = %settings.default_provider,
        addr = %settings.bind_addr(),
        auth_enabled = !settings.api_key.is_empty(),
        "Settings loaded"
    );
    Ok(settings)
}

pub async fn parse_settings_file(path: &Path) -> Result<Settings, SeezoError> {
    if !path.exists() {
        return Err(SeezoError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(SeezoError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if yaml.is_null() {
        return Ok(Settings::default());
    }

    validate_schema(&yaml)?;

    let settings: Settings = serde_yaml::from_value(yaml)?;
    Ok(settings)
}

/// Schema problems are logged, not fatal; typed parsing decides what is fatal.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), SeezoError> {
    let json_str = serde_json::to_string(yaml)
        .map_err(|e| SeezoError::Config(format!("Config conversion error: {}", e)))?;
    let json_value: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| SeezoError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&SETTINGS_SCHEMA)
        .map_err(|e| SeezoError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}
