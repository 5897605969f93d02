use std::io::Write;

use seezo::config::load_settings;
use seezo::errors::SeezoError;
use seezo::llm::Dispatcher;
use seezo::models::{AnalysisStatus, ProviderRequest, ProviderSelection};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const DEAD_BACKENDS: &str = r#"
port: 9100
default_provider: ollama
default_model: llama3
ollama_base_url: http://127.0.0.1:1
openai_base_url: http://127.0.0.1:1/v1
validation_timeout_secs: 2
analysis_timeout_secs: 2
"#;

#[tokio::test]
async fn test_settings_file_feeds_dispatcher() {
    let file = write_config(DEAD_BACKENDS);
    let settings = load_settings(Some(file.path())).await.unwrap();
    assert_eq!(settings.port, 9100);
    assert_eq!(settings.default_model.as_deref(), Some("llama3"));

    let dispatcher = Dispatcher::new(settings);
    let provider = dispatcher.create_provider(&ProviderSelection::new("Ollama")).unwrap();
    assert_eq!(provider.model_name(), "llama3");
    assert!(provider.identity().is_local);
}

#[tokio::test]
async fn test_unreachable_ollama_fails_validation() {
    let file = write_config(DEAD_BACKENDS);
    let settings = load_settings(Some(file.path())).await.unwrap();
    let dispatcher = Dispatcher::new(settings);

    let selection = ProviderSelection::new("ollama");
    assert!(!dispatcher.validate(&selection).await.unwrap());
    assert!(dispatcher.list_models(&selection).await.unwrap().is_empty());

    let err = dispatcher
        .dispatch(&selection, ProviderRequest::new("<html></html>", "https://a.example"))
        .await
        .unwrap_err();
    assert!(matches!(err, SeezoError::ProviderConfigInvalid(_)));
}

#[tokio::test]
async fn test_unreachable_backend_analysis_is_error_result() {
    let file = write_config(DEAD_BACKENDS);
    let settings = load_settings(Some(file.path())).await.unwrap();
    let dispatcher = Dispatcher::new(settings);

    let selection = ProviderSelection {
        provider: "openai".into(),
        model_name: Some("gpt-4".into()),
        api_key: Some("sk-test-not-real".into()),
    };
    let provider = dispatcher.create_provider(&selection).unwrap();
    let result = provider
        .analyze_security(&ProviderRequest::new("<html></html>", "https://a.example"))
        .await;

    assert_eq!(result.status, AnalysisStatus::Error);
    assert_eq!(result.model_used, "gpt-4");
    assert_eq!(result.confidence_score, 0.0);
    assert!(result.vulnerabilities.is_empty());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_missing_config_file() {
    let err = load_settings(Some(std::path::Path::new("/nonexistent/seezo.yaml")))
        .await
        .unwrap_err();
    assert!(matches!(err, SeezoError::Config(_)));
}

#[tokio::test]
async fn test_zero_timeout_is_rejected() {
    let file = write_config("analysis_timeout_secs: 0\n");
    let err = load_settings(Some(file.path())).await.unwrap_err();
    assert!(matches!(err, SeezoError::Config(_)));
}
