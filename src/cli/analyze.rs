use std::path::Path;

use serde_json::{Map, Value};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::cli::commands::AnalyzeArgs;
use crate::cli::selection_from_args;
use crate::config::Settings;
use crate::errors::SeezoError;
use crate::llm::Dispatcher;
use crate::models::ProviderRequest;

pub async fn handle_analyze(args: AnalyzeArgs, settings: Settings) -> Result<(), SeezoError> {
    let html = read_html(&args.html).await?;
    let mut request = ProviderRequest::new(html, args.url.clone());
    if let Some(raw) = &args.context {
        request = request.with_context(parse_context(raw)?);
    }

    let selection = selection_from_args(&args.provider, &settings);
    let dispatcher = Dispatcher::new(settings);

    let result = if args.skip_validation {
        info!(provider = %selection.provider, "Skipping credential check");
        let provider = dispatcher.create_provider(&selection)?;
        provider.analyze_security(&request).await
    } else {
        dispatcher.dispatch(&selection, request).await?
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn read_html(path: &Path) -> Result<String, SeezoError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        return Ok(buf);
    }
    if !path.exists() {
        return Err(SeezoError::Config(format!("HTML file not found: {}", path.display())));
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

pub fn parse_context(raw: &str) -> Result<Map<String, Value>, SeezoError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(SeezoError::Config("--context must be a JSON object".into())),
    }
}
