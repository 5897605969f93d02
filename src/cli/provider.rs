use crate::cli::commands::ProviderArgs;
use crate::cli::selection_from_args;
use crate::config::Settings;
use crate::errors::SeezoError;
use crate::llm::Dispatcher;

pub async fn handle_models(args: ProviderArgs, settings: Settings) -> Result<(), SeezoError> {
    let selection = selection_from_args(&args, &settings);
    let dispatcher = Dispatcher::new(settings);

    let models = dispatcher.list_models(&selection).await?;
    if models.is_empty() {
        eprintln!("No models available from {}", selection.provider);
    }
    for model in models {
        println!("{}", model);
    }
    Ok(())
}

pub async fn handle_validate(args: ProviderArgs, settings: Settings) -> Result<(), SeezoError> {
    let selection = selection_from_args(&args, &settings);
    let dispatcher = Dispatcher::new(settings);

    let provider = dispatcher.create_provider(&selection)?;
    let identity = provider.identity();
    let locality = if identity.is_local { "local" } else { "cloud" };

    if provider.validate_credentials().await {
        println!("{} ({}, model {}) is ready", identity.name, locality, provider.model_name());
        Ok(())
    } else {
        Err(SeezoError::ProviderConfigInvalid(format!(
            "{} could not be reached or rejected the credentials for model {}",
            identity.name,
            provider.model_name()
        )))
    }
}
