pub mod commands;
pub mod serve;
pub mod analyze;
pub mod provider;

pub use commands::{Cli, Commands};

use crate::config::Settings;
use crate::llm::catalog;
use crate::models::ProviderSelection;
use commands::ProviderArgs;

/// Turn CLI provider flags into a selection, filling the key from the
/// provider's conventional environment variable when not given.
pub fn selection_from_args(args: &ProviderArgs, settings: &Settings) -> ProviderSelection {
    let provider = args
        .provider
        .clone()
        .unwrap_or_else(|| settings.default_provider.clone());
    let api_key = args
        .api_key
        .clone()
        .or_else(|| catalog::api_key_from_env(&provider));

    ProviderSelection {
        provider,
        model_name: args.model.clone(),
        api_key,
    }
}
