use clap::Parser;
use tracing_subscriber::EnvFilter;

use seezo::cli::{self, Cli, Commands};
use seezo::config;
use seezo::errors::SeezoError;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_ansi(!cli.no_color)
            .init();
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            SeezoError::Config(_) | SeezoError::UnsupportedProvider(_) => 2,
            SeezoError::Authentication(_) | SeezoError::ProviderConfigInvalid(_) => 4,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: Cli) -> Result<(), SeezoError> {
    let settings = config::load_settings(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args, settings).await,
        Commands::Analyze(args) => cli::analyze::handle_analyze(args, settings).await,
        Commands::Models(args) => cli::provider::handle_models(args, settings).await,
        Commands::Validate(args) => cli::provider::handle_validate(args, settings).await,
    }
}
