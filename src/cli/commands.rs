use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "seezo", version, about = "Privacy-first security review of web pages through local or cloud LLMs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API used by the browser extension
    Serve(ServeArgs),
    /// Analyze a saved HTML page and print the result as JSON
    Analyze(AnalyzeArgs),
    /// List models a provider can serve
    Models(ProviderArgs),
    /// Check that a provider is reachable and accepts the credentials
    Validate(ProviderArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen address (overrides settings)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides settings)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Args, Clone)]
pub struct ProviderArgs {
    /// AI provider: ollama, openai, anthropic, gemini
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model identifier (provider default when omitted)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Provider API key (falls back to the provider's environment variable)
    #[arg(long)]
    pub api_key: Option<String>,
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// URL the page was rendered from
    #[arg(short, long)]
    pub url: String,

    /// File holding the rendered HTML; `-` reads stdin
    #[arg(long)]
    pub html: PathBuf,

    /// Extra context as a JSON object
    #[arg(long)]
    pub context: Option<String>,

    /// Skip the credential check before analysis
    #[arg(long)]
    pub skip_validation: bool,

    #[command(flatten)]
    pub provider: ProviderArgs,
}
