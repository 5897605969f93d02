use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::Settings;
use crate::errors::SeezoError;
use crate::llm::Dispatcher;
use tracing::{info, warn};

pub async fn handle_serve(args: ServeArgs, mut settings: Settings) -> Result<(), SeezoError> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if settings.api_key.is_empty() {
        warn!("SEEZO_API_KEY is not set; the API accepts unauthenticated requests");
    }

    let addr = settings.bind_addr();
    info!(addr = %addr, default_provider = %settings.default_provider, "Starting API server");

    let state = api::AppState::new(Dispatcher::new(settings));
    let app = api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SeezoError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
