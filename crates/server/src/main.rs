use anyhow::Context;
use clap::Parser;
use gleaner_core::{Extractor, HttpFetcher};
use gleaner_server::{AppState, ServerConfig, app};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "gleaner_server=info,gleaner_core=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .init();

    let config = ServerConfig::parse();
    let fetcher = HttpFetcher::new(config.fetch_config()).context("Failed to build HTTP client")?;
    let state = AppState::new(fetcher, Extractor::with_config(config.extractor_config()));
    let router = app(state, config.request_timeout());

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "gleaner-server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
