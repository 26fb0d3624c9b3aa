//! Genre trends HTTP server.
//!
//! Loads the dataset once, aggregates it, then serves queries until stopped.

use anyhow::{Context, Result};
use tracing::info;

use data_loader::Dataset;
use server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,pipeline=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!("Starting genre trends server");

    // The loader uses a blocking HTTP client; keep it off the async workers
    let sources = config.sources.clone();
    let dataset = tokio::task::spawn_blocking(move || Dataset::load(&sources))
        .await
        .context("Dataset loading task panicked")?
        .context("Failed to load MovieLens dataset")?;

    let state = AppState::from_dataset(&dataset);
    info!(
        "Aggregated {} movies into {} years (span {:?})",
        state.stats.movies,
        state.table.len(),
        state.stats.year_span
    );

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {}", addr);

    axum::serve(listener, server::app(state))
        .await
        .context("Server error")?;

    Ok(())
}
