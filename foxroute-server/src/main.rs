mod app;
mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use foxroute_core::GraphStore;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, ServerConfig};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli)?;

    let store = Arc::new(GraphStore::open(&config.graph_path));
    if config.preload {
        let store = Arc::clone(&store);
        tokio::task::spawn_blocking(move || store.network().map(|_| ()))
            .await?
            .with_context(|| format!("failed to preload {}", config.graph_path.display()))?;
    }

    let app = app::build_app(AppState::new(store), &config);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        addr = %config.bind,
        graph = %config.graph_path.display(),
        "foxroute-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("foxroute-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
