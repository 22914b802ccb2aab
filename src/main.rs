// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::chart_registry::ChartRegistry;
use crate::application::dataset::Dataset;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::csv_source::CsvDatasetSource;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("Failed to load configuration")?;

    // Load the dataset once; no dashboard without data
    let source = CsvDatasetSource::new(&config.dataset.path, &config.dataset.delimiter)?;
    let dataset = Arc::new(Dataset::load(&source).await?);

    // Create application state
    let registry = ChartRegistry::new(dataset, config.charts);
    let state = Arc::new(AppState::new(registry));

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting llamados dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
