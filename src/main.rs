//! Workplace Injury Dashboard
//!
//! Serves aggregates and charts over the OSHA ITA injury dataset to a browser.

mod charts;
mod config;
mod data;
mod stats;
mod web;

use anyhow::Context;
use clap::Parser;
use config::Config;
use data::DataLoader;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use web::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    // Load once; every render pass reads the same table
    let dataset = DataLoader::load_csv(&config.data, config.max_rows)
        .with_context(|| format!("loading dataset {}", config.data.display()))?;
    info!(
        path = ?dataset.source(),
        rows = dataset.row_count(),
        columns = dataset.columns().len(),
        "dataset loaded"
    );

    let missing = dataset.missing_columns();
    if !missing.is_empty() {
        warn!(?missing, "dataset lacks expected columns; affected charts will fail");
    }

    let state = Arc::new(AppState {
        dataset,
        options: config.render_options(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;
    info!(addr = %config.bind, "serving dashboard");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
