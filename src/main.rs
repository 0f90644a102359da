use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use booking_agent::config::AppConfig;
use booking_agent::handlers;
use booking_agent::services::catalog::ServiceCatalog;
use booking_agent::services::clock::SystemClock;
use booking_agent::services::slots::SlotCalendar;
use booking_agent::services::workflow::BookingWorkflow;
use booking_agent::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let catalog = match &config.catalog_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read service catalog: {path}"))?;
            let catalog = ServiceCatalog::from_json(&raw)
                .with_context(|| format!("invalid service catalog: {path}"))?;
            tracing::info!("loaded {} services from {path}", catalog.len());
            catalog
        }
        None => {
            tracing::info!("using built-in service catalog");
            ServiceCatalog::default()
        }
    };

    let calendar = SlotCalendar::new(config.slots).context("invalid slot configuration")?;
    let workflow = BookingWorkflow::new(catalog, calendar, Arc::new(SystemClock))
        .with_max_suggestions(config.max_suggestions);

    let state = Arc::new(AppState::new(config.clone(), workflow));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
