// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FlavourFi API Server
//!
//! Serves recipe search and the user's saved collections to the web frontend.

use flavourfi::{config::Config, db::LocalStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FlavourFi API");

    // Open the local collection store
    let store = LocalStore::open(&config.data_dir)?;
    if let Some(every) = config.store_poll_interval {
        store.spawn_refresh_task(every);
        tracing::info!(interval_secs = every.as_secs(), "Store polling enabled");
    }

    // Build shared state and run the initial search
    let state = Arc::new(AppState::new(config.clone(), store));
    state.search.start();

    // Build router
    let app = flavourfi::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("flavourfi=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
