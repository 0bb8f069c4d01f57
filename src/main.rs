//! Edit History Server - Binary Entry Point
//!
//! This is the main entry point for the edit-server binary.

use std::env;
use std::sync::Arc;

use edit_history::api::http::create_router;
use edit_history::api::state::AppState;
use edit_history::config::ServerConfig;
use edit_history::utils::cleanup_temp_files;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("EDIT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "edit_history=debug,edit_server=debug,info"
        } else {
            "edit_history=info,edit_server=info,warn"
        })
    });

    let format = env::var("EDIT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    config.validate()?;
    let addr = config.bind_addr()?;

    match cleanup_temp_files(&config.root_dir) {
        Ok(0) => {}
        Ok(n) => tracing::info!(removed = n, "removed leftover temp files"),
        Err(e) => tracing::warn!(error = %e, "could not clean temp files"),
    }

    let state = Arc::new(AppState::from_config(&config));
    let root = state.engine.root().display().to_string();
    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        root = %root,
        version = edit_history::VERSION,
        "edit server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let store = state.engine.store();
    tracing::info!(
        files = ?store.tracked_files(),
        events = store.event_count(),
        "edit history discarded on shutdown"
    );

    Ok(())
}
