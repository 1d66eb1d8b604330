//! Stubdeck Server - Mapping API in front of WireMock
//!
//! This server handles:
//! - The `/api/mappings` REST surface used by the console
//! - Forwarding every mapping call to the WireMock admin API
//! - A server-rendered mappings page and a health check

mod config;
mod routes;
mod wiremock;

use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stubdeck_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);
    let port = config.port;
    tracing::info!("WireMock port: {}", config.wiremock_port);
    tracing::info!("WireMock admin: {}", config.admin_base);

    let state = routes::AppState::new(&config);
    let admin_base = state.wiremock.admin_base().to_string();

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "UI up at http://localhost:{}  (Admin: {})",
        port,
        admin_base
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
