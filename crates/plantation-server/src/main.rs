//! Plantation Server - estates, trees, height statistics and drone flight plans

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plantation_server::api;
use plantation_server::config::Config;
use plantation_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plantation_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting Plantation Server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        storage = ?config.storage,
        cutoff_policy = ?config.cutoff_policy,
        "Loaded configuration"
    );
    let state = Arc::new(AppState::from_config(config).await?);

    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
