//! Park Server - facilities, trails, check-ins and live occupancy

use anyhow::Result;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use park_server::config::Config;
use park_server::persistence::{self, seed};
use park_server::state::AppState;
use park_server::api;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("park_server=debug".parse()?))
        .init();

    tracing::info!("Starting Park Server...");

    let config = Config::from_env();
    let port = config.server_port;
    tracing::info!(
        "Active check-in window: {} minutes",
        config.active_checkin_window.num_minutes()
    );

    let db = persistence::init_database(&config.database_path, config.database_max_connections).await?;
    if config.seed_demo_data {
        seed::seed_demo_park(db.pool()).await?;
    }

    let state = Arc::new(AppState::new(db, config));

    let app = api::routes()
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Park Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
