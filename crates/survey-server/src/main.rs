//! Survey Server - estates, trees and drone survey plans over REST

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use survey_server::api;
use survey_server::config::Config;
use survey_server::persistence::init_database;
use survey_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("survey_server=debug".parse()?),
        )
        .init();

    tracing::info!("Starting Survey Server...");

    let config = Config::from_env();
    let port = config.server_port;

    let db = init_database(&config.database_path, config.database_max_connections).await?;
    let state = Arc::new(AppState::with_database(db, config));
    state.load_from_database().await?;

    let app = api::routes().with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Survey Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
