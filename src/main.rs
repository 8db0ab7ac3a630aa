mod config;
mod db;
mod error;
mod event;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::services::forward::HttpForwarder;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("upload dir init failed");

    let forwarder = HttpForwarder::new(
        config.api_url.clone(),
        Duration::from_secs(config.forward_timeout_secs),
        Duration::from_secs(config.forward_connect_timeout_secs),
    )
    .expect("forward client init failed");

    let state = state::AppState::new(pool, Arc::new(forwarder), config.upload_dir.clone().into());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, api_url = %config.api_url, "mentorlink gateway listening");
    axum::serve(listener, app).await.expect("server failed");
}
