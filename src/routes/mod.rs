//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the HTTP surface (liveness, health, applications, attachment
//! uploads, internship listing) and the websocket chat endpoint under one
//! Axum router. CORS is wide open; the gateway serves browser clients from
//! arbitrary origins.

pub mod applications;
pub mod attachments;
pub mod internships;
pub mod ws;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

/// Resume and attachment uploads can run to a few megabytes; the default
/// 2 MiB body cap is too tight.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/apply", post(applications::submit_application))
        .route("/uploadAttachment", post(attachments::upload_attachment))
        .route("/internships", get(internships::list))
        .route("/api/internships", get(internships::list))
        .route("/ws", get(ws::handle_ws))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Liveness text, kept word-for-word for existing monitors.
async fn root() -> &'static str {
    "API is running..."
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
