//! HTTP API module - health endpoints and the chat WebSocket

mod websocket;

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::bot::Bot;
use crate::db::Database;
pub use websocket::{ChatSession, ClientMessage, ConnectionManager, ServerMessage};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub bot: Arc<Bot>,
    pub connections: Arc<ConnectionManager>,
}

/// Build the API router
pub fn router(db: Arc<Database>, bot: Arc<Bot>) -> Router {
    let state = AppState {
        db,
        bot,
        connections: Arc::new(ConnectionManager::new()),
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(root))
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootResponse {
        name: state.bot.identity().name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct RootResponse {
    name: String,
    version: &'static str,
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "ok",
            }),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                database: "error",
            }),
        ),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
}
