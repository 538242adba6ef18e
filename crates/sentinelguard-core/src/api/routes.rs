//! API routes

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;

use super::handlers::{self, AppState};

/// Create the API router.
///
/// Paths outside `/api` are served from the static directory, with its
/// `index.html` as the fallback document.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let index = server.static_dir.join("index.html");
    let static_files = ServeDir::new(&server.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/alert", post(handlers::submit_alert))
        .route("/api/alerts", get(handlers::list_alerts))
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .with_state(state)
}
