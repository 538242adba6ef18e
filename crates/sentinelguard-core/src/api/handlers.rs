//! API handlers for the HTTP REST API

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    Json,
};
use serde::Serialize;

use crate::models::Alert;
use crate::service::AlertService;

use super::error::ApiError;

/// Name reported by the health endpoint
pub const SERVICE_NAME: &str = "SentinelGuard";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline and alert listing
    pub alerts: AlertService,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the process serves requests
    pub status: &'static str,
    /// Service name
    pub service: &'static str,
}

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVICE_NAME,
    })
}

/// Alert submission response
#[derive(Debug, Serialize)]
pub struct SubmitAlertResponse {
    /// Outcome message
    pub status: &'static str,
}

/// Submit a single alert.
///
/// The body is taken as raw bytes so that the rate-limit gate runs before
/// any parsing, and so malformed JSON maps to the same 400 as a bad field.
pub async fn submit_alert(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Json<SubmitAlertResponse>, ApiError> {
    state.alerts.submit(&body, &peer.ip().to_string()).await?;

    Ok(Json(SubmitAlertResponse {
        status: "alert saved",
    }))
}

/// List every stored alert
pub async fn list_alerts(State(state): State<AppState>) -> Json<Vec<Alert>> {
    Json(state.alerts.list_all().await)
}
