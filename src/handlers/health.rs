use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::models::HealthResponse;
use crate::state::AppState;

/// Health check endpoint
pub async fn health_check(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        service: app_state.config.service_name.clone(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint
pub async fn ready_check(State(app_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Readiness check requested");
    // Rooms live in memory, so being able to reach the registry is all readiness means here.
    let rooms = app_state.registry.room_count();
    Json(HealthResponse {
        status: "ok".to_string(),
        service: app_state.config.service_name.clone(),
        message: format!("Service is ready ({} rooms)", rooms),
    })
}
