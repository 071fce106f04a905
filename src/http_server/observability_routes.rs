//! Observability HTTP Routes

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Process start time, reported by the health check
pub struct HealthState {
    started_at: DateTime<Utc>,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }

    fn report(&self, now: DateTime<Utc>) -> HealthResponse {
        HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: (now - self.started_at).num_seconds().max(0),
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: i64,
}

/// Health check route
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
    Json(state.report(Utc::now()))
}
