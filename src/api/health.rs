//! Liveness and readiness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use super::state::AppState;
use crate::api::types::Json;

/// Root liveness response
#[derive(Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Detailed health response with component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check status
#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// GET / - confirms the agent API is up
pub async fn root() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "ok",
        message: "Math agent API is running",
    })
}

/// GET /health - simple health check for liveness probes
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
        latency_ms: None,
    };

    (StatusCode::OK, Json(response))
}

/// GET /ready - readiness check verifying the knowledge store is reachable
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();

    let store_start = Instant::now();
    let store_healthy = state
        .knowledge_store
        .health_check()
        .await
        .unwrap_or(false);

    let store_check = HealthCheck {
        name: "knowledge_store".to_string(),
        status: if store_healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        latency_ms: Some(store_start.elapsed().as_millis() as u64),
    };

    // A degraded store still accepts requests: the agent falls back to web
    // search when retrieval is unusable.
    let overall = store_check.status;

    let response = HealthResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![store_check]),
        latency_ms: Some(start.elapsed().as_millis() as u64),
    };

    (StatusCode::OK, Json(response))
}

/// GET /live - bare liveness probe
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
