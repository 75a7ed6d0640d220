use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{ask, feedback, health};

/// Create a minimal router without state (liveness endpoints only)
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .route("/ask", post(ask::ask))
        .route("/feedback", post(feedback::submit_feedback))
        .with_state(state)
        // The chat frontend is served from a different origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
