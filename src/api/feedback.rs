//! /feedback endpoint handler

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::feedback::{FeedbackKind, FeedbackRecord};

/// POST /feedback request body
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub session_id: String,
    pub question: String,
    pub answer: String,
    pub feedback: FeedbackKind,
}

/// POST /feedback response body
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub status: &'static str,
    pub logged_feedback: FeedbackRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regenerated_answer: Option<String>,
}

/// POST /feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    info!(session_id = %request.session_id, feedback = %request.feedback, "Feedback received");

    let outcome = state
        .refiner
        .refine(
            &request.session_id,
            &request.question,
            &request.answer,
            request.feedback,
        )
        .await?;

    Ok(Json(FeedbackResponse {
        status: "success",
        logged_feedback: outcome.record,
        regenerated_answer: outcome.regenerated_answer,
    }))
}
