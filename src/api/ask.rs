//! /ask endpoint handler

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::agent::WorkflowState;

/// POST /ask request body
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// POST /ask response body. The session id is generated per call for
/// feedback correlation; it is not a resumable handle into workflow state.
#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub session_id: Uuid,
    pub question: String,
    pub answer: String,
}

/// POST /ask
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ApiError::bad_request("Question cannot be empty").with_param("question"));
    }

    let session_id = Uuid::new_v4();
    info!(%session_id, "Processing question");

    let final_state = state
        .engine
        .execute(WorkflowState::new(question))
        .await?;

    let answer = final_state
        .generation
        .ok_or_else(|| ApiError::internal("Workflow produced no answer"))?;

    Ok(Json(AskResponse {
        session_id,
        question: question.to_string(),
        answer,
    }))
}
