use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::feedback::{generate_feedback, InterviewFeedbackReport, InterviewQA};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub interview_data: Vec<InterviewQA>,
}

/// POST /api/v1/interviews/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<InterviewFeedbackReport>, AppError> {
    let report = generate_feedback(
        state.invoker.clone(),
        &state.config.policy,
        &req.interview_data,
    )
    .await?;
    Ok(Json(report))
}
