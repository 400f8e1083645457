use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::orchestrator::analyze_resume;
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_text: String,
    pub job_description_text: String,
}

/// POST /api/v1/analysis
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let report = analyze_resume(
        state.invoker.clone(),
        &state.config.policy,
        &req.resume_text,
        &req.job_description_text,
    )
    .await?;
    Ok(Json(report))
}
