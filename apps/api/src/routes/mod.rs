pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume-fit analysis
        .route("/api/v1/analysis", post(analysis_handlers::handle_analyze))
        // Interview feedback
        .route(
            "/api/v1/interviews/feedback",
            post(interview_handlers::handle_feedback),
        )
        .with_state(state)
}
