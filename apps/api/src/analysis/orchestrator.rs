//! Analysis orchestration — fans out to all five dimension agents
//! concurrently, fans in at a single barrier, applies the partial-failure
//! policy, and hands the results to the deterministic aggregation step.
//!
//! Policy: one failed dimension is tolerated and replaced with a degraded
//! default that still participates in the arithmetic; only when every
//! dimension fails does the call escalate to `AppError::Aggregation`.

use std::sync::Arc;

use futures::future::join_all;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::analysis::dimensions::{evaluate, AgentFailure, Dimension};
use crate::analysis::report::{AnalysisReport, DimensionResult};
use crate::analysis::summary::build_report;
use crate::config::ScoringPolicy;
use crate::errors::AppError;
use crate::llm_client::ModelInvoker;

/// Runs the full resume-fit pipeline.
///
/// Fails fast with `AppError::Validation` before any model call if either
/// input is empty after trimming.
pub async fn analyze_resume(
    invoker: Arc<dyn ModelInvoker>,
    policy: &ScoringPolicy,
    resume_text: &str,
    jd_text: &str,
) -> Result<AnalysisReport, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text must not be empty".to_string(),
        ));
    }
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description_text must not be empty".to_string(),
        ));
    }

    info!("Fanning out to {} dimension agents", Dimension::ALL.len());

    // Each task reads only its own copy of the inputs and carries its own
    // deadline; a deadline expiry is an AgentFailure like any other.
    let tasks = Dimension::ALL.map(|dimension| {
        let invoker = Arc::clone(&invoker);
        async move {
            match timeout(
                policy.analysis_timeout,
                evaluate(invoker.as_ref(), dimension, resume_text, jd_text),
            )
            .await
            {
                Ok(outcome) => (dimension, outcome),
                Err(_) => (
                    dimension,
                    Err(AgentFailure {
                        dimension,
                        reason: format!(
                            "evaluation exceeded the {}s deadline",
                            policy.analysis_timeout.as_secs()
                        ),
                    }),
                ),
            }
        }
    });

    let outcomes = join_all(tasks).await;

    let failed = outcomes
        .iter()
        .filter(|(_, outcome)| outcome.is_err())
        .count();

    if failed == Dimension::ALL.len() {
        return Err(AppError::Aggregation(
            "all dimension agents failed".to_string(),
        ));
    }

    let results: Vec<(Dimension, DimensionResult)> = outcomes
        .into_iter()
        .map(|(dimension, outcome)| match outcome {
            Ok(result) => (dimension, result),
            Err(failure) => {
                warn!(
                    dimension = dimension.key(),
                    "Degrading failed dimension: {}", failure.reason
                );
                (dimension, degraded_result(policy, failure))
            }
        })
        .collect();

    let report = build_report(policy, &results);

    info!(
        total_score = report.total_score,
        degraded = failed,
        "Analysis complete"
    );

    Ok(report)
}

/// The substitute for a dimension that could not be evaluated. The score
/// still participates in the aggregate arithmetic; the analysis text flags
/// the degradation so callers can see it.
fn degraded_result(policy: &ScoringPolicy, failure: AgentFailure) -> DimensionResult {
    DimensionResult {
        score: policy.degraded_score,
        analysis: format!(
            "Unable to analyze {} for this submission.",
            failure.dimension.display_name()
        ),
        insights: None,
    }
}
