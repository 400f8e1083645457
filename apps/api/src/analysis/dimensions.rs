//! Dimension agents — one structured LLM call per fit dimension, with the
//! bounded repair-retry contract. Failure is a typed outcome, never a panic
//! or an escaping error: the orchestrator decides what a failure means.

use tracing::warn;

use crate::analysis::prompts::{
    ANALYSIS_SYSTEM, CAREER_TRAJECTORY_INSTRUCTION, CULTURAL_FIT_INSTRUCTION,
    DIMENSION_PROMPT_TEMPLATE, EXPERIENCE_MATCH_INSTRUCTION, KEYWORD_MATCH_INSTRUCTION,
    QUALIFICATION_MATCH_INSTRUCTION,
};
use crate::analysis::report::DimensionResult;
use crate::llm_client::ModelInvoker;
use crate::structured::call_structured;

/// The five fixed axes of resume-to-job fit. The set and its order are part
/// of the report contract — `detailed_analysis` always carries exactly these
/// keys in `ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    KeywordMatch,
    ExperienceMatch,
    QualificationMatch,
    CulturalFit,
    CareerTrajectory,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::KeywordMatch,
        Dimension::ExperienceMatch,
        Dimension::QualificationMatch,
        Dimension::CulturalFit,
        Dimension::CareerTrajectory,
    ];

    /// Stable key used in `detailed_analysis` and in the dimension prompt.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::KeywordMatch => "keyword_match",
            Dimension::ExperienceMatch => "experience_match",
            Dimension::QualificationMatch => "qualification_match",
            Dimension::CulturalFit => "cultural_fit",
            Dimension::CareerTrajectory => "career_trajectory",
        }
    }

    /// Human-readable name used in summaries and degradation notices.
    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::KeywordMatch => "keyword match",
            Dimension::ExperienceMatch => "experience match",
            Dimension::QualificationMatch => "qualification match",
            Dimension::CulturalFit => "cultural fit",
            Dimension::CareerTrajectory => "career trajectory",
        }
    }

    /// The four qualitative dimensions feed `holistic_score`;
    /// keyword match is scored separately in the breakdown.
    pub fn is_qualitative(self) -> bool {
        !matches!(self, Dimension::KeywordMatch)
    }

    fn instruction(self) -> &'static str {
        match self {
            Dimension::KeywordMatch => KEYWORD_MATCH_INSTRUCTION,
            Dimension::ExperienceMatch => EXPERIENCE_MATCH_INSTRUCTION,
            Dimension::QualificationMatch => QUALIFICATION_MATCH_INSTRUCTION,
            Dimension::CulturalFit => CULTURAL_FIT_INSTRUCTION,
            Dimension::CareerTrajectory => CAREER_TRAJECTORY_INSTRUCTION,
        }
    }
}

/// One dimension could not be evaluated after retries. Consumed by the
/// orchestrator's degradation policy; never surfaced to the caller directly.
#[derive(Debug)]
pub struct AgentFailure {
    pub dimension: Dimension,
    pub reason: String,
}

/// Evaluates a single dimension: build the instruction, invoke the model,
/// decode against the `DimensionResult` schema with one corrective re-prompt.
pub async fn evaluate(
    invoker: &dyn ModelInvoker,
    dimension: Dimension,
    resume_text: &str,
    jd_text: &str,
) -> Result<DimensionResult, AgentFailure> {
    let prompt = build_dimension_prompt(dimension, resume_text, jd_text);

    call_structured::<DimensionResult>(invoker, &prompt, ANALYSIS_SYSTEM)
        .await
        .map_err(|e| {
            warn!(
                dimension = dimension.key(),
                "Dimension evaluation failed: {e}"
            );
            AgentFailure {
                dimension,
                reason: e.to_string(),
            }
        })
}

fn build_dimension_prompt(dimension: Dimension, resume_text: &str, jd_text: &str) -> String {
    DIMENSION_PROMPT_TEMPLATE
        .replace("{dimension_key}", dimension.key())
        .replace("{instruction}", dimension.instruction())
        .replace("{resume_text}", resume_text)
        .replace("{jd_text}", jd_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dimension_json, ScriptedInvoker};

    #[test]
    fn test_all_lists_five_distinct_keys() {
        let keys: std::collections::HashSet<_> =
            Dimension::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_keyword_match_is_the_only_non_qualitative_dimension() {
        let qualitative: Vec<_> = Dimension::ALL
            .into_iter()
            .filter(|d| d.is_qualitative())
            .collect();
        assert_eq!(qualitative.len(), 4);
        assert!(!qualitative.contains(&Dimension::KeywordMatch));
    }

    #[test]
    fn test_prompt_names_the_dimension_and_carries_both_texts() {
        let prompt =
            build_dimension_prompt(Dimension::CulturalFit, "RESUME BODY", "JD BODY");
        assert!(prompt.contains("cultural_fit"));
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
    }

    #[tokio::test]
    async fn test_evaluate_returns_result_on_valid_output() {
        let invoker =
            ScriptedInvoker::new(vec![Ok(dimension_json(82, "Solid Go background."))]);
        let result = evaluate(&invoker, Dimension::ExperienceMatch, "resume", "jd")
            .await
            .unwrap();
        assert_eq!(result.score, 82);
        assert_eq!(invoker.calls(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_repairs_malformed_output_once() {
        let invoker = ScriptedInvoker::new(vec![
            Ok("Sure! Here is my analysis:".into()),
            Ok(dimension_json(64, "Partially aligned.")),
        ]);
        let result = evaluate(&invoker, Dimension::KeywordMatch, "resume", "jd")
            .await
            .unwrap();
        assert_eq!(result.score, 64);
        assert_eq!(invoker.calls(), 2);
    }

    #[tokio::test]
    async fn test_evaluate_signals_failure_after_two_bad_outputs() {
        let invoker = ScriptedInvoker::new(vec![Ok("nope".into()), Ok("still nope".into())]);
        let failure = evaluate(&invoker, Dimension::CareerTrajectory, "resume", "jd")
            .await
            .unwrap_err();
        assert_eq!(failure.dimension, Dimension::CareerTrajectory);
        assert_eq!(invoker.calls(), 2);
    }

    #[tokio::test]
    async fn test_evaluate_signals_failure_on_transport_error() {
        let invoker = ScriptedInvoker::always_failing();
        let failure = evaluate(&invoker, Dimension::CulturalFit, "resume", "jd")
            .await
            .unwrap_err();
        assert!(failure.reason.contains("invocation failed"));
        assert_eq!(invoker.calls(), 1);
    }
}
