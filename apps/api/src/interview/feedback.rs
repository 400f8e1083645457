//! Interview feedback pipeline — per-question scoring and critique over an
//! ordered list of Q&A pairs, under an all-or-nothing failure policy.
//!
//! Unlike the resume pipeline there is no degrade path: a review UI expects
//! exactly one critique per asked question, so a partial list with placeholder
//! slots would mislead. Any unrecovered failure fails the whole call.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::info;

use crate::analysis::summary::rounded_mean;
use crate::config::ScoringPolicy;
use crate::errors::AppError;
use crate::interview::prompts::{FEEDBACK_SYSTEM, QUESTION_FEEDBACK_PROMPT_TEMPLATE};
use crate::llm_client::ModelInvoker;
use crate::structured::{call_structured, SchemaViolation, ValidateSchema};

/// One question/answer pair from a finished mock interview. Ordered input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQA {
    pub question: String,
    pub user_answer: String,
}

/// The model's critique of one answer. Internal shape — the public
/// `QuestionFeedback` adds the echoed question and answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionCritique {
    score: u8,
    areas_of_improvement: Vec<String>,
    suggested_answer: String,
}

impl ValidateSchema for QuestionCritique {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.score > 100 {
            return Err(SchemaViolation::new(format!(
                "`score` must be an integer between 0 and 100, got {}",
                self.score
            )));
        }
        if self.suggested_answer.trim().is_empty() {
            return Err(SchemaViolation::new(
                "`suggestedAnswer` must be a non-empty string",
            ));
        }
        Ok(())
    }
}

/// One scored critique, index-aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    pub question: String,
    pub user_answer: String,
    pub areas_of_improvement: Vec<String>,
    pub suggested_answer: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewFeedbackReport {
    pub overall_score: u8,
    pub general_comments: String,
    /// Same length and order as the input.
    pub questions_feedback: Vec<QuestionFeedback>,
}

impl InterviewFeedbackReport {
    /// The report for an interview with no questions. No model call is made.
    fn empty() -> Self {
        Self {
            overall_score: 0,
            general_comments: String::new(),
            questions_feedback: Vec::new(),
        }
    }
}

/// Runs the interview feedback pipeline over the ordered Q&A list.
///
/// Questions are evaluated concurrently but the output order matches the
/// input exactly, regardless of completion order.
pub async fn generate_feedback(
    invoker: Arc<dyn ModelInvoker>,
    policy: &ScoringPolicy,
    interview_data: &[InterviewQA],
) -> Result<InterviewFeedbackReport, AppError> {
    if interview_data.is_empty() {
        return Ok(InterviewFeedbackReport::empty());
    }

    info!("Fanning out to {} question critiques", interview_data.len());

    let tasks = interview_data.iter().enumerate().map(|(index, qa)| {
        let invoker = Arc::clone(&invoker);
        async move {
            let prompt = build_question_prompt(qa);
            let outcome = timeout(
                policy.analysis_timeout,
                call_structured::<QuestionCritique>(invoker.as_ref(), &prompt, FEEDBACK_SYSTEM),
            )
            .await;

            match outcome {
                Ok(Ok(critique)) => Ok(QuestionFeedback {
                    question: qa.question.clone(),
                    user_answer: qa.user_answer.clone(),
                    areas_of_improvement: critique.areas_of_improvement,
                    suggested_answer: critique.suggested_answer,
                    score: critique.score,
                }),
                Ok(Err(e)) => Err(AppError::Model(format!("question {}: {e}", index + 1))),
                Err(_) => Err(AppError::Model(format!(
                    "question {}: critique exceeded the {}s deadline",
                    index + 1,
                    policy.analysis_timeout.as_secs()
                ))),
            }
        }
    });

    // join_all preserves input order; any failure fails the whole call.
    let questions_feedback: Vec<QuestionFeedback> =
        join_all(tasks).await.into_iter().collect::<Result<_, _>>()?;

    let scores: Vec<u8> = questions_feedback.iter().map(|f| f.score).collect();
    let overall_score = rounded_mean(&scores);
    let general_comments = synthesize_comments(&questions_feedback, overall_score);

    info!(
        overall_score,
        questions = questions_feedback.len(),
        "Interview feedback complete"
    );

    Ok(InterviewFeedbackReport {
        overall_score,
        general_comments,
        questions_feedback,
    })
}

fn build_question_prompt(qa: &InterviewQA) -> String {
    QUESTION_FEEDBACK_PROMPT_TEMPLATE
        .replace("{question}", &qa.question)
        .replace("{answer}", &qa.user_answer)
}

/// Deterministic summary naming the most frequently recurring improvement
/// theme across questions. Themes are compared case-insensitively; ties
/// break toward the lexicographically smallest theme.
fn synthesize_comments(feedback: &[QuestionFeedback], overall_score: u8) -> String {
    let mut themes: BTreeMap<String, (usize, String)> = BTreeMap::new();
    for item in feedback {
        for area in &item.areas_of_improvement {
            let normalized = area.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            let entry = themes
                .entry(normalized)
                .or_insert_with(|| (0, area.trim().to_string()));
            entry.0 += 1;
        }
    }

    let top = themes
        .values()
        .fold(None::<&(usize, String)>, |best, candidate| match best {
            Some(b) if b.0 >= candidate.0 => Some(b),
            _ => Some(candidate),
        });

    match top {
        Some((count, theme)) => format!(
            "Average answer score: {overall_score}/100 across {} question(s). \
             The most recurring improvement area was: {theme} (raised {count} time(s)).",
            feedback.len()
        ),
        None => format!(
            "Average answer score: {overall_score}/100 across {} question(s). \
             No recurring improvement areas stood out.",
            feedback.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{critique_json, KeyedInvoker, ScriptedInvoker};

    fn qa(question: &str, answer: &str) -> InterviewQA {
        InterviewQA {
            question: question.to_string(),
            user_answer: answer.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_input_returns_empty_report_without_model_calls() {
        let invoker = Arc::new(ScriptedInvoker::always_failing());
        let report = generate_feedback(invoker.clone(), &ScoringPolicy::default(), &[])
            .await
            .unwrap();
        assert_eq!(report.overall_score, 0);
        assert_eq!(report.general_comments, "");
        assert!(report.questions_feedback.is_empty());
        assert_eq!(invoker.calls(), 0);
    }

    #[tokio::test]
    async fn test_output_is_index_aligned_with_input() {
        let invoker = Arc::new(KeyedInvoker::new(vec![
            ("first question", critique_json(80, &["tighten the intro"], "A better first answer.")),
            ("second question", critique_json(60, &["add an example"], "A better second answer.")),
            ("third question", critique_json(40, &["add an example"], "A better third answer.")),
        ]));
        let data = vec![
            qa("first question", "a1"),
            qa("second question", "a2"),
            qa("third question", "a3"),
        ];

        let report = generate_feedback(invoker.clone(), &ScoringPolicy::default(), &data)
            .await
            .unwrap();

        assert_eq!(invoker.calls(), 3);
        assert_eq!(report.questions_feedback.len(), 3);
        for (input, output) in data.iter().zip(&report.questions_feedback) {
            assert_eq!(input.question, output.question);
            assert_eq!(input.user_answer, output.user_answer);
        }
        assert_eq!(report.questions_feedback[0].score, 80);
        assert_eq!(report.questions_feedback[2].score, 40);
        // mean(80, 60, 40) = 60
        assert_eq!(report.overall_score, 60);
    }

    #[tokio::test]
    async fn test_any_question_failure_fails_the_whole_call() {
        // Second question has no scripted response and fails at transport.
        let invoker = Arc::new(KeyedInvoker::new(vec![(
            "first question",
            critique_json(80, &[], "Fine answer."),
        )]));
        let data = vec![qa("first question", "a1"), qa("unmatched question", "a2")];

        let err = generate_feedback(invoker, &ScoringPolicy::default(), &data)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Model(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expiry_fails_the_whole_call() {
        // The second critique hangs past its deadline; no partial report.
        let invoker = Arc::new(
            KeyedInvoker::new(vec![("quick question", critique_json(80, &[], "Fine."))])
                .stall_on("slow question"),
        );
        let data = vec![qa("quick question", "a1"), qa("slow question", "a2")];

        let err = generate_feedback(invoker, &ScoringPolicy::default(), &data)
            .await
            .unwrap_err();
        match err {
            AppError::Model(msg) => assert!(msg.contains("deadline"), "got: {msg}"),
            other => panic!("expected AppError::Model, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_schema_exhaustion_is_fatal_too() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![
            Ok("not json".into()),
            Ok("still not json".into()),
        ]));
        let data = vec![qa("only question", "answer")];

        let err = generate_feedback(invoker.clone(), &ScoringPolicy::default(), &data)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Model(_)));
        assert_eq!(invoker.calls(), 2); // original prompt + one repair
    }

    #[tokio::test]
    async fn test_empty_answer_scores_low_with_nonempty_guidance() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![Ok(critique_json(
            5,
            &["answer the question at all", "structure: situation, task, action, result"],
            "I'm a backend engineer with five years of Go experience...",
        ))]));
        let data = vec![qa("Tell me about yourself", "")];

        let report = generate_feedback(invoker, &ScoringPolicy::default(), &data)
            .await
            .unwrap();
        let feedback = &report.questions_feedback[0];
        assert!(feedback.score < 10);
        assert!(!feedback.areas_of_improvement.is_empty());
        assert!(!feedback.suggested_answer.is_empty());
    }

    #[tokio::test]
    async fn test_general_comments_name_the_recurring_theme() {
        let invoker = Arc::new(KeyedInvoker::new(vec![
            ("q one", critique_json(70, &["Add concrete metrics", "slow down"], "Better one.")),
            ("q two", critique_json(50, &["add concrete metrics"], "Better two.")),
        ]));
        let data = vec![qa("q one", "a"), qa("q two", "b")];

        let report = generate_feedback(invoker, &ScoringPolicy::default(), &data)
            .await
            .unwrap();
        assert!(report.general_comments.contains("Add concrete metrics"));
        assert!(report.general_comments.contains("2 time(s)"));
        assert!(report.general_comments.contains("60/100"));
    }

    #[tokio::test]
    async fn test_no_improvement_areas_yields_neutral_summary() {
        let invoker = Arc::new(ScriptedInvoker::new(vec![Ok(critique_json(
            95,
            &[],
            "Already strong.",
        ))]));
        let data = vec![qa("q", "a great answer")];

        let report = generate_feedback(invoker, &ScoringPolicy::default(), &data)
            .await
            .unwrap();
        assert!(report.general_comments.contains("No recurring"));
    }

    #[test]
    fn test_report_serializes_with_camel_case_wire_names() {
        let report = InterviewFeedbackReport {
            overall_score: 75,
            general_comments: "Solid".to_string(),
            questions_feedback: vec![QuestionFeedback {
                question: "q".to_string(),
                user_answer: "a".to_string(),
                areas_of_improvement: vec!["x".to_string()],
                suggested_answer: "s".to_string(),
                score: 75,
            }],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("overallScore").is_some());
        assert!(value.get("generalComments").is_some());
        let item = &value["questionsFeedback"][0];
        assert!(item.get("userAnswer").is_some());
        assert!(item.get("areasOfImprovement").is_some());
        assert!(item.get("suggestedAnswer").is_some());
    }

    #[test]
    fn test_tie_breaks_toward_lexicographically_smallest_theme() {
        let feedback = vec![
            QuestionFeedback {
                question: "q".into(),
                user_answer: "a".into(),
                areas_of_improvement: vec!["be concise".into(), "add metrics".into()],
                suggested_answer: "s".into(),
                score: 50,
            },
        ];
        let comments = synthesize_comments(&feedback, 50);
        assert!(comments.contains("add metrics"));
    }
}
