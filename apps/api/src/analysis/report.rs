//! Wire models for the resume-fit report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::structured::{SchemaViolation, ValidateSchema};

/// The verdict of one dimension agent. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionResult {
    /// 0–100.
    pub score: u8,
    pub analysis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
}

impl ValidateSchema for DimensionResult {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.score > 100 {
            return Err(SchemaViolation::new(format!(
                "`score` must be an integer between 0 and 100, got {}",
                self.score
            )));
        }
        if self.analysis.trim().is_empty() {
            return Err(SchemaViolation::new("`analysis` must be a non-empty string"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keyword_match_score: u8,
    /// Rounded mean of the four qualitative dimension scores.
    pub holistic_score: u8,
}

/// The composite fit report.
///
/// `detailed_analysis` always carries exactly the five fixed dimension keys,
/// in canonical order, even when some dimensions were degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_score: u8,
    pub score_breakdown: ScoreBreakdown,
    pub description: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
    pub detailed_analysis: IndexMap<String, DimensionResult>,
}
