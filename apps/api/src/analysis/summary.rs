//! Deterministic aggregation of dimension results into the composite report.
//!
//! No model call happens here. Given the same five `DimensionResult`s and the
//! same policy, the output is identical — which dimensions count as strengths
//! or weaknesses is purely threshold-based.

use indexmap::IndexMap;

use crate::analysis::dimensions::Dimension;
use crate::analysis::report::{AnalysisReport, DimensionResult, ScoreBreakdown};
use crate::config::ScoringPolicy;

/// Builds the composite report from the five dimension results, given in
/// canonical `Dimension::ALL` order (degraded slots already substituted).
pub fn build_report(
    policy: &ScoringPolicy,
    results: &[(Dimension, DimensionResult)],
) -> AnalysisReport {
    debug_assert_eq!(results.len(), Dimension::ALL.len());

    let keyword_match_score = results
        .iter()
        .find(|(d, _)| *d == Dimension::KeywordMatch)
        .map(|(_, r)| r.score)
        .unwrap_or(0);

    let qualitative_scores: Vec<u8> = results
        .iter()
        .filter(|(d, _)| d.is_qualitative())
        .map(|(_, r)| r.score)
        .collect();
    let holistic_score = rounded_mean(&qualitative_scores);

    let total_score = weighted_total(keyword_match_score, holistic_score, policy.keyword_weight);

    let mut strengths = Vec::new();
    let mut areas_for_improvement = Vec::new();
    let mut recommendations = Vec::new();

    for (dimension, result) in results {
        let line = format!(
            "{}: {}",
            capitalize(dimension.display_name()),
            first_sentence(&result.analysis)
        );
        if result.score >= policy.strength_threshold {
            strengths.push(line);
        } else {
            areas_for_improvement.push(line);
            recommendations.push(recommendation_for(*dimension));
        }
    }

    let detailed_analysis: IndexMap<String, DimensionResult> = results
        .iter()
        .map(|(d, r)| (d.key().to_string(), r.clone()))
        .collect();

    AnalysisReport {
        total_score,
        score_breakdown: ScoreBreakdown {
            keyword_match_score,
            holistic_score,
        },
        description: describe(total_score),
        strengths,
        areas_for_improvement,
        recommendations,
        detailed_analysis,
    }
}

/// Arithmetic mean rounded to the nearest integer; 0 for an empty slice.
pub fn rounded_mean(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|&s| s as u32).sum();
    (sum as f64 / scores.len() as f64).round() as u8
}

/// `keyword * w + holistic * (1 - w)`, rounded. Inputs are 0–100 and the
/// weight lies in [0, 1], so the result stays in range.
fn weighted_total(keyword: u8, holistic: u8, keyword_weight: f64) -> u8 {
    (keyword as f64 * keyword_weight + holistic as f64 * (1.0 - keyword_weight)).round() as u8
}

/// Short templated sentence referencing the total score.
fn describe(total_score: u8) -> String {
    if total_score >= 80 {
        format!(
            "Overall fit score: {total_score}/100. Strong match — the resume covers the role's core requirements well."
        )
    } else if total_score >= 60 {
        format!(
            "Overall fit score: {total_score}/100. Moderate match — a solid base with clear areas to strengthen."
        )
    } else {
        format!(
            "Overall fit score: {total_score}/100. Weak match — significant gaps between the resume and the role."
        )
    }
}

/// One actionable recommendation per improvement-area dimension.
fn recommendation_for(dimension: Dimension) -> String {
    match dimension {
        Dimension::KeywordMatch => {
            "Mirror more of the job description's concrete terms — technologies, tools, and \
             domain vocabulary — in the resume, where truthful."
        }
        Dimension::ExperienceMatch => {
            "Foreground the work history most relevant to this role and quantify its scope; \
             move unrelated experience down or out."
        }
        Dimension::QualificationMatch => {
            "Address the role's stated must-haves explicitly — add missing certifications, \
             skills, or education, or explain equivalent experience."
        }
        Dimension::CulturalFit => {
            "Describe how you work, not only what you built: collaboration, ownership, and \
             pace signals that match the company's language."
        }
        Dimension::CareerTrajectory => {
            "Frame the resume to show progression toward this role's level; make the step \
             from your last position to this one look deliberate."
        }
    }
    .to_string()
}

/// First sentence of the analysis, capped so summary lines stay short.
fn first_sentence(text: &str) -> String {
    let text = text.trim();
    let sentence = match text.find(". ") {
        Some(idx) => &text[..=idx],
        None => text,
    };
    let mut out: String = sentence.chars().take(160).collect();
    if sentence.chars().count() > 160 {
        out.push('…');
    }
    out.trim().to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
