use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub policy: ScoringPolicy,
}

/// Tunable constants of the aggregation policy. The weighting formula and the
/// degraded-score default are deliberately configuration, not code.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    /// Share of `total_score` carried by the keyword dimension; the holistic
    /// score gets the remainder. Must lie in [0, 1].
    pub keyword_weight: f64,
    /// Dimensions scoring at or above this count as strengths; below it,
    /// as areas for improvement.
    pub strength_threshold: u8,
    /// Score substituted for a dimension that failed evaluation.
    pub degraded_score: u8,
    /// Independent deadline applied to each fan-out task.
    pub analysis_timeout: Duration,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            keyword_weight: 0.3,
            strength_threshold: 70,
            degraded_score: 0,
            analysis_timeout: Duration::from_secs(45),
        }
    }
}

impl ScoringPolicy {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let keyword_weight = match std::env::var("KEYWORD_WEIGHT") {
            Ok(raw) => parse_weight(&raw)?,
            Err(_) => defaults.keyword_weight,
        };

        let strength_threshold = match std::env::var("STRENGTH_THRESHOLD") {
            Ok(raw) => parse_score(&raw, "STRENGTH_THRESHOLD")?,
            Err(_) => defaults.strength_threshold,
        };

        let degraded_score = match std::env::var("DEGRADED_SCORE") {
            Ok(raw) => parse_score(&raw, "DEGRADED_SCORE")?,
            Err(_) => defaults.degraded_score,
        };

        let analysis_timeout = match std::env::var("ANALYSIS_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse::<u64>()
                    .context("ANALYSIS_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            Err(_) => defaults.analysis_timeout,
        };

        Ok(Self {
            keyword_weight,
            strength_threshold,
            degraded_score,
            analysis_timeout,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            policy: ScoringPolicy::from_env()?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_weight(raw: &str) -> Result<f64> {
    let weight = raw
        .parse::<f64>()
        .context("KEYWORD_WEIGHT must be a number")?;
    if !(0.0..=1.0).contains(&weight) {
        bail!("KEYWORD_WEIGHT must lie in [0, 1], got {weight}");
    }
    Ok(weight)
}

fn parse_score(raw: &str, key: &str) -> Result<u8> {
    let score = raw
        .parse::<u8>()
        .with_context(|| format!("{key} must be an integer between 0 and 100"))?;
    if score > 100 {
        bail!("{key} must be between 0 and 100, got {score}");
    }
    Ok(score)
}
