//! Structured-output contract enforcement.
//!
//! Every generative call in the pipelines must come back as JSON matching a
//! typed schema. Malformed output is an expected, recoverable case: it is
//! decoded into a `SchemaViolation` diagnostic and answered with exactly one
//! corrective re-prompt before the call is declared failed.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{InvokeError, ModelInvoker};

/// Appended to the corrective re-prompt after the diagnostic.
const REPAIR_INSTRUCTION: &str = "Return a corrected JSON object that satisfies \
    the schema exactly. Respond with JSON only, no code fences, no commentary.";

/// The model responded, but the text did not satisfy the expected schema.
/// The detail names the offending field or constraint so it can be fed back
/// to the model as corrective context.
#[derive(Debug, Error)]
#[error("{detail}")]
pub struct SchemaViolation {
    pub detail: String,
}

impl SchemaViolation {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Semantic checks a decoded value must pass beyond shape alone
/// (score ranges, required non-empty fields).
pub trait ValidateSchema {
    fn validate(&self) -> Result<(), SchemaViolation>;
}

/// Terminal failure of a structured call, after the bounded repair attempt.
#[derive(Debug, Error)]
pub enum StructuredCallError {
    #[error("model invocation failed: {0}")]
    Invoke(#[from] InvokeError),

    #[error("output failed schema validation after repair: {0}")]
    Schema(SchemaViolation),
}

/// Decodes raw model text against a typed schema. Never panics on malformed
/// input; fences are stripped first since models wrap JSON in them routinely.
pub fn decode_structured<T>(raw: &str) -> Result<T, SchemaViolation>
where
    T: DeserializeOwned + ValidateSchema,
{
    let text = strip_json_fences(raw);
    let value: T = serde_json::from_str(text).map_err(|e| {
        SchemaViolation::new(format!(
            "response was not valid JSON for the expected schema: {e}"
        ))
    })?;
    value.validate()?;
    Ok(value)
}

/// Runs one structured call: invoke, decode, and on a schema violation
/// re-prompt once with the diagnostic appended as corrective context.
///
/// Transport failures are not repaired here — the invoker already retried
/// them — so they end the call immediately.
pub async fn call_structured<T>(
    invoker: &dyn ModelInvoker,
    prompt: &str,
    system: &str,
) -> Result<T, StructuredCallError>
where
    T: DeserializeOwned + ValidateSchema,
{
    let raw = invoker.invoke(prompt, system).await?;

    let violation = match decode_structured::<T>(&raw) {
        Ok(value) => return Ok(value),
        Err(v) => v,
    };

    warn!("Structured output rejected ({violation}) — issuing corrective re-prompt");

    let repair_prompt = format!(
        "{prompt}\n\nYour previous response was rejected: {violation}. {REPAIR_INSTRUCTION}"
    );

    let raw = invoker.invoke(&repair_prompt, system).await?;
    decode_structured::<T>(&raw).map_err(StructuredCallError::Schema)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
