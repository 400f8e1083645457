// LLM prompt constants for the interview feedback pipeline.

/// System prompt for answer critique — enforces JSON-only output.
pub const FEEDBACK_SYSTEM: &str =
    "You are an experienced interview coach reviewing a candidate's answer to \
    one interview question. Be specific and constructive. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Per-question critique template.
/// Replace `{question}` and `{answer}` before sending.
pub const QUESTION_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Critique the candidate's answer to the interview question below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 55,
  "areasOfImprovement": [
    "One concrete, actionable improvement per entry."
  ],
  "suggestedAnswer": "A stronger answer the candidate could have given, in their voice."
}

Rules:
- "score" is an integer between 0 and 100 reflecting answer quality.
- An empty or evasive answer scores near 0 and must list what was missing.
- "areasOfImprovement" may be empty only for a genuinely excellent answer.
- "suggestedAnswer" is always required and must actually answer the question.

QUESTION:
{question}

CANDIDATE ANSWER:
{answer}"#;
