// All LLM prompt constants for the analysis pipeline.
// One instruction per dimension; the surrounding template is shared.

/// System prompt for dimension evaluation — enforces JSON-only output.
pub const ANALYSIS_SYSTEM: &str =
    "You are an expert recruiter evaluating how well a resume fits a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Shared dimension evaluation template.
/// Replace `{dimension_key}`, `{instruction}`, `{resume_text}`, `{jd_text}` before sending.
pub const DIMENSION_PROMPT_TEMPLATE: &str = r#"Evaluate ONE dimension of resume-to-job fit.

Dimension under evaluation: {dimension_key}

{instruction}

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 75,
  "analysis": "Two to four sentences justifying the score.",
  "insights": "Optional: one concrete observation the candidate should know."
}

Rules:
- "score" is an integer between 0 and 100.
- "analysis" must be grounded in the texts below; do not invent facts.
- "insights" may be omitted if you have nothing beyond the analysis.

RESUME:
{resume_text}

JOB DESCRIPTION:
{jd_text}"#;

pub const KEYWORD_MATCH_INSTRUCTION: &str = "\
    Score the overlap between the concrete terms of the job description \
    (technologies, tools, certifications, domain vocabulary) and the resume. \
    Weigh terms from the requirements section heaviest. A resume that covers \
    every required term scores near 100; one sharing only generic vocabulary \
    scores near 0.";

pub const EXPERIENCE_MATCH_INSTRUCTION: &str = "\
    Score how well the candidate's work history matches the role: years of \
    experience against what is asked, type of work (hands-on, leadership, \
    research), and industry relevance. Discount experience unrelated to the \
    role's core responsibilities.";

pub const QUALIFICATION_MATCH_INSTRUCTION: &str = "\
    Score how well the candidate's qualifications satisfy the stated \
    requirements: role titles, required skills, education, and explicit \
    must-haves. Direct role and skill overlap scores high; missing hard \
    requirements pull the score down sharply.";

pub const CULTURAL_FIT_INSTRUCTION: &str = "\
    Score the alignment between how the candidate describes their way of \
    working (collaboration, ownership, pace) and the signals in the job \
    description's language about team and company culture. Absent signals on \
    either side keep this score middling, not extreme.";

pub const CAREER_TRAJECTORY_INSTRUCTION: &str = "\
    Score whether this role is a sensible next step in the candidate's \
    trajectory: progression of scope and seniority in the resume versus the \
    level the role targets. Flag both overqualification and large jumps.";
