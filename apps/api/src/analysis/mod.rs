// Resume-fit analysis pipeline.
// Implements: dimension agents, concurrent orchestration, degradation policy,
// deterministic aggregation. All LLM calls go through llm_client's
// ModelInvoker — no direct vendor calls here.

pub mod dimensions;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod report;
pub mod summary;
