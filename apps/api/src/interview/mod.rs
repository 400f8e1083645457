// Interview feedback pipeline.
// Per-question structured critiques under an all-or-nothing failure policy.

pub mod feedback;
pub mod handlers;
pub mod prompts;
