//! Scenario narration: external text generation with a template fallback.

#[allow(clippy::module_inception)]
mod narrator;
mod prompts;
mod provider;
mod templates;

pub use narrator::{fallback_narrative, Narrator, NO_CLAUSES_NARRATIVE};
pub use prompts::{format_scenario_prompt, scenario_prompt, NARRATOR_SYSTEM_PROMPT};
pub use provider::{
    ClaudeProvider, GeminiProvider, GenerationError, NarrativePrompt, Provider, TextGenerator,
};
pub use templates::{render, template_for, CONFLICT_TEMPLATES, GENERIC_TEMPLATES};
