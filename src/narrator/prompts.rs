//! Prompts for narrative generation.

use std::borrow::Borrow;

use crate::catalog::{Clause, Episode};
use crate::scenario::ScenarioTag;

use super::provider::NarrativePrompt;

/// System prompt for the narrator.
pub const NARRATOR_SYSTEM_PROMPT: &str = r#"You are a venture capital legal expert analyzing term sheet outcomes from the TV show "Silicon Valley".

You explain what a set of term-sheet clauses means for the people at the table.
Keep it conversational, reference the show's context, and address the founder as "you"."#;

/// Format the user message describing one scenario.
#[must_use]
pub fn format_scenario_prompt<C: Borrow<Clause>>(
    episode: &Episode,
    clauses: &[C],
    tag: ScenarioTag,
) -> String {
    let clause_lines = clauses
        .iter()
        .map(|c| {
            let c = c.borrow();
            format!("- {}: {}", c.short_text, c.explanation)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r"Episode: {id} - {title}
Conflict: {conflict}
Scene: {scene}
Legal Stakes: {stakes}

Scenario: {label}

Clauses in this scenario:
{clause_lines}

Write a concise 2-3 sentence summary explaining:
1. What this outcome means for you, the founder
2. What this outcome means for the VCs
3. The key trade-off or risk in this scenario",
        id = episode.episode_id,
        title = episode.title,
        conflict = episode.conflict_type,
        scene = episode.scene,
        stakes = episode.legal_stakes,
        label = tag.label(),
    )
}

/// Build the full prompt for a scenario.
#[must_use]
pub fn scenario_prompt<C: Borrow<Clause>>(
    episode: &Episode,
    clauses: &[C],
    tag: ScenarioTag,
) -> NarrativePrompt {
    NarrativePrompt {
        system: NARRATOR_SYSTEM_PROMPT.to_string(),
        user: format_scenario_prompt(episode, clauses, tag),
    }
}
