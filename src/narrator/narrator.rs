//! Scenario narration with template fallback.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{Clause, Episode};
use crate::config::NarratorConfig;
use crate::scenario::ScenarioTag;

use super::prompts::scenario_prompt;
use super::provider::{GenerationError, Provider, TextGenerator};
use super::templates::{render, template_for};

/// Narrative for a scenario without clauses.
pub const NO_CLAUSES_NARRATIVE: &str = "No clauses available";

/// Deterministic narrative built from the template table.
#[must_use]
pub fn fallback_narrative<C: Borrow<Clause>>(
    episode: &Episode,
    clauses: &[C],
    tag: ScenarioTag,
) -> String {
    if clauses.is_empty() {
        return NO_CLAUSES_NARRATIVE.to_string();
    }
    render(template_for(&episode.conflict_type, tag), &episode.title)
}

/// Produces a short description of each scenario.
///
/// Owns an optional external generator. Without one, or when it fails or
/// exceeds the timeout, the template table is used.
#[derive(Clone)]
pub struct Narrator {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl Narrator {
    /// Narrator that only uses the template table.
    #[must_use]
    pub fn fallback_only() -> Self {
        Self {
            generator: None,
            timeout: Duration::ZERO,
        }
    }

    /// Narrator backed by an external generator, bounded by `timeout`.
    #[must_use]
    pub fn with_generator(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
        }
    }

    /// Build from configuration. A missing API key yields a fallback-only narrator.
    #[must_use]
    pub fn from_config(config: &NarratorConfig) -> Self {
        if !config.enabled {
            tracing::info!("External narration disabled, using templates");
            return Self::fallback_only();
        }

        match Provider::from_config(config) {
            Ok(provider) => {
                tracing::info!(provider = ?config.provider, model = %config.model, "External narration enabled");
                Self::with_generator(
                    Arc::new(provider),
                    Duration::from_secs(config.timeout_secs),
                )
            }
            Err(e) => {
                tracing::info!(reason = %e, "External narration unavailable, using templates");
                Self::fallback_only()
            }
        }
    }

    /// Whether an external generator is configured.
    #[must_use]
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Narrate one scenario. Never fails.
    pub async fn narrate<C: Borrow<Clause> + Sync>(
        &self,
        episode: &Episode,
        clauses: &[C],
        tag: ScenarioTag,
    ) -> String {
        if clauses.is_empty() {
            return NO_CLAUSES_NARRATIVE.to_string();
        }

        if let Some(generator) = &self.generator {
            match self.generate(generator.as_ref(), episode, clauses, tag).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::warn!(
                        episode_id = %episode.episode_id,
                        scenario = %tag,
                        error = %e,
                        "Narrative generation failed, using template"
                    );
                }
            }
        }

        fallback_narrative(episode, clauses, tag)
    }

    async fn generate<C: Borrow<Clause> + Sync>(
        &self,
        generator: &dyn TextGenerator,
        episode: &Episode,
        clauses: &[C],
        tag: ScenarioTag,
    ) -> Result<String, GenerationError> {
        let prompt = scenario_prompt(episode, clauses, tag);

        let text = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout)??;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::ParseError("Empty narrative".to_string()));
        }
        Ok(text.to_string())
    }
}

impl Default for Narrator {
    fn default() -> Self {
        Self::fallback_only()
    }
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("has_generator", &self.has_generator())
            .field("timeout", &self.timeout)
            .finish()
    }
}
