//! Request orchestration over the catalog.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

use crate::catalog::{Catalog, Clause, Episode};
use crate::history::{HistoryStore, NewSimulation};
use crate::narrator::Narrator;
use crate::scenario::{match_clauses, AlignmentScore, ByScenario};

use super::error::SimulationError;
use super::export::render_markdown;
use super::types::{ScenarioResult, SimulationResult};

/// Serves simulate and export requests against a loaded catalog.
///
/// Cheap to clone; the catalog and narrator are shared.
#[derive(Debug, Clone)]
pub struct SimulationService {
    catalog: Arc<Catalog>,
    narrator: Arc<Narrator>,
    history: Option<HistoryStore>,
    /// History appends still in flight.
    pending: TaskTracker,
}

impl SimulationService {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, narrator: Arc<Narrator>) -> Self {
        Self {
            catalog,
            narrator,
            history: None,
            pending: TaskTracker::new(),
        }
    }

    /// Append generated scenarios to `store`.
    #[must_use]
    pub fn with_history(mut self, store: HistoryStore) -> Self {
        self.history = Some(store);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn history(&self) -> Option<&HistoryStore> {
        self.history.as_ref()
    }

    /// Wait for history appends started by earlier simulations.
    pub async fn flush_history(&self) {
        self.pending.close();
        self.pending.wait().await;
        self.pending.reopen();
    }

    /// All episodes in source order.
    #[must_use]
    pub fn episodes(&self) -> &[Episode] {
        self.catalog.episodes()
    }

    fn find_episode(&self, episode_id: &str) -> Result<&Episode, SimulationError> {
        self.catalog
            .episode(episode_id)
            .ok_or_else(|| SimulationError::EpisodeNotFound(episode_id.to_string()))
    }

    /// Generate all three scenarios for an episode.
    ///
    /// Non-empty scenarios are narrated concurrently. When a history store is
    /// configured each non-empty scenario is appended under one run id in the
    /// background; a failed append is logged and does not affect the result.
    /// See [`Self::flush_history`].
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EpisodeNotFound`] for an unknown id, or
    /// [`SimulationError::Task`] if a narration task dies.
    pub async fn simulate(&self, episode_id: &str) -> Result<SimulationResult, SimulationError> {
        let episode = self.find_episode(episode_id)?.clone();
        let run_id = Uuid::new_v4();

        let sets: ByScenario<Vec<Clause>> = match_clauses(&episode, self.catalog.clauses())
            .map(|_, clauses| clauses.into_iter().cloned().collect());

        // Dropping the set aborts narrations still running.
        let mut tasks = JoinSet::new();
        for (tag, clauses) in sets {
            if clauses.is_empty() {
                continue;
            }
            let narrator = Arc::clone(&self.narrator);
            let episode = episode.clone();
            tasks.spawn(async move {
                let narrative = narrator.narrate(&episode, &clauses, tag).await;
                let scores = AlignmentScore::for_clauses(&clauses);
                ScenarioResult {
                    tag,
                    clauses,
                    narrative,
                    scores,
                }
            });
        }

        let mut results = ByScenario::from_fn(ScenarioResult::empty);
        while let Some(joined) = tasks.join_next().await {
            let result = joined?;
            let tag = result.tag;
            *results.get_mut(tag) = result;
        }

        if let Some(history) = &self.history {
            let records = history_records(run_id, &episode, &results);
            if !records.is_empty() {
                self.pending.spawn(record_history(history.clone(), records));
            }
        }

        tracing::info!(episode_id = %episode.episode_id, %run_id, "Simulation complete");
        Ok(SimulationResult::from_results(episode, results))
    }

    /// Render the markdown export for an episode.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EpisodeNotFound`] for an unknown id.
    pub fn export(&self, episode_id: &str) -> Result<String, SimulationError> {
        let episode = self.find_episode(episode_id)?;
        let sets = match_clauses(episode, self.catalog.clauses());
        Ok(render_markdown(episode, &sets))
    }
}

fn history_records(
    run_id: Uuid,
    episode: &Episode,
    results: &ByScenario<ScenarioResult>,
) -> Vec<NewSimulation> {
    results
        .iter()
        .filter(|(_, result)| !result.is_empty())
        .map(|(tag, result)| NewSimulation {
            run_id,
            episode_id: episode.episode_id.clone(),
            scenario: tag,
            clauses: result.clauses.clone(),
            narrative: result.narrative.clone(),
            alignment_scores: result.scores,
        })
        .collect()
}

async fn record_history(history: HistoryStore, records: Vec<NewSimulation>) {
    for record in &records {
        if let Err(e) = history.record_simulation(record).await {
            tracing::warn!(
                episode_id = %record.episode_id,
                run_id = %record.run_id,
                scenario = %record.scenario,
                error = %e,
                "Failed to record simulation history"
            );
        }
    }
}
