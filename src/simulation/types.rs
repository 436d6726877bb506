//! Simulation result types.

use serde::{Deserialize, Serialize};

use crate::catalog::{Clause, Episode};
use crate::narrator::NO_CLAUSES_NARRATIVE;
use crate::scenario::{AlignmentScore, ByScenario, ScenarioTag};

/// The outcome computed for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub tag: ScenarioTag,
    pub clauses: Vec<Clause>,
    pub narrative: String,
    pub scores: AlignmentScore,
}

impl ScenarioResult {
    /// Result for a scenario without clauses.
    #[must_use]
    pub fn empty(tag: ScenarioTag) -> Self {
        Self {
            tag,
            clauses: Vec::new(),
            narrative: NO_CLAUSES_NARRATIVE.to_string(),
            scores: AlignmentScore::SENTINEL,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Clauses and narrative for one scenario, as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPayload {
    pub clauses: Vec<Clause>,
    pub narrative: String,
}

/// Full answer to a simulate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub episode: Episode,
    pub scenarios: ByScenario<ScenarioPayload>,
    pub alignment_scores: ByScenario<AlignmentScore>,
}

impl SimulationResult {
    /// Assemble the wire shape from per-scenario results.
    #[must_use]
    pub fn from_results(episode: Episode, results: ByScenario<ScenarioResult>) -> Self {
        let alignment_scores = ByScenario::from_fn(|tag| results.get(tag).scores);
        let scenarios = results.map(|_, r| ScenarioPayload {
            clauses: r.clauses,
            narrative: r.narrative,
        });

        Self {
            episode,
            scenarios,
            alignment_scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{clause, episode};

    #[test]
    fn test_empty_result_uses_sentinels() {
        let result = ScenarioResult::empty(ScenarioTag::WinWin);
        assert!(result.is_empty());
        assert_eq!(result.narrative, "No clauses available");
        assert_eq!(result.scores, AlignmentScore::SENTINEL);
    }

    #[test]
    fn test_wire_shape() {
        let clauses = vec![clause("A", "board_control", "VC_bias", 90, 10)];
        let results = ByScenario {
            vc_win: ScenarioResult {
                tag: ScenarioTag::VcWin,
                scores: AlignmentScore::for_clauses(&clauses),
                clauses,
                narrative: "VCs win.".to_string(),
            },
            founder_win: ScenarioResult::empty(ScenarioTag::FounderWin),
            winwin: ScenarioResult::empty(ScenarioTag::WinWin),
        };

        let result = SimulationResult::from_results(
            episode("S1E1", "board_control", "Minimum Viable Product"),
            results,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["episode"]["episode_id"], "S1E1");
        assert_eq!(json["scenarios"]["vc_win"]["narrative"], "VCs win.");
        assert_eq!(json["scenarios"]["vc_win"]["clauses"][0]["clause_id"], "A");
        assert_eq!(json["scenarios"]["winwin"]["clauses"], serde_json::json!([]));
        assert_eq!(json["alignment_scores"]["vc_win"]["vc"], 90);
        assert_eq!(
            json["alignment_scores"]["founder_win"],
            serde_json::json!({"vc": 50, "founder": 50, "balance": 50})
        );
    }
}
