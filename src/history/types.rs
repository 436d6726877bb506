//! History record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Clause;
use crate::scenario::{AlignmentScore, ScenarioTag};

/// A generated scenario to append to the history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSimulation {
    /// Groups the rows written by one simulate call.
    pub run_id: Uuid,
    pub episode_id: String,
    pub scenario: ScenarioTag,
    /// Snapshot of the clauses at generation time.
    pub clauses: Vec<Clause>,
    pub narrative: String,
    pub alignment_scores: AlignmentScore,
}

/// A stored history row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    /// Storage-assigned sequence number.
    pub id: i64,
    pub run_id: Uuid,
    pub episode_id: String,
    pub scenario: ScenarioTag,
    pub clauses: Vec<Clause>,
    pub narrative: String,
    pub alignment_scores: AlignmentScore,
    /// Storage-assigned creation time.
    pub created_at: DateTime<Utc>,
}
