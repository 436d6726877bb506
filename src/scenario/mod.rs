//! Scenario matching and alignment scoring.

mod matcher;
mod scorer;
mod tag;

pub use matcher::{match_clauses, ClauseSets};
pub use scorer::{alignment_score, AlignmentScore, Perspective, SENTINEL_SCORE};
pub use tag::{ByScenario, ScenarioTag, UnknownScenario};
