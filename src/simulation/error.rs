//! Simulation error types.

/// Errors surfaced by the simulation service.
#[derive(thiserror::Error, Debug)]
pub enum SimulationError {
    /// The requested episode does not exist.
    #[error("Episode not found: {0}")]
    EpisodeNotFound(String),

    /// A narration task panicked or was cancelled.
    #[error("Narration task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SimulationError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EpisodeNotFound(_))
    }
}
