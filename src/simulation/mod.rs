//! Scenario simulation and export.

mod error;
mod export;
mod service;
mod types;

pub use error::SimulationError;
pub use export::render_markdown;
pub use service::SimulationService;
pub use types::{ScenarioPayload, ScenarioResult, SimulationResult};
