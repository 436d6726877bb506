//! Simulation history persistence.

mod error;
mod schema;
mod store;
mod types;

pub use error::HistoryError;
pub use schema::SCHEMA;
pub use store::{default_history_path, HistoryStore};
pub use types::{NewSimulation, SimulationRecord};
