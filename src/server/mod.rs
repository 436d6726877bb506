//! HTTP API for the simulator.

mod api;
mod error;
mod handlers;
#[allow(clippy::module_inception)]
mod server;

pub use api::{
    EpisodesResponse, ErrorResponse, ExportResponse, HealthResponse, SimulateRequest, ENDPOINTS,
};
pub use error::{ApiError, ServerError};
pub use handlers::AppState;
pub use server::ApiServer;
