//! HTTP handlers for the simulator API.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use super::api::{EpisodesResponse, ExportResponse, HealthResponse, SimulateRequest};
use super::error::ApiError;
use crate::simulation::{SimulationResult, SimulationService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SimulationService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<SimulationService>) -> Self {
        Self { service }
    }
}

/// GET / - Health check.
pub async fn get_root() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}

/// GET /episodes - List all episodes in source order.
pub async fn get_episodes(State(state): State<AppState>) -> Json<EpisodesResponse> {
    Json(EpisodesResponse {
        episodes: state.service.episodes().to_vec(),
    })
}

/// POST /simulate - Generate all scenarios for an episode.
pub async fn post_simulate(
    State(state): State<AppState>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulationResult>, ApiError> {
    tracing::info!(episode_id = %request.episode_id, mode = %request.mode, "Simulate request");
    let result = state.service.simulate(&request.episode_id).await?;
    Ok(Json(result))
}

/// GET /export/:episode_id - Markdown export of an episode's scenarios.
pub async fn get_export(
    State(state): State<AppState>,
    Path(episode_id): Path<String>,
) -> Result<Json<ExportResponse>, ApiError> {
    let markdown = state.service.export(&episode_id)?;
    Ok(Json(ExportResponse { markdown }))
}
