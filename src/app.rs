//! Wiring of configuration into a ready simulation service.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::{AppConfig, ConfigError};
use crate::history::{default_history_path, HistoryError, HistoryStore};
use crate::narrator::Narrator;
use crate::server::ServerError;
use crate::simulation::{SimulationError, SimulationService};

/// Errors reported by the binary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    /// History was requested but is disabled in configuration.
    #[error("History is disabled; set [history] enabled = true")]
    HistoryDisabled,
}

/// Open the configured history store, if enabled.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub async fn open_history(config: &AppConfig) -> Result<Option<HistoryStore>, HistoryError> {
    if !config.history.enabled {
        return Ok(None);
    }

    let path = config
        .history
        .path
        .clone()
        .unwrap_or_else(default_history_path);
    let store = HistoryStore::open(&path).await?;
    tracing::info!(path = %path.display(), "History store opened");
    Ok(Some(store))
}

/// Load the catalog, build the narrator and attach history.
///
/// With `with_history` set and history enabled in `config`, the catalog is
/// mirrored into the store before the service is returned.
///
/// # Errors
///
/// Returns an error if the history store cannot be opened or mirrored.
pub async fn build_service(
    config: &AppConfig,
    with_history: bool,
) -> Result<SimulationService, AppError> {
    let catalog = Arc::new(Catalog::load(&config.data.episodes, &config.data.clauses));
    let narrator = Arc::new(Narrator::from_config(&config.narrator));
    let service = SimulationService::new(Arc::clone(&catalog), narrator);

    if !with_history {
        return Ok(service);
    }

    match open_history(config).await? {
        Some(store) => {
            store.mirror_catalog(&catalog).await?;
            Ok(service.with_history(store))
        }
        None => Ok(service),
    }
}
