//! HTTP server with axum router and graceful shutdown.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use super::error::ServerError;
use super::handlers::{get_episodes, get_export, get_root, post_simulate, AppState};
use crate::config::ServerConfig;
use crate::simulation::SimulationService;

/// HTTP front end for the simulation service.
pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
    cancel: CancellationToken,
}

impl ApiServer {
    /// Create a server with default configuration.
    #[must_use]
    pub fn new(service: Arc<SimulationService>, cancel: CancellationToken) -> Self {
        Self {
            config: ServerConfig::default(),
            state: AppState::new(service),
            cancel,
        }
    }

    /// Set the server configuration (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configured address as a string.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the axum router with all routes and middleware.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/", get(get_root))
            .route("/episodes", get(get_episodes))
            .route("/simulate", post(post_simulate))
            .route("/export/:episode_id", get(get_export))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured address and serve until cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or serve.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::BindError {
                address: addr.clone(),
                source,
            })?;

        self.run_with_listener(listener).await
    }

    /// Serve on an already bound listener until cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let cancel = self.cancel.clone();
        let app = self.build_router();

        match listener.local_addr() {
            Ok(local) => tracing::info!(address = %local, "Starting API server"),
            Err(_) => tracing::info!(address = %self.address(), "Starting API server"),
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("API server shutting down gracefully");
            })
            .await
            .map_err(ServerError::ServeError)
    }
}
