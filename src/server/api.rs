//! Request and response types for the HTTP endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog::Episode;

/// Endpoints listed by the health check.
pub const ENDPOINTS: [&str; 4] = ["/", "/episodes", "/simulate", "/export/:episode_id"];

/// Response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub app: String,
    pub version: String,
    pub status: String,
    pub endpoints: Vec<String>,
}

impl HealthResponse {
    #[must_use]
    pub fn running() -> Self {
        Self {
            app: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Response for `GET /episodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodesResponse {
    pub episodes: Vec<Episode>,
}

/// Body of `POST /simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub episode_id: String,
    /// Accepted for compatibility; every scenario is always generated.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "all".to_string()
}

/// Response for `GET /export/:episode_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    pub markdown: String,
}

/// Error body for failed requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_request_mode_defaults_to_all() {
        let req: SimulateRequest = serde_json::from_str(r#"{"episode_id": "S1E1"}"#).unwrap();
        assert_eq!(req.episode_id, "S1E1");
        assert_eq!(req.mode, "all");

        let req: SimulateRequest =
            serde_json::from_str(r#"{"episode_id": "S1E1", "mode": "vc_win"}"#).unwrap();
        assert_eq!(req.mode, "vc_win");
    }

    #[test]
    fn test_simulate_request_requires_episode_id() {
        assert!(serde_json::from_str::<SimulateRequest>(r#"{"mode": "all"}"#).is_err());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::running();
        assert_eq!(health.status, "running");
        assert_eq!(health.app, "legal-simulator");
        assert!(health.endpoints.contains(&"/simulate".to_string()));
    }
}
