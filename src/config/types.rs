//! Configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Text-generation provider kind.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Claude,
    Gemini,
}

/// Configuration for the narrative text generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Whether to try the external provider at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider to use (claude or gemini).
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model to use for narration.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Upper bound on one narration, retries included.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f32 {
    0.7
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: ProviderKind::default(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Locations of the static data files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub episodes: PathBuf,
    pub clauses: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            episodes: PathBuf::from("data/episodes.json"),
            clauses: PathBuf::from("data/clauses.json"),
        }
    }
}

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8000;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Simulation history persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    /// Database file. Defaults to [`crate::history::default_history_path`].
    pub path: Option<PathBuf>,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub narrator: NarratorConfig,
    pub history: HistoryConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrator_config_defaults() {
        let config = NarratorConfig::default();
        assert!(config.enabled);
        assert_eq!(config.provider, ProviderKind::Claude);
        assert_eq!(config.max_tokens, 300);
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_narrator_config_deserialize_gemini() {
        let toml = r#"
            provider = "gemini"
            model = "gemini-2.0-flash"
            base_url = "https://generativelanguage.googleapis.com/v1beta"
            api_key_env = "GEMINI_API_KEY"
        "#;
        let config: NarratorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_tokens, 300);
        assert!(config.enabled);
    }

    #[test]
    fn test_app_config_empty_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.data.episodes, PathBuf::from("data/episodes.json"));
        assert!(!config.history.enabled);
        assert!(config.history.path.is_none());
    }

    #[test]
    fn test_app_config_sections() {
        let toml = r#"
            [data]
            episodes = "/srv/sim/episodes.json"

            [server]
            host = "0.0.0.0"
            port = 9000

            [narrator]
            enabled = false
            timeout_secs = 5

            [history]
            enabled = true
            path = "/var/lib/sim/history.db"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.data.episodes, PathBuf::from("/srv/sim/episodes.json"));
        assert_eq!(config.data.clauses, PathBuf::from("data/clauses.json"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert!(!config.narrator.enabled);
        assert_eq!(config.narrator.timeout_secs, 5);
        assert!(config.history.enabled);
        assert_eq!(
            config.history.path,
            Some(PathBuf::from("/var/lib/sim/history.db"))
        );
    }
}
