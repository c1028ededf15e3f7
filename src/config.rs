//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main goalsmith configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plan-generation service configuration
    pub planner: PlannerConfig,

    /// Hosted storage backend configuration
    pub backend: BackendConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks the required environment variables early so startup fails with
    /// a clear message instead of a mid-wizard network error.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.planner.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "plan service API key not found. Set the {} environment variable.",
                self.planner.api_key_env
            ));
        }
        if std::env::var(&self.backend.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "backend API key not found. Set the {} environment variable.",
                self.backend.api_key_env
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .goalsmith.yml
        let local_config = PathBuf::from(".goalsmith.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/goalsmith/goalsmith.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("goalsmith").join("goalsmith.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Plan-generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Request timeout in milliseconds (the core enforces no timeout of its
    /// own; this is the transport limit)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://planner.goalsmith.dev".to_string(),
            api_key_env: "GOALSMITH_PLANNER_API_KEY".to_string(),
            timeout_ms: 60_000,
        }
    }
}

impl PlannerConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("environment variable {} not set", self.api_key_env))
    }
}

/// Hosted storage backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the access token
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "https://backend.goalsmith.dev".to_string(),
            api_key_env: "GOALSMITH_BACKEND_API_KEY".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl BackendConfig {
    /// Read the access token from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .context(format!("environment variable {} not set", self.api_key_env))
    }
}
