//! Configuration loading and validation.
//!
//! Values come from a TOML file; `DUEL_RANKING_*` environment variables
//! override the file, and command-line flags override both.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::Scope;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    EnvError { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            cors_origin: "*".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Scope used when a request or command does not name one
    pub default_scope: Scope,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub server: ServerConfig,
    pub ranking: RankingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_level: "info".into(),
            server: ServerConfig::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file if present, apply environment overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `DUEL_RANKING_*` overrides looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DUEL_RANKING_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("DUEL_RANKING_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(host) = lookup("DUEL_RANKING_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("DUEL_RANKING_PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::EnvError {
                key: "DUEL_RANKING_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(scope) = lookup("DUEL_RANKING_SCOPE") {
            self.ranking.default_scope = scope.parse().map_err(|_| ConfigError::EnvError {
                key: "DUEL_RANKING_SCOPE",
                value: scope.clone(),
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be greater than 0".into(),
            ));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "data_dir must not be empty".into(),
            ));
        }
        if !is_cors_origin(&self.server.cors_origin) {
            return Err(ConfigError::ValidationError(format!(
                "server.cors_origin must be \"*\" or a scheme://host[:port] origin, got {:?}",
                self.server.cors_origin
            )));
        }
        Ok(())
    }
}

/// `*`, or an `http(s)://host[:port]` origin usable as a header value.
pub fn is_cors_origin(origin: &str) -> bool {
    if origin == "*" {
        return true;
    }
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    match host {
        Some(host) => {
            !host.is_empty()
                && !host.contains(['/', ' ', '*'])
                && HeaderValue::from_str(origin).is_ok()
        }
        None => false,
    }
}
