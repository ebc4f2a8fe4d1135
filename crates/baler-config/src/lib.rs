#![deny(unsafe_code)]

//! Configuration loading, validation, and pack-option normalization for Baler.
//!
//! Loads TOML configuration files and validates them against expected schemas.
//! Provides the [`AppConfig`] type as the central configuration structure,
//! and the [`options`] module for normalizing sparse caller-supplied pack
//! options into a total configuration.

/// Sparse pack options and their normalized form.
pub mod options;

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP service configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Packaging engine invocation configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the HTTP pack service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the service listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Port the service listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Origins allowed to issue cross-origin requests.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Per-request processing ceiling in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            listen_port: default_listen_port(),
            allowed_origins: default_allowed_origins(),
            request_timeout_ms: default_request_timeout_ms(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_listen_port() -> u16 {
    3000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "https://baler.dev".to_string(),
    ]
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_max_body_bytes() -> usize {
    50 * 1024 // 50 KiB
}

/// Configuration for invoking the external packaging engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine executable to invoke.
    #[serde(default = "default_engine_command")]
    pub command: String,

    /// Extra arguments passed to the engine before the request.
    #[serde(default)]
    pub args: Vec<String>,

    /// Engine execution deadline in seconds (0 = no deadline).
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            args: Vec::new(),
            timeout_secs: 0,
        }
    }
}

fn default_engine_command() -> String {
    "baler-engine".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen_port == 0 {
            return Err(ConfigError::Validation(
                "server.listen_port must be non-zero".to_string(),
            ));
        }
        if self.server.listen_addr.is_empty() {
            return Err(ConfigError::Validation(
                "server.listen_addr must not be empty".to_string(),
            ));
        }
        if self.server.allowed_origins.is_empty() {
            return Err(ConfigError::Validation(
                "server.allowed_origins must list at least one origin".to_string(),
            ));
        }
        for (i, origin) in self.server.allowed_origins.iter().enumerate() {
            if !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "server.allowed_origins[{i}] must be an http(s) origin, got {origin:?}"
                )));
            }
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "server.request_timeout_ms must be non-zero".to_string(),
            ));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_body_bytes must be non-zero".to_string(),
            ));
        }
        if self.engine.command.is_empty() {
            return Err(ConfigError::Validation(
                "engine.command must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
