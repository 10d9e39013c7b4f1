//! TOML-based configuration for jwt-gate
//!
//! Server and token settings are read from `jwt-gate.toml`. The signing
//! secret never lives in the file: `auth.jwt_secret_env` names the
//! environment variable that holds it.

use crate::auth::claims::ReservedClaimPolicy;
use crate::auth::jwt::{DEFAULT_EXPIRY_MINUTES, TokenConfig, parse_algorithm};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "jwt-gate.toml";

/// Root configuration structure loaded from jwt-gate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Log line format for the binary's subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Token lifetime in minutes; 0 means the default
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: u32,

    #[serde(default)]
    pub reserved_claims: ReservedClaimPolicy,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiry_minutes() -> u32 {
    DEFAULT_EXPIRY_MINUTES
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            algorithm: default_algorithm(),
            expiry_minutes: default_expiry_minutes(),
            reserved_claims: ReservedClaimPolicy::default(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Unsupported signing algorithm '{0}' (expected HS256, HS384 or HS512)")]
    InvalidAlgorithm(String),
}

impl GateConfig {
    /// Parse configuration from TOML text without validating it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Parse the file if it exists, otherwise use the defaults. Nothing is
    /// validated, so the result can be shown before it is checked.
    pub fn read_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate ports, the algorithm, and that the secret is available
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }

        parse_algorithm(&self.auth.algorithm)
            .map_err(|_| ConfigError::InvalidAlgorithm(self.auth.algorithm.clone()))?;

        self.jwt_secret()?;
        Ok(())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        std::env::var(&self.auth.jwt_secret_env)
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Build the codec configuration, resolving the secret from the environment.
    pub fn token_config(&self) -> Result<TokenConfig, ConfigError> {
        let algorithm = parse_algorithm(&self.auth.algorithm)
            .map_err(|_| ConfigError::InvalidAlgorithm(self.auth.algorithm.clone()))?;

        Ok(TokenConfig::new(self.jwt_secret()?)
            .with_algorithm(algorithm)
            .with_expiry_minutes(self.auth.expiry_minutes)
            .with_reserved_claims(self.auth.reserved_claims))
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
