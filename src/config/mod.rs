//! Configuration management
//!
//! This module handles loading, validation, and access to the service configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{BackofficeError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Application configuration
    pub app: AppConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BackofficeError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML text, apply env overrides and validate
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut app: AppConfig = serde_yaml::from_str(content)
            .map_err(|e| BackofficeError::Config(format!("Failed to parse config: {}", e)))?;
        app.auth.apply_env_overrides();

        let config = Self { app };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut app = AppConfig::default();
        app.auth.apply_env_overrides();

        let config = Self { app };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.app.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.app.auth
    }

    /// Get audit configuration
    pub fn audit(&self) -> &AuditConfig {
        &self.app.audit
    }

    /// Get impersonation configuration
    pub fn impersonation(&self) -> &ImpersonationConfig {
        &self.app.impersonation
    }

    /// Get conflict detection configuration
    pub fn conflicts(&self) -> &ConflictConfig {
        &self.app.conflicts
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.app
            .server
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Server config error: {}", e)))?;

        self.app
            .auth
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Auth config error: {}", e)))?;

        self.app
            .audit
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Audit config error: {}", e)))?;

        self.app
            .impersonation
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Impersonation config error: {}", e)))?;

        self.app
            .conflicts
            .validate()
            .map_err(|e| BackofficeError::Config(format!("Conflict config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.app).map_err(|e| {
            BackofficeError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
