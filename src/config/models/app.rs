//! Top-level application configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Token configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Audit trail configuration
    #[serde(default)]
    pub audit: AuditConfig,
    /// Impersonation configuration
    #[serde(default)]
    pub impersonation: ImpersonationConfig,
    /// Role conflict configuration
    #[serde(default)]
    pub conflicts: ConflictConfig,
}
