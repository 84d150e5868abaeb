//! Impersonation configuration

use serde::{Deserialize, Serialize};

/// Impersonation session housekeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpersonationConfig {
    /// Seconds between expiry sweeps
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
    /// Seconds an ended session stays in the table before removal
    #[serde(default = "default_end_grace")]
    pub end_grace_secs: u64,
    /// Merchant dashboard entry point
    #[serde(default = "default_dashboard_base_url")]
    pub dashboard_base_url: String,
}

impl Default for ImpersonationConfig {
    fn default() -> Self {
        Self {
            cleanup_interval_secs: default_cleanup_interval(),
            end_grace_secs: default_end_grace(),
            dashboard_base_url: default_dashboard_base_url(),
        }
    }
}

impl ImpersonationConfig {
    /// Validate impersonation configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cleanup_interval_secs == 0 {
            return Err("Impersonation cleanup_interval_secs cannot be 0".to_string());
        }
        if self.dashboard_base_url.is_empty() {
            return Err("Impersonation dashboard_base_url cannot be empty".to_string());
        }
        Ok(())
    }
}

fn default_cleanup_interval() -> u64 {
    60
}

fn default_end_grace() -> u64 {
    5
}

fn default_dashboard_base_url() -> String {
    "/dashboard".to_string()
}
