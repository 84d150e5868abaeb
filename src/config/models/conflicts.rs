//! Role conflict detection configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Role conflict detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictConfig {
    /// Run the scheduled scan
    #[serde(default = "default_true")]
    pub scan_enabled: bool,
    /// Seconds between scheduled scans
    #[serde(default = "default_daily_interval")]
    pub scan_interval_secs: u64,
    /// Treat an administrative role carrying a company id as a conflict
    #[serde(default = "default_true")]
    pub flag_admin_with_company: bool,
    /// JSON file seeding the in-memory user directory
    #[serde(default)]
    pub users_file: Option<String>,
}

impl Default for ConflictConfig {
    fn default() -> Self {
        Self {
            scan_enabled: true,
            scan_interval_secs: default_daily_interval(),
            flag_admin_with_company: true,
            users_file: None,
        }
    }
}

impl ConflictConfig {
    /// Validate conflict configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.scan_enabled && self.scan_interval_secs == 0 {
            return Err("Conflict scan_interval_secs cannot be 0".to_string());
        }
        Ok(())
    }
}
