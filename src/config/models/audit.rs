//! Audit trail configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Days of history kept in memory
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Upper bound on in-memory events; oldest are dropped first
    #[serde(default = "default_max_events")]
    pub max_events: usize,
    /// Seconds between retention sweeps
    #[serde(default = "default_daily_interval")]
    pub retention_interval_secs: u64,
    /// Capacity of the sink delivery queue
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Durable JSON-lines file sink
    #[serde(default)]
    pub file_sink: Option<FileSinkConfig>,
    /// External log shipping endpoint
    #[serde(default)]
    pub http_sink: Option<HttpSinkConfig>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            max_events: default_max_events(),
            retention_interval_secs: default_daily_interval(),
            channel_capacity: default_channel_capacity(),
            file_sink: None,
            http_sink: None,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.retention_days == 0 {
            return Err("Audit retention must be at least one day".to_string());
        }
        if self.max_events == 0 {
            return Err("Audit max_events cannot be 0".to_string());
        }
        if self.channel_capacity == 0 {
            return Err("Audit channel_capacity cannot be 0".to_string());
        }
        if self.retention_interval_secs == 0 {
            return Err("Audit retention_interval_secs cannot be 0".to_string());
        }
        if let Some(http) = &self.http_sink {
            if !(http.url.starts_with("http://") || http.url.starts_with("https://")) {
                return Err(format!("Audit http_sink url is not http(s): {}", http.url));
            }
        }
        Ok(())
    }
}

/// JSON-lines file sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSinkConfig {
    /// Output file path
    pub path: String,
}

/// HTTP log shipping sink configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSinkConfig {
    /// Endpoint receiving one POST per event
    pub url: String,
    /// Optional bearer key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_sink_timeout")]
    pub timeout_secs: u64,
}

fn default_retention_days() -> u32 {
    90
}

fn default_max_events() -> usize {
    10_000
}

fn default_channel_capacity() -> usize {
    1024
}

fn default_sink_timeout() -> u64 {
    5
}
