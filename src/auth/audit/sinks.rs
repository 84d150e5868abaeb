//! Secondary audit sinks
//!
//! Sinks receive events after they are already recorded in memory. Delivery
//! is best effort; see [`AuditDispatcher`](super::AuditDispatcher).

use super::types::AuditEvent;
use crate::config::{FileSinkConfig, HttpSinkConfig};
use crate::utils::error::{BackofficeError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Destination for recorded audit events
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Sink name used in log lines
    fn name(&self) -> &str;

    /// Deliver one event
    async fn deliver(&self, event: &AuditEvent) -> Result<()>;
}

/// Durable storage: one JSON document per line
#[derive(Debug, Clone)]
pub struct JsonlFileSink {
    path: PathBuf,
}

impl JsonlFileSink {
    /// Create the sink, making sure the parent directory exists
    pub async fn new(config: &FileSinkConfig) -> Result<Self> {
        let path = PathBuf::from(&config.path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditSink for JsonlFileSink {
    fn name(&self) -> &str {
        "jsonl_file"
    }

    async fn deliver(&self, event: &AuditEvent) -> Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        debug!(event_id = %event.id, path = ?self.path, "Audit event persisted");
        Ok(())
    }
}

/// External log shipping over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuditSink {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpAuditSink {
    pub fn new(config: &HttpSinkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    fn name(&self) -> &str {
        "http"
    }

    async fn deliver(&self, event: &AuditEvent) -> Result<()> {
        let mut request = self.client.post(&self.url).json(event);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(BackofficeError::sink(format!(
                "log shipping endpoint returned {}",
                response.status()
            )));
        }

        debug!(event_id = %event.id, "Audit event shipped");
        Ok(())
    }
}
