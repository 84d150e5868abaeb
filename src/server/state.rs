//! Application state shared across HTTP handlers

use crate::auth::AccessControl;
use crate::config::Config;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every worker; all fields are cheap `Arc` handles.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Access-control services
    pub access: AccessControl,
}

impl AppState {
    pub fn new(config: Config, access: AccessControl) -> Self {
        Self {
            config: Arc::new(config),
            access,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }
}
