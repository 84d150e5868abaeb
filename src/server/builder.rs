//! Server startup
//!
//! Resolves configuration for the binary and hands it to [`Backoffice`].

use crate::Backoffice;
use crate::config::Config;
use crate::utils::error::Result;
use std::path::Path;
use tracing::{info, warn};

/// Load the config file, falling back to defaults plus environment
pub async fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        info!("Loading configuration file: {}", path.display());
        Config::from_file(path).await
    } else {
        warn!(
            "Configuration file {} not found, using defaults and environment",
            path.display()
        );
        Config::from_env()
    }
}

/// Run the backoffice server until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let address = config.server().address();
    let backoffice = Backoffice::new(config).await?;

    info!("Server starting at: http://{}", address);
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /api/auth/backoffice-login - Backoffice login gate");
    info!("   GET  /api/impersonation/session - Impersonation session lookup");
    info!("   *    /api/backoffice/... - Audit, conflicts and impersonation");

    backoffice.run().await
}
