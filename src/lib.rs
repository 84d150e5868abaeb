//! # backoffice-rbac
//!
//! Access control for a payments backoffice: a static role permission table,
//! role-conflict detection, time-boxed seller impersonation and an append-only
//! audit trail, exposed through an actix-web middleware and HTTP API.
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use backoffice_rbac::{Backoffice, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/backoffice.yaml").await?;
//!     let backoffice = Backoffice::new(config).await?;
//!     backoffice.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod utils;

// Re-export main types
pub use auth::guard::{Denial, DenialCode, RbacGuard, Requirement};
pub use auth::permissions::{
    Action, PermissionSet, Resource, Role, UserType, can_access, get_permissions,
};
pub use auth::{AccessControl, AuthenticatedIdentity, IdentityVerifier};
pub use config::Config;
pub use server::middleware::RbacMiddleware;
pub use utils::error::{BackofficeError, Result};

use services::{BackgroundSchedule, BackgroundTasks};
use tracing::info;

/// Backoffice service instance
pub struct Backoffice {
    config: Config,
    access: AccessControl,
}

impl Backoffice {
    /// Build the access-control services from configuration
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating backoffice instance");

        let directory = auth::load_directory(&config).await?;
        let access = AccessControl::new(&config, directory).await?;

        Ok(Self { config, access })
    }

    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Run housekeeping and the HTTP server until the server stops
    pub async fn run(self) -> Result<()> {
        info!("Starting backoffice access-control service");

        let background =
            BackgroundTasks::start(&self.access, BackgroundSchedule::from(&self.config));
        let server = server::HttpServer::new(&self.config, self.access);

        let result = server.start().await;
        background.shutdown().await;
        result
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
