//! Backoffice access control
//!
//! Role permissions, role-conflict detection, seller impersonation and the
//! audit trail, plus the gate that combines them for every backoffice request.

pub mod audit;
pub mod conflict;
pub mod guard;
pub mod identity;
pub mod impersonation;
pub mod jwt;
pub mod permissions;

pub use identity::{AuthenticatedIdentity, IdentityVerifier};

use crate::config::Config;
use crate::utils::error::Result;
use audit::{AuditDispatcher, AuditService, AuditSink, HttpAuditSink, JsonlFileSink};
use conflict::{ConflictDetector, ConflictRules, InMemoryUserDirectory, UserDirectory};
use guard::RbacGuard;
use impersonation::ImpersonationService;
use jwt::JwtHandler;
use std::sync::Arc;
use tracing::info;

/// Every access-control service, wired together
#[derive(Debug, Clone)]
pub struct AccessControl {
    jwt: Arc<JwtHandler>,
    audit: Arc<AuditService>,
    detector: Arc<ConflictDetector>,
    impersonation: Arc<ImpersonationService>,
    guard: Arc<RbacGuard>,
}

impl AccessControl {
    /// Build the services with the built-in JWT verifier.
    ///
    /// Must be called inside a Tokio runtime when audit sinks are configured.
    pub async fn new(config: &Config, directory: Arc<dyn UserDirectory>) -> Result<Self> {
        let jwt = Arc::new(JwtHandler::new(config.auth())?);
        Self::with_verifier(config, directory, jwt.clone(), jwt).await
    }

    /// Build the services with a custom identity verifier
    pub async fn with_verifier(
        config: &Config,
        directory: Arc<dyn UserDirectory>,
        jwt: Arc<JwtHandler>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Result<Self> {
        info!("Initializing access control");

        let sinks = build_sinks(config).await?;
        let audit = if sinks.is_empty() {
            Arc::new(AuditService::new(config.audit()))
        } else {
            let (dispatcher, _handle) =
                AuditDispatcher::spawn(sinks, config.audit().channel_capacity);
            info!(sinks = ?dispatcher.sink_names(), "Audit sinks enabled");
            Arc::new(AuditService::with_dispatcher(config.audit(), dispatcher))
        };

        let detector = Arc::new(ConflictDetector::new(
            directory,
            audit.clone(),
            ConflictRules::from(config.conflicts()),
        ));
        let impersonation = Arc::new(ImpersonationService::new(
            jwt.clone(),
            audit.clone(),
            config.impersonation().clone(),
        ));
        let guard = Arc::new(RbacGuard::new(verifier, detector.clone(), audit.clone()));

        info!("Access control initialized successfully");
        Ok(Self {
            jwt,
            audit,
            detector,
            impersonation,
            guard,
        })
    }

    pub fn jwt(&self) -> &Arc<JwtHandler> {
        &self.jwt
    }

    pub fn audit(&self) -> &Arc<AuditService> {
        &self.audit
    }

    pub fn conflicts(&self) -> &Arc<ConflictDetector> {
        &self.detector
    }

    pub fn impersonation(&self) -> &Arc<ImpersonationService> {
        &self.impersonation
    }

    pub fn guard(&self) -> &Arc<RbacGuard> {
        &self.guard
    }
}

/// Open the user directory named in the config, or an empty one
pub async fn load_directory(config: &Config) -> Result<Arc<dyn UserDirectory>> {
    match &config.conflicts().users_file {
        Some(path) => Ok(Arc::new(InMemoryUserDirectory::from_file(path).await?)),
        None => Ok(Arc::new(InMemoryUserDirectory::new())),
    }
}

async fn build_sinks(config: &Config) -> Result<Vec<Arc<dyn AuditSink>>> {
    let mut sinks: Vec<Arc<dyn AuditSink>> = Vec::new();

    if let Some(file) = &config.audit().file_sink {
        sinks.push(Arc::new(JsonlFileSink::new(file).await?));
    }
    if let Some(http) = &config.audit().http_sink {
        sinks.push(Arc::new(HttpAuditSink::new(http)?));
    }

    Ok(sinks)
}
