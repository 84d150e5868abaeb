//! Backoffice access gate

use super::types::{Denial, DenialCode, Requirement};
use crate::auth::audit::{AuditService, ClientInfo};
use crate::auth::conflict::ConflictDetector;
use crate::auth::identity::{AuthenticatedIdentity, IdentityVerifier};
use crate::auth::permissions::get_permissions;
use crate::utils::error::BackofficeError;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// User id recorded when no identity could be resolved
pub const ANONYMOUS_USER: &str = "anonymous";

/// Decides whether a caller may use the backoffice
pub struct RbacGuard {
    verifier: Arc<dyn IdentityVerifier>,
    detector: Arc<ConflictDetector>,
    audit: Arc<AuditService>,
}

impl std::fmt::Debug for RbacGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacGuard").finish_non_exhaustive()
    }
}

impl RbacGuard {
    pub fn new(
        verifier: Arc<dyn IdentityVerifier>,
        detector: Arc<ConflictDetector>,
        audit: Arc<AuditService>,
    ) -> Self {
        Self {
            verifier,
            detector,
            audit,
        }
    }

    /// Verify `token` and check the caller against `requirement`
    pub async fn authorize(
        &self,
        token: Option<&str>,
        requirement: Option<Requirement>,
        client: &ClientInfo,
    ) -> Result<AuthenticatedIdentity, Denial> {
        let identity = self.resolve(token, requirement, client).await?;
        self.authorize_identity(&identity, requirement, client)?;
        Ok(identity)
    }

    /// Check an already verified identity
    pub fn authorize_identity(
        &self,
        identity: &AuthenticatedIdentity,
        requirement: Option<Requirement>,
        client: &ClientInfo,
    ) -> Result<(), Denial> {
        let conflicts = self.detector.check_identity(identity);
        if !conflicts.is_empty() {
            self.audit.log_role_conflict(
                &identity.id,
                requirement.map(|r| r.resource.as_str()),
                requirement.and_then(|r| r.action).map(|a| a.as_str()),
                identity.role.as_str(),
                &conflicts,
                client,
            );
            warn!(
                user_id = %identity.id,
                conflicts = ?conflicts,
                "Backoffice access blocked by role conflict"
            );
            return Err(Denial::new(
                DenialCode::RoleConflict,
                "Account has conflicting role assignments. Contact an administrator.",
            ));
        }

        if identity.is_merchant() {
            return Err(self.deny(
                Some(identity),
                requirement,
                client,
                DenialCode::SellerAccessDenied,
                "Seller accounts cannot access the backoffice",
            ));
        }

        let permissions = get_permissions(identity.role);
        if !permissions.has_backoffice_access() {
            return Err(self.deny(
                Some(identity),
                requirement,
                client,
                DenialCode::InsufficientRole,
                "Role does not grant backoffice access",
            ));
        }

        if let Some(required) = requirement {
            if !permissions.allows(required.resource, required.action) {
                return Err(self.deny(
                    Some(identity),
                    requirement,
                    client,
                    DenialCode::InsufficientPermission,
                    &format!("Missing permission {}", required),
                ));
            }
        }

        debug!(
            user_id = %identity.id,
            role = %identity.role,
            requirement = ?requirement.map(|r| r.to_string()),
            "Backoffice access granted"
        );
        Ok(())
    }

    /// Login-time gate for the backoffice.
    ///
    /// Merchant and conflicting accounts are recorded as `LOGIN_BLOCKED`.
    pub async fn check_backoffice_login(
        &self,
        token: Option<&str>,
        client: &ClientInfo,
    ) -> Result<AuthenticatedIdentity, Denial> {
        let identity = self.resolve(token, None, client).await?;

        let conflicts = self.detector.check_identity(&identity);
        if !conflicts.is_empty() {
            let reason = conflicts.join("; ");
            self.audit
                .log_login_blocked(&identity.id, &identity.email, &reason, client);
            self.audit.log_role_conflict(
                &identity.id,
                None,
                None,
                identity.role.as_str(),
                &conflicts,
                client,
            );
            return Err(Denial::new(
                DenialCode::RoleConflict,
                "Account has conflicting role assignments. Contact an administrator.",
            ));
        }

        if identity.is_merchant() {
            self.audit.log_login_blocked(
                &identity.id,
                &identity.email,
                "Seller account attempted backoffice login",
                client,
            );
            warn!(user_id = %identity.id, "Seller backoffice login blocked");
            return Err(Denial::new(
                DenialCode::SellerAccessDenied,
                "Seller accounts cannot access the backoffice",
            ));
        }

        self.authorize_identity(&identity, None, client)?;
        Ok(identity)
    }

    async fn resolve(
        &self,
        token: Option<&str>,
        requirement: Option<Requirement>,
        client: &ClientInfo,
    ) -> Result<AuthenticatedIdentity, Denial> {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return Err(self.deny(
                None,
                requirement,
                client,
                DenialCode::NoToken,
                "Authentication token required",
            ));
        };

        match self.verifier.verify(token).await {
            Ok(identity) => Ok(identity),
            Err(
                e @ (BackofficeError::Jwt(_)
                | BackofficeError::Auth(_)
                | BackofficeError::Unauthorized(_)),
            ) => {
                debug!("Token verification failed: {}", e);
                Err(self.deny(
                    None,
                    requirement,
                    client,
                    DenialCode::InvalidToken,
                    "Invalid or expired token",
                ))
            }
            Err(e) => {
                error!("Identity verification error: {}", e);
                Err(self.deny(
                    None,
                    requirement,
                    client,
                    DenialCode::AuthError,
                    "Authentication failed",
                ))
            }
        }
    }

    fn deny(
        &self,
        identity: Option<&AuthenticatedIdentity>,
        requirement: Option<Requirement>,
        client: &ClientInfo,
        code: DenialCode,
        reason: &str,
    ) -> Denial {
        let resource = requirement.map(|r| r.resource.as_str());
        let action = requirement.and_then(|r| r.action).map(|a| a.as_str());

        self.audit.log_access_denied(
            identity.map(|i| i.id.as_str()).unwrap_or(ANONYMOUS_USER),
            resource,
            action,
            identity.map(|i| i.role.as_str()),
            code.as_str(),
            reason,
            client,
        );
        warn!(
            code = code.as_str(),
            user_id = identity.map(|i| i.id.as_str()).unwrap_or(ANONYMOUS_USER),
            resource = resource,
            action = action,
            "Backoffice access denied"
        );

        Denial::new(code, reason)
    }
}
