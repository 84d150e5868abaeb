//! Typed logging helpers

use super::service::AuditService;
use super::types::{AuditEvent, AuditEventType, ClientInfo, NewAuditEvent};

impl AuditService {
    /// Backoffice sign-in refused
    pub fn log_login_blocked(
        &self,
        user_id: &str,
        email: &str,
        reason: &str,
        client: &ClientInfo,
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::LoginBlocked, user_id)
                .detail("email", email)
                .detail("reason", reason)
                .client(client),
        )
    }

    pub fn log_impersonation_start(
        &self,
        admin_user_id: &str,
        seller_user_id: &str,
        seller_email: &str,
        session_id: &str,
        client: &ClientInfo,
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::ImpersonationStart, admin_user_id)
                .admin(admin_user_id)
                .seller(seller_user_id)
                .detail("sessionId", session_id)
                .detail("sellerEmail", seller_email)
                .client(client),
        )
    }

    /// `forced` marks a bulk termination rather than an explicit end call
    pub fn log_impersonation_end(
        &self,
        admin_user_id: &str,
        seller_user_id: &str,
        session_id: &str,
        duration_seconds: u64,
        forced: bool,
        client: &ClientInfo,
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::ImpersonationEnd, admin_user_id)
                .admin(admin_user_id)
                .seller(seller_user_id)
                .detail("sessionId", session_id)
                .detail("durationSeconds", duration_seconds)
                .detail("forced", forced)
                .client(client),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn log_access_denied(
        &self,
        user_id: &str,
        resource: Option<&str>,
        action: Option<&str>,
        role: Option<&str>,
        code: &str,
        reason: &str,
        client: &ClientInfo,
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::AccessDenied, user_id)
                .detail("resource", resource)
                .detail("action", action)
                .detail("role", role)
                .detail("code", code)
                .detail("reason", reason)
                .client(client),
        )
    }

    /// `resource`/`action` name the request that was blocked; scans pass `None`
    pub fn log_role_conflict(
        &self,
        user_id: &str,
        resource: Option<&str>,
        action: Option<&str>,
        role: &str,
        conflicts: &[String],
        client: &ClientInfo,
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::RoleConflict, user_id)
                .detail("resource", resource)
                .detail("action", action)
                .detail("role", role)
                .detail("conflicts", conflicts.to_vec())
                .client(client),
        )
    }

    pub fn log_conflict_resolution(
        &self,
        user_id: &str,
        resolution: &str,
        resolved_by: &str,
        previous_conflicts: &[String],
    ) -> AuditEvent {
        self.log_event(
            NewAuditEvent::new(AuditEventType::RoleConflictResolved, user_id)
                .admin(resolved_by)
                .detail("resolution", resolution)
                .detail("previousConflicts", previous_conflicts.to_vec())
                .client(&ClientInfo::new("system", "conflict-detector")),
        )
    }
}
