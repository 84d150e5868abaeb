//! Impersonation session lifecycle

use super::types::{
    ImpersonationEnd, ImpersonationSession, ImpersonationStart, SESSION_TTL_SECS,
};
use crate::auth::audit::{AuditService, ClientInfo};
use crate::auth::jwt::JwtHandler;
use crate::config::ImpersonationConfig;
use crate::utils::error::{BackofficeError, Result};
use crate::utils::generate_id;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Session table keyed by session id
type SessionTable = Arc<Mutex<HashMap<String, ImpersonationSession>>>;

/// Starts, validates and ends impersonation sessions.
///
/// At most one live session exists per seller; the check and the insert
/// happen under the same lock.
#[derive(Debug)]
pub struct ImpersonationService {
    pub(super) sessions: SessionTable,
    jwt: Arc<JwtHandler>,
    audit: Arc<AuditService>,
    config: ImpersonationConfig,
}

impl ImpersonationService {
    pub fn new(
        jwt: Arc<JwtHandler>,
        audit: Arc<AuditService>,
        config: ImpersonationConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            jwt,
            audit,
            config,
        }
    }

    /// Begin acting as a seller
    pub async fn start_impersonation(
        &self,
        admin_user_id: &str,
        seller_user_id: &str,
        seller_email: &str,
        client: &ClientInfo,
    ) -> Result<ImpersonationStart> {
        if admin_user_id.is_empty() || seller_user_id.is_empty() {
            return Err(BackofficeError::bad_request(
                "Admin and seller user ids are required",
            ));
        }

        let session_id = generate_id();
        let (session_token, _) = self
            .jwt
            .create_impersonation_token(
                admin_user_id,
                seller_user_id,
                &session_id,
                SESSION_TTL_SECS,
            )
            .await?;

        let started_at = Utc::now();
        let session = ImpersonationSession {
            id: session_id.clone(),
            admin_user_id: admin_user_id.to_string(),
            seller_user_id: seller_user_id.to_string(),
            seller_email: seller_email.to_string(),
            session_token: session_token.clone(),
            started_at,
            expires_at: started_at + Duration::seconds(SESSION_TTL_SECS as i64),
            ended_at: None,
            is_active: true,
        };
        let expires_at = session.expires_at;

        {
            let mut sessions = self.sessions.lock();
            if sessions
                .values()
                .any(|s| s.seller_user_id == seller_user_id && s.is_live_at(started_at))
            {
                warn!(
                    admin_user_id = admin_user_id,
                    seller_user_id = seller_user_id,
                    "Impersonation refused, seller already impersonated"
                );
                return Err(BackofficeError::conflict(
                    "Seller is already being impersonated by another admin",
                ));
            }
            sessions.insert(session_id.clone(), session);
        }

        self.audit.log_impersonation_start(
            admin_user_id,
            seller_user_id,
            seller_email,
            &session_id,
            client,
        );
        info!(
            session_id = %session_id,
            admin_user_id = admin_user_id,
            seller_user_id = seller_user_id,
            "Impersonation started"
        );

        Ok(ImpersonationStart {
            dashboard_url: format!(
                "{}?impersonating={}",
                self.config.dashboard_base_url, seller_user_id
            ),
            session_id,
            session_token,
            expires_at,
        })
    }

    /// End the session carried by `token`
    pub async fn end_impersonation(
        &self,
        token: &str,
        client: &ClientInfo,
    ) -> Result<ImpersonationEnd> {
        self.end_session(token, None, client).await
    }

    /// End the session carried by `token` only if `admin_user_id` started it
    pub async fn end_own_impersonation(
        &self,
        token: &str,
        admin_user_id: &str,
        client: &ClientInfo,
    ) -> Result<ImpersonationEnd> {
        self.end_session(token, Some(admin_user_id), client).await
    }

    async fn end_session(
        &self,
        token: &str,
        owner: Option<&str>,
        client: &ClientInfo,
    ) -> Result<ImpersonationEnd> {
        let claims = self
            .jwt
            .verify_impersonation_token(token)
            .await
            .map_err(|e| {
                debug!("Impersonation token rejected: {}", e);
                BackofficeError::unauthorized("Invalid impersonation token")
            })?;

        let now = Utc::now();
        let ended = {
            let mut sessions = self.sessions.lock();
            let session = sessions
                .get_mut(&claims.session_id)
                .ok_or_else(|| BackofficeError::not_found("Impersonation session not found"))?;
            if owner.is_some_and(|id| id != session.admin_user_id) {
                warn!(
                    session_id = %session.id,
                    admin_user_id = %session.admin_user_id,
                    requested_by = owner.unwrap_or_default(),
                    "Refusing to end another admin's impersonation session"
                );
                return Err(BackofficeError::forbidden(
                    "Impersonation session belongs to another admin",
                ));
            }
            if !session.is_active {
                return Err(BackofficeError::conflict("Impersonation session already ended"));
            }
            session.is_active = false;
            session.ended_at = Some(now);
            session.clone()
        };

        let duration_seconds = ended.duration_seconds(now);
        self.audit.log_impersonation_end(
            &ended.admin_user_id,
            &ended.seller_user_id,
            &ended.id,
            duration_seconds,
            false,
            client,
        );
        info!(
            session_id = %ended.id,
            duration_seconds = duration_seconds,
            "Impersonation ended"
        );

        self.schedule_removal(ended.id.clone());

        Ok(ImpersonationEnd {
            session_id: ended.id,
            duration_seconds,
        })
    }

    fn schedule_removal(&self, session_id: String) {
        let sessions = Arc::clone(&self.sessions);
        let grace = std::time::Duration::from_secs(self.config.end_grace_secs);
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let mut sessions = sessions.lock();
            if sessions.get(&session_id).is_some_and(|s| !s.is_active) {
                sessions.remove(&session_id);
                debug!(session_id = %session_id, "Ended impersonation session removed");
            }
        });
    }

    /// The live session behind `token`, if any
    pub async fn validate_impersonation_token(&self, token: &str) -> Option<ImpersonationSession> {
        let claims = self.jwt.verify_impersonation_token(token).await.ok()?;

        let sessions = self.sessions.lock();
        let session = sessions.get(&claims.session_id)?;
        if session.session_token != token || !session.is_live_at(Utc::now()) {
            return None;
        }
        Some(session.clone())
    }

    /// Deactivate every live session started by `admin_user_id`
    pub fn force_end_admin_sessions(&self, admin_user_id: &str, client: &ClientInfo) -> usize {
        let now = Utc::now();
        let ended: Vec<ImpersonationSession> = {
            let mut sessions = self.sessions.lock();
            sessions
                .values_mut()
                .filter(|s| s.admin_user_id == admin_user_id && s.is_live_at(now))
                .map(|s| {
                    s.is_active = false;
                    s.ended_at = Some(now);
                    s.clone()
                })
                .collect()
        };

        for session in &ended {
            self.audit.log_impersonation_end(
                &session.admin_user_id,
                &session.seller_user_id,
                &session.id,
                session.duration_seconds(now),
                true,
                client,
            );
        }

        if !ended.is_empty() {
            warn!(
                admin_user_id = admin_user_id,
                count = ended.len(),
                "Impersonation sessions force-ended"
            );
        }
        ended.len()
    }

    /// Drop expired and inactive sessions
    pub fn cleanup_expired_sessions(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, s| s.is_live_at(now));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!("Removed {} stale impersonation sessions", removed);
        }
        removed
    }

    /// Live sessions, oldest first
    pub fn active_sessions(&self) -> Vec<ImpersonationSession> {
        let now = Utc::now();
        let mut active: Vec<ImpersonationSession> = self
            .sessions
            .lock()
            .values()
            .filter(|s| s.is_live_at(now))
            .cloned()
            .collect();
        active.sort_by_key(|s| s.started_at);
        active
    }

    /// Sessions currently held in the table, ended ones included
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }
}
