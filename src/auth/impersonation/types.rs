//! Impersonation session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed lifetime of an impersonation session and its token
pub const SESSION_TTL_SECS: u64 = 2 * 60 * 60;

/// An admin acting as a seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationSession {
    pub id: String,
    pub admin_user_id: String,
    pub seller_user_id: String,
    pub seller_email: String,
    #[serde(skip_serializing, default)]
    pub session_token: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl ImpersonationSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Active and not yet expired
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired_at(now)
    }

    /// Whole seconds between start and `until`, never negative
    pub fn duration_seconds(&self, until: DateTime<Utc>) -> u64 {
        (until - self.started_at).num_seconds().max(0) as u64
    }
}

/// Result of starting a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationStart {
    pub session_id: String,
    pub session_token: String,
    pub dashboard_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Result of ending a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpersonationEnd {
    pub session_id: String,
    pub duration_seconds: u64,
}
