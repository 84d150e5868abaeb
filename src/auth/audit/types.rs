//! Audit trail type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Kind of audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    /// Backoffice sign-in refused
    LoginBlocked,
    /// Admin started viewing as a seller
    ImpersonationStart,
    /// Impersonation ended, explicitly or forced
    ImpersonationEnd,
    /// Request rejected by the access gate
    AccessDenied,
    /// Identity carries both admin and merchant traits
    RoleConflict,
    /// A role conflict was resolved by an operator
    RoleConflictResolved,
}

impl AuditEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditEventType::LoginBlocked => "LOGIN_BLOCKED",
            AuditEventType::ImpersonationStart => "IMPERSONATION_START",
            AuditEventType::ImpersonationEnd => "IMPERSONATION_END",
            AuditEventType::AccessDenied => "ACCESS_DENIED",
            AuditEventType::RoleConflict => "ROLE_CONFLICT",
            AuditEventType::RoleConflictResolved => "ROLE_CONFLICT_RESOLVED",
        }
    }
}

impl fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    pub id: String,
    pub event_type: AuditEventType,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_user_id: Option<String>,
    #[serde(default)]
    pub details: Map<String, Value>,
    pub ip_address: String,
    pub user_agent: String,
    pub timestamp: DateTime<Utc>,
}

/// Caller network metadata attached to audit records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub ip_address: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new("unknown", "unknown")
    }
}

/// Input to [`AuditService::log_event`](super::AuditService::log_event)
#[derive(Debug, Clone)]
pub struct NewAuditEvent {
    pub event_type: AuditEventType,
    pub user_id: String,
    pub admin_user_id: Option<String>,
    pub seller_user_id: Option<String>,
    pub details: Map<String, Value>,
    pub client: ClientInfo,
}

impl NewAuditEvent {
    pub fn new(event_type: AuditEventType, user_id: impl Into<String>) -> Self {
        Self {
            event_type,
            user_id: user_id.into(),
            admin_user_id: None,
            seller_user_id: None,
            details: Map::new(),
            client: ClientInfo::default(),
        }
    }

    pub fn admin(mut self, admin_user_id: impl Into<String>) -> Self {
        self.admin_user_id = Some(admin_user_id.into());
        self
    }

    pub fn seller(mut self, seller_user_id: impl Into<String>) -> Self {
        self.seller_user_id = Some(seller_user_id.into());
        self
    }

    pub fn detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn client(mut self, client: &ClientInfo) -> Self {
        self.client = client.clone();
        self
    }
}

/// Query over the in-memory trail. Empty fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditFilter {
    pub event_type: Option<AuditEventType>,
    pub user_id: Option<String>,
    pub admin_user_id: Option<String>,
    pub seller_user_id: Option<String>,
    /// Inclusive lower bound
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound
    pub end: Option<DateTime<Utc>>,
    /// Keep at most this many of the newest matches
    pub limit: Option<usize>,
}

impl AuditFilter {
    pub fn by_type(event_type: AuditEventType) -> Self {
        Self {
            event_type: Some(event_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, event: &AuditEvent) -> bool {
        if self.event_type.is_some_and(|t| t != event.event_type) {
            return false;
        }
        if self.user_id.as_ref().is_some_and(|id| *id != event.user_id) {
            return false;
        }
        if self
            .admin_user_id
            .as_ref()
            .is_some_and(|id| event.admin_user_id.as_ref() != Some(id))
        {
            return false;
        }
        if self
            .seller_user_id
            .as_ref()
            .is_some_and(|id| event.seller_user_id.as_ref() != Some(id))
        {
            return false;
        }
        if self.start.is_some_and(|start| event.timestamp < start) {
            return false;
        }
        if self.end.is_some_and(|end| event.timestamp > end) {
            return false;
        }
        true
    }
}
