//! In-memory audit store

use super::dispatcher::AuditDispatcher;
use super::types::{AuditEvent, AuditFilter, NewAuditEvent};
use crate::config::AuditConfig;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Append-only audit trail.
///
/// The in-memory log is the source of truth for the process lifetime. Each
/// appended event is also offered to the [`AuditDispatcher`], whose sinks
/// may fail without affecting the append.
#[derive(Debug)]
pub struct AuditService {
    pub(super) events: RwLock<VecDeque<AuditEvent>>,
    pub(super) max_events: usize,
    retention_days: u32,
    dispatcher: Option<AuditDispatcher>,
}

impl AuditService {
    /// Create a service without secondary sinks
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            max_events: config.max_events,
            retention_days: config.retention_days,
            dispatcher: None,
        }
    }

    /// Create a service forwarding every event to `dispatcher`
    pub fn with_dispatcher(config: &AuditConfig, dispatcher: AuditDispatcher) -> Self {
        Self {
            dispatcher: Some(dispatcher),
            ..Self::new(config)
        }
    }

    /// Append an event. Never fails locally.
    pub fn log_event(&self, input: NewAuditEvent) -> AuditEvent {
        let event = AuditEvent {
            id: crate::utils::generate_id(),
            event_type: input.event_type,
            user_id: input.user_id,
            admin_user_id: input.admin_user_id,
            seller_user_id: input.seller_user_id,
            details: input.details,
            ip_address: input.client.ip_address,
            user_agent: input.client.user_agent,
            timestamp: Utc::now(),
        };

        {
            let mut events = self.events.write();
            events.push_back(event.clone());
            while events.len() > self.max_events {
                events.pop_front();
            }
        }

        debug!(
            event_type = %event.event_type,
            user_id = %event.user_id,
            "Audit event recorded"
        );

        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.dispatch(&event);
        }

        event
    }

    /// Matching events, newest first
    pub fn get_events(&self, filter: &AuditFilter) -> Vec<AuditEvent> {
        let mut matched: Vec<AuditEvent> = self
            .events
            .read()
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect();

        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }

        matched
    }

    /// Drop events strictly older than `days_to_keep` days. Returns the count removed.
    pub fn cleanup_old_logs(&self, days_to_keep: u32) -> usize {
        let cutoff = Utc::now() - Duration::days(i64::from(days_to_keep));

        let mut events = self.events.write();
        let before = events.len();
        events.retain(|event| event.timestamp >= cutoff);
        let removed = before - events.len();

        if removed > 0 {
            info!(removed, days_to_keep, "Pruned old audit events");
        }

        removed
    }

    /// Prune using the configured retention window
    pub fn apply_retention(&self) -> usize {
        self.cleanup_old_logs(self.retention_days)
    }

    pub fn retention_days(&self) -> u32 {
        self.retention_days
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}
