//! CSV export of the audit trail

use super::service::AuditService;
use super::types::{AuditEvent, AuditFilter};
use crate::utils::csv;
use chrono::SecondsFormat;

pub(super) const CSV_HEADER: &str =
    "id,event_type,user_id,admin_user_id,seller_user_id,ip_address,user_agent,timestamp,details";

impl AuditService {
    /// Header row plus one row per matching event, newest first
    pub fn export_audit_logs(&self, filter: Option<&AuditFilter>) -> String {
        let default_filter = AuditFilter::default();
        let events = self.get_events(filter.unwrap_or(&default_filter));

        let mut out = String::with_capacity(CSV_HEADER.len() + events.len() * 160);
        out.push_str(CSV_HEADER);
        out.push('\n');

        for event in &events {
            out.push_str(&event_row(event));
            out.push('\n');
        }

        out
    }
}

fn event_row(event: &AuditEvent) -> String {
    // Map<String, Value> always serializes.
    let details = serde_json::to_string(&event.details).unwrap_or_else(|_| "{}".to_string());

    csv::row([
        csv::escape(&event.id),
        csv::escape(event.event_type.as_str()),
        csv::escape(&event.user_id),
        csv::escape(event.admin_user_id.as_deref().unwrap_or_default()),
        csv::escape(event.seller_user_id.as_deref().unwrap_or_default()),
        csv::escape(&event.ip_address),
        csv::quote(&event.user_agent),
        event.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        csv::quote(&details),
    ])
}
