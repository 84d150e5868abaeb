//! Custom test assertions
//!
//! Domain-specific assertions over the audit trail.

use backoffice_rbac::auth::audit::{AuditEvent, AuditEventType, AuditFilter, AuditService};

/// Assertions over an audit service
pub trait AuditAssertions {
    /// Assert exactly `expected` events of `event_type` exist and return them
    fn assert_event_count(&self, event_type: AuditEventType, expected: usize) -> Vec<AuditEvent>;

    /// Assert the trail is empty
    fn assert_no_events(&self);
}

impl AuditAssertions for AuditService {
    fn assert_event_count(&self, event_type: AuditEventType, expected: usize) -> Vec<AuditEvent> {
        let events = self.get_events(&AuditFilter::by_type(event_type));
        assert_eq!(
            events.len(),
            expected,
            "Expected {} {} events, got {}: {:?}",
            expected,
            event_type,
            events.len(),
            events
        );
        events
    }

    fn assert_no_events(&self) {
        assert!(
            self.is_empty(),
            "Expected no audit events, got {}",
            self.len()
        );
    }
}
