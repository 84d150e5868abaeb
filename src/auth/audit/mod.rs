//! Audit trail
//!
//! Append-only in-memory event log with filtering, CSV export, retention
//! pruning and best-effort forwarding to durable sinks.

mod dispatcher;
mod export;
mod helpers;
mod service;
mod sinks;
mod types;

pub use dispatcher::AuditDispatcher;
pub use service::AuditService;
pub use sinks::{AuditSink, HttpAuditSink, JsonlFileSink};
pub use types::{AuditEvent, AuditEventType, AuditFilter, ClientInfo, NewAuditEvent};
