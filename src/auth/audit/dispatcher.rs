//! Background fan-out of audit events to secondary sinks

use super::sinks::AuditSink;
use super::types::AuditEvent;
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Fire-and-forget queue in front of the configured sinks.
///
/// `dispatch` never blocks and never fails the caller: a full queue drops the
/// event for the sinks only (it is already in memory), and sink errors are
/// logged by the delivery task.
#[derive(Clone)]
pub struct AuditDispatcher {
    sender: mpsc::Sender<AuditEvent>,
    sink_names: Vec<String>,
}

impl AuditDispatcher {
    /// Spawn the delivery task. Must be called inside a Tokio runtime.
    ///
    /// The task exits once every dispatcher clone has been dropped and the
    /// queue is drained.
    pub fn spawn(sinks: Vec<Arc<dyn AuditSink>>, capacity: usize) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel::<AuditEvent>(capacity.max(1));
        let sink_names = sinks.iter().map(|s| s.name().to_string()).collect();

        let handle = tokio::spawn(Self::run(receiver, sinks));

        (Self { sender, sink_names }, handle)
    }

    async fn run(mut receiver: mpsc::Receiver<AuditEvent>, sinks: Vec<Arc<dyn AuditSink>>) {
        while let Some(event) = receiver.recv().await {
            let deliveries = sinks.iter().map(|sink| {
                let event = &event;
                async move {
                    if let Err(e) = sink.deliver(event).await {
                        warn!(
                            sink = sink.name(),
                            event_id = %event.id,
                            error = %e,
                            "Audit sink delivery failed"
                        );
                    }
                }
            });
            join_all(deliveries).await;
        }
        debug!("Audit dispatcher stopped");
    }

    /// Queue an event for the sinks
    pub fn dispatch(&self, event: &AuditEvent) {
        match self.sender.try_send(event.clone()) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(event_id = %event.id, "Audit sink queue full, event not forwarded");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(event_id = %event.id, "Audit sink queue closed");
            }
        }
    }

    pub fn sink_names(&self) -> &[String] {
        &self.sink_names
    }
}

impl fmt::Debug for AuditDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditDispatcher")
            .field("sinks", &self.sink_names)
            .field("capacity", &self.sender.max_capacity())
            .finish()
    }
}
