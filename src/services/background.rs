//! Periodic access-control housekeeping

use crate::auth::AccessControl;
use crate::config::Config;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Interval settings for the housekeeping loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundSchedule {
    pub impersonation_cleanup: Duration,
    /// `None` disables the scheduled conflict scan
    pub conflict_scan: Option<Duration>,
    pub audit_retention: Duration,
}

impl From<&Config> for BackgroundSchedule {
    fn from(config: &Config) -> Self {
        Self {
            impersonation_cleanup: Duration::from_secs(
                config.impersonation().cleanup_interval_secs,
            ),
            conflict_scan: config
                .conflicts()
                .scan_enabled
                .then(|| Duration::from_secs(config.conflicts().scan_interval_secs)),
            audit_retention: Duration::from_secs(config.audit().retention_interval_secs),
        }
    }
}

/// Handles to the running housekeeping loops
#[derive(Debug)]
pub struct BackgroundTasks {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Spawn the impersonation sweep, conflict scan and audit retention loops.
    ///
    /// Each loop waits one full interval before its first run.
    pub fn start(access: &AccessControl, schedule: BackgroundSchedule) -> Self {
        let (shutdown, receiver) = watch::channel(false);
        let mut handles = Vec::new();

        let impersonation = access.impersonation().clone();
        handles.push(spawn_periodic(
            "impersonation-cleanup",
            schedule.impersonation_cleanup,
            receiver.clone(),
            move || {
                let impersonation = impersonation.clone();
                async move {
                    let removed = impersonation.cleanup_expired_sessions();
                    if removed > 0 {
                        info!("Cleaned up {} impersonation sessions", removed);
                    }
                }
            },
        ));

        if let Some(interval) = schedule.conflict_scan {
            let detector = access.conflicts().clone();
            handles.push(spawn_periodic(
                "conflict-scan",
                interval,
                receiver.clone(),
                move || {
                    let detector = detector.clone();
                    async move {
                        if let Err(e) = detector.detect_conflicting_users().await {
                            warn!("Scheduled conflict scan failed: {}", e);
                        }
                    }
                },
            ));
        }

        let audit = access.audit().clone();
        handles.push(spawn_periodic(
            "audit-retention",
            schedule.audit_retention,
            receiver,
            move || {
                let audit = audit.clone();
                async move {
                    let removed = audit.apply_retention();
                    if removed > 0 {
                        info!(
                            "Removed {} audit events older than {} days",
                            removed,
                            audit.retention_days()
                        );
                    }
                }
            },
        ));

        info!("Started {} background tasks", handles.len());
        Self { shutdown, handles }
    }

    pub fn task_count(&self) -> usize {
        self.handles.len()
    }

    /// Signal every loop to stop and wait for them to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!("Background task ended abnormally: {}", e);
            }
        }
        info!("Background tasks stopped");
    }
}

fn spawn_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
    mut tick: F,
) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    debug!(task = name, "Running background task");
                    tick().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!(task = name, "Background task stopped");
    })
}
