//! Conflict detector

use super::directory::UserDirectory;
use super::rules::{conflict_reasons, identity_conflicts};
use super::types::{ConflictResolution, ConflictRules, ConflictingUser, UserRecord};
use crate::auth::audit::{AuditService, ClientInfo};
use crate::auth::identity::AuthenticatedIdentity;
use crate::utils::csv;
use crate::utils::error::{BackofficeError, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

pub(super) const REPORT_HEADER: &str = "user_id,email,role,user_type,flags,company_id,conflicts";
pub(super) const EMPTY_REPORT_LINE: &str = "# No conflicting users found";

/// Scans the user directory for inconsistent role assignments
pub struct ConflictDetector {
    directory: Arc<dyn UserDirectory>,
    audit: Arc<AuditService>,
    rules: ConflictRules,
    last_scan: RwLock<Option<(DateTime<Utc>, Vec<ConflictingUser>)>>,
}

impl std::fmt::Debug for ConflictDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictDetector")
            .field("rules", &self.rules)
            .field("last_scan_at", &self.last_scan_at())
            .finish()
    }
}

impl ConflictDetector {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        audit: Arc<AuditService>,
        rules: ConflictRules,
    ) -> Self {
        Self {
            directory,
            audit,
            rules,
            last_scan: RwLock::new(None),
        }
    }

    pub fn rules(&self) -> &ConflictRules {
        &self.rules
    }

    /// Evaluate every user and record a `ROLE_CONFLICT` event per hit
    pub async fn detect_conflicting_users(&self) -> Result<Vec<ConflictingUser>> {
        let users = self.directory.list_users().await?;
        let detected_at = Utc::now();
        let client = ClientInfo::new("system", "conflict-detector");

        let conflicting: Vec<ConflictingUser> = users
            .into_iter()
            .filter_map(|user| {
                let conflicts = conflict_reasons(&user, &self.rules);
                if conflicts.is_empty() {
                    return None;
                }
                self.audit.log_role_conflict(
                    &user.id,
                    None,
                    None,
                    user.role.as_str(),
                    &conflicts,
                    &client,
                );
                Some(ConflictingUser {
                    user,
                    conflicts,
                    detected_at,
                })
            })
            .collect();

        if conflicting.is_empty() {
            info!("Conflict scan found no conflicting users");
        } else {
            warn!(
                count = conflicting.len(),
                "Conflict scan found users with conflicting roles"
            );
        }

        *self.last_scan.write() = Some((detected_at, conflicting.clone()));
        Ok(conflicting)
    }

    /// Run a scan and render it as CSV
    pub async fn generate_conflict_report(&self) -> Result<String> {
        let conflicting = self.detect_conflicting_users().await?;
        Ok(render_report(&conflicting))
    }

    /// Apply an administrative fix to one user
    pub async fn resolve_user_conflict(
        &self,
        user_id: &str,
        resolution: ConflictResolution,
        resolved_by: &str,
    ) -> Result<UserRecord> {
        let user = self
            .directory
            .find_user(user_id)
            .await?
            .ok_or_else(|| BackofficeError::not_found(format!("User {} not found", user_id)))?;

        // a seller without a company would be flagged again on the next scan
        if resolution == ConflictResolution::ForceSeller
            && user.company_id.as_deref().is_none_or(str::is_empty)
        {
            return Err(BackofficeError::bad_request(format!(
                "User {} has no companyId and cannot be forced to SELLER",
                user_id
            )));
        }

        let previous_conflicts = conflict_reasons(&user, &self.rules);
        let resolved = resolution.apply(&user);

        self.directory
            .apply_resolution(user_id, resolution, &resolved)
            .await?;

        self.audit.log_conflict_resolution(
            user_id,
            resolution.as_str(),
            resolved_by,
            &previous_conflicts,
        );

        if let Some((_, cached)) = self.last_scan.write().as_mut() {
            cached.retain(|c| c.user.id != user_id);
        }

        info!(
            user_id = user_id,
            resolution = %resolution,
            resolved_by = resolved_by,
            "Role conflict resolved"
        );
        Ok(resolved)
    }

    /// Conflicts carried by a token identity
    pub fn check_identity(&self, identity: &AuthenticatedIdentity) -> Vec<String> {
        identity_conflicts(identity, &self.rules)
    }

    /// Result of the most recent scan
    pub fn last_scan(&self) -> Option<Vec<ConflictingUser>> {
        self.last_scan.read().as_ref().map(|(_, users)| users.clone())
    }

    pub fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        self.last_scan.read().as_ref().map(|(at, _)| *at)
    }
}

pub(super) fn render_report(conflicting: &[ConflictingUser]) -> String {
    let mut lines = vec![REPORT_HEADER.to_string()];

    if conflicting.is_empty() {
        lines.push(EMPTY_REPORT_LINE.to_string());
    }

    for entry in conflicting {
        let user = &entry.user;
        let flags = user.flags().join(" | ");
        let conflicts = entry.conflicts.join(" | ");
        lines.push(csv::row([
            csv::escape(&user.id),
            csv::escape(&user.email),
            user.role.as_str().to_string(),
            user.user_type.as_str().to_string(),
            csv::escape(&flags),
            csv::escape(user.company_id.as_deref().unwrap_or("")),
            csv::quote(&conflicts),
        ]));
    }

    lines.join("\n")
}
