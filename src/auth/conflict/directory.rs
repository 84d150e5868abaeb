//! User directory seam

use super::types::{ConflictResolution, UserRecord};
use crate::utils::error::{BackofficeError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Read/write access to the user store backing conflict detection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user known to the directory
    async fn list_users(&self) -> Result<Vec<UserRecord>>;

    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>>;

    /// Persist a resolved record
    async fn apply_resolution(
        &self,
        user_id: &str,
        resolution: ConflictResolution,
        resolved: &UserRecord,
    ) -> Result<()>;
}

/// In-process user directory
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserRecord>>,
    suspended: RwLock<HashSet<String>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.upsert(user);
        }
        directory
    }

    /// Load a JSON array of user records
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            BackofficeError::config(format!(
                "Failed to read users file {}: {}",
                path.display(),
                e
            ))
        })?;
        let users: Vec<UserRecord> = serde_json::from_str(&content)?;

        info!("Loaded {} users from {}", users.len(), path.display());
        Ok(Self::with_users(users))
    }

    pub fn upsert(&self, user: UserRecord) {
        self.users.write().insert(user.id.clone(), user);
    }

    pub fn is_suspended(&self, user_id: &str) -> bool {
        self.suspended.read().contains(user_id)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self) -> Result<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        Ok(self.users.read().get(user_id).cloned())
    }

    async fn apply_resolution(
        &self,
        user_id: &str,
        resolution: ConflictResolution,
        resolved: &UserRecord,
    ) -> Result<()> {
        let mut users = self.users.write();
        let entry = users
            .get_mut(user_id)
            .ok_or_else(|| BackofficeError::not_found(format!("User {} not found", user_id)))?;
        *entry = resolved.clone();
        drop(users);

        if resolution == ConflictResolution::Suspend {
            self.suspended.write().insert(user_id.to_string());
        }

        debug!("Applied {} to user {}", resolution, user_id);
        Ok(())
    }
}
