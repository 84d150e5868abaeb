//! Conflict detection types

use crate::auth::permissions::{Role, UserType};
use crate::config::ConflictConfig;
use crate::utils::error::BackofficeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source-of-truth user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_seller: bool,
}

impl UserRecord {
    /// Names of the flags that are set
    pub fn flags(&self) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if self.is_admin {
            flags.push("isAdmin");
        }
        if self.is_seller {
            flags.push("isSeller");
        }
        flags
    }
}

/// A user whose role, type and flags disagree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictingUser {
    #[serde(flatten)]
    pub user: UserRecord,
    pub conflicts: Vec<String>,
    pub detected_at: DateTime<Utc>,
}

/// Administrative fix for a conflicting account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictResolution {
    /// Turn the account into a plain backoffice admin
    ForceAdmin,
    /// Turn the account into a plain merchant seller
    ForceSeller,
    /// Leave the record as is and block the account
    Suspend,
}

impl ConflictResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictResolution::ForceAdmin => "FORCE_ADMIN",
            ConflictResolution::ForceSeller => "FORCE_SELLER",
            ConflictResolution::Suspend => "SUSPEND",
        }
    }

    /// The record as it looks once this resolution is applied
    pub fn apply(&self, user: &UserRecord) -> UserRecord {
        match self {
            ConflictResolution::ForceAdmin => UserRecord {
                role: Role::Admin,
                user_type: UserType::Admin,
                company_id: None,
                is_admin: true,
                is_seller: false,
                ..user.clone()
            },
            ConflictResolution::ForceSeller => UserRecord {
                role: Role::Seller,
                user_type: UserType::Seller,
                is_admin: false,
                is_seller: true,
                ..user.clone()
            },
            ConflictResolution::Suspend => user.clone(),
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictResolution {
    type Err = BackofficeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FORCE_ADMIN" => Ok(ConflictResolution::ForceAdmin),
            "FORCE_SELLER" => Ok(ConflictResolution::ForceSeller),
            "SUSPEND" => Ok(ConflictResolution::Suspend),
            other => Err(BackofficeError::validation(format!(
                "Unknown conflict resolution: {}",
                other
            ))),
        }
    }
}

/// Rule toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictRules {
    /// Flag admin roles that carry a company id
    pub flag_admin_with_company: bool,
}

impl Default for ConflictRules {
    fn default() -> Self {
        Self {
            flag_admin_with_company: true,
        }
    }
}

impl From<&ConflictConfig> for ConflictRules {
    fn from(config: &ConflictConfig) -> Self {
        Self {
            flag_admin_with_company: config.flag_admin_with_company,
        }
    }
}
