//! Authenticated caller identity

use super::permissions::{Role, UserType};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identity resolved from a backoffice access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedIdentity {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub is_admin: bool,
    pub is_seller: bool,
}

impl AuthenticatedIdentity {
    /// Merchant identity by role or by user type
    pub fn is_merchant(&self) -> bool {
        self.role.is_merchant_role() || self.user_type == UserType::Seller
    }
}

/// Token verification seam used by the access gate.
///
/// [`JwtHandler`](super::jwt::JwtHandler) is the default implementation;
/// deployments with their own identity provider can substitute theirs.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<AuthenticatedIdentity>;
}
