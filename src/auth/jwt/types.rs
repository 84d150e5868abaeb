//! JWT types and data structures

use crate::auth::permissions::{Role, UserType};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

/// Audience of backoffice access tokens
pub const ACCESS_AUDIENCE: &str = "backoffice";
/// Audience of impersonation tokens
pub const IMPERSONATION_AUDIENCE: &str = "impersonation";

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    pub(super) encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    pub(super) decoding_key: DecodingKey,
    /// JWT algorithm
    pub(super) algorithm: Algorithm,
    /// Access token expiration time in seconds
    pub(super) expiration: u64,
    /// Token issuer
    pub(super) issuer: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Backoffice access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// JWT ID
    pub jti: String,
    pub email: String,
    pub role: Role,
    pub user_type: UserType,
    #[serde(default)]
    pub company_id: Option<String>,
    pub is_admin: bool,
    pub is_seller: bool,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

/// Impersonation token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpersonationClaims {
    /// Subject (the impersonating admin)
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
    pub admin_user_id: String,
    pub seller_user_id: String,
    pub session_id: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

/// Token type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Backoffice access token
    Access,
    /// Admin acting as a seller
    Impersonation,
}
