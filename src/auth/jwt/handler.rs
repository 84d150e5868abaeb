//! Core JWT handler implementation

use super::types::{
    ACCESS_AUDIENCE, Claims, IMPERSONATION_AUDIENCE, ImpersonationClaims, JwtHandler, TokenType,
};
use crate::auth::identity::{AuthenticatedIdentity, IdentityVerifier};
use crate::config::AuthConfig;
use crate::utils::error::{BackofficeError, Result};
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::{debug, warn};
use uuid::Uuid;

impl JwtHandler {
    /// Create a new JWT handler
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(BackofficeError::config("JWT secret must not be empty"));
        }
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: config.issuer.clone(),
        })
    }

    /// Create a backoffice access token for an identity
    pub async fn create_access_token(&self, identity: &AuthenticatedIdentity) -> Result<String> {
        let now = Self::now_secs()?;

        let claims = Claims {
            sub: identity.id.clone(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            aud: ACCESS_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            email: identity.email.clone(),
            role: identity.role,
            user_type: identity.user_type,
            company_id: identity.company_id.clone(),
            is_admin: identity.is_admin,
            is_seller: identity.is_seller,
            token_type: TokenType::Access,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Created access token for user: {}", identity.id);
        Ok(token)
    }

    /// Verify a backoffice access token and return the identity it carries
    pub async fn verify_access_token(&self, token: &str) -> Result<AuthenticatedIdentity> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[ACCESS_AUDIENCE]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("JWT verification failed: {}", e);
            BackofficeError::Jwt(e)
        })?;

        let claims = token_data.claims;
        if claims.token_type != TokenType::Access {
            return Err(BackofficeError::auth("Invalid token type for access"));
        }

        debug!("Token verified for user: {}", claims.sub);
        Ok(AuthenticatedIdentity {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
            user_type: claims.user_type,
            company_id: claims.company_id,
            is_admin: claims.is_admin,
            is_seller: claims.is_seller,
        })
    }

    /// Create an impersonation token valid for `ttl_secs`.
    ///
    /// Returns the token and its expiry as a unix timestamp.
    pub async fn create_impersonation_token(
        &self,
        admin_user_id: &str,
        seller_user_id: &str,
        session_id: &str,
        ttl_secs: u64,
    ) -> Result<(String, u64)> {
        let now = Self::now_secs()?;
        let exp = now + ttl_secs;

        let claims = ImpersonationClaims {
            sub: admin_user_id.to_string(),
            iat: now,
            exp,
            iss: self.issuer.clone(),
            aud: IMPERSONATION_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            admin_user_id: admin_user_id.to_string(),
            seller_user_id: seller_user_id.to_string(),
            session_id: session_id.to_string(),
            token_type: TokenType::Impersonation,
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!(
            "Created impersonation token for admin {} as seller {}",
            admin_user_id, seller_user_id
        );
        Ok((token, exp))
    }

    /// Verify an impersonation token
    pub async fn verify_impersonation_token(&self, token: &str) -> Result<ImpersonationClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[IMPERSONATION_AUDIENCE]);
        validation.leeway = 0;

        let token_data = decode::<ImpersonationClaims>(token, &self.decoding_key, &validation)?;

        if token_data.claims.token_type != TokenType::Impersonation {
            return Err(BackofficeError::auth("Invalid token type for impersonation"));
        }

        Ok(token_data.claims)
    }
}

#[async_trait]
impl IdentityVerifier for JwtHandler {
    async fn verify(&self, token: &str) -> Result<AuthenticatedIdentity> {
        self.verify_access_token(token).await
    }
}
