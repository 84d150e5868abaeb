//! JWT utility functions

use super::types::JwtHandler;
use crate::utils::error::{BackofficeError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

impl JwtHandler {
    /// Extract token from Authorization header
    pub fn extract_token_from_header(header_value: &str) -> Option<String> {
        header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| token.to_string())
    }

    /// Get access token expiration time
    pub fn get_expiration(&self) -> u64 {
        self.expiration
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub(super) fn now_secs() -> Result<u64> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| BackofficeError::internal(format!("System time error: {}", e)))
    }
}
