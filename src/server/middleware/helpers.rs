//! Helper functions for middleware

use crate::auth::audit::ClientInfo;
use crate::auth::jwt::JwtHandler;
use actix_web::HttpRequest;
use actix_web::http::header::{self, HeaderMap};

/// Header carrying the access token when no Authorization header is sent
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Header carrying an impersonation token
pub const IMPERSONATION_TOKEN_HEADER: &str = "x-impersonation-token";

/// Extract the backoffice access token.
///
/// Looks at `Authorization: Bearer`, then `x-access-token`, then the
/// `access_token` cookie.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = JwtHandler::extract_token_from_header(auth_str) {
                return Some(token);
            }
        }
    }

    if let Some(token) = header_value(headers, ACCESS_TOKEN_HEADER) {
        return Some(token);
    }

    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(value) = cookie
                    .strip_prefix(ACCESS_TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    if !value.is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    None
}

/// Extract an impersonation token
pub fn extract_impersonation_token(headers: &HeaderMap) -> Option<String> {
    header_value(headers, IMPERSONATION_TOKEN_HEADER)
}

/// Client address and user agent for audit records
pub fn client_info(req: &HttpRequest) -> ClientInfo {
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown");

    ClientInfo::new(ip, user_agent)
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
