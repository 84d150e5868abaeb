//! HTTP middleware implementations

mod helpers;
mod rbac;


pub use helpers::{
    ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_HEADER, IMPERSONATION_TOKEN_HEADER, client_info,
    extract_access_token, extract_impersonation_token,
};
pub use rbac::{RbacMiddleware, RbacMiddlewareService, get_identity};
