//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: DateTime<Utc>,
    pub version: Cow<'static, str>,
    pub git_hash: &'static str,
    pub audit_events: usize,
    pub active_impersonations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_conflict_scan: Option<DateTime<Utc>>,
}

/// Basic health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let access = state.access();
    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        git_hash: env!("BACKOFFICE_GIT_HASH"),
        audit_events: access.audit().len(),
        active_impersonations: access.impersonation().active_sessions().len(),
        last_conflict_scan: access.conflicts().last_scan_at(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}
