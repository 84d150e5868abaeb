//! Audit trail endpoints

use crate::auth::audit::AuditFilter;
use crate::server::middleware::get_identity;
use crate::server::routes::{ApiResponse, csv_response};
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

/// Cleanup request body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupRequest {
    /// Defaults to the configured retention
    pub days_to_keep: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResult {
    pub removed: usize,
    pub days_to_keep: u32,
}

pub async fn list_events(
    state: web::Data<AppState>,
    query: web::Query<AuditFilter>,
) -> ActixResult<HttpResponse> {
    let events = state.access().audit().get_events(&query);
    let count = events.len();

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(
        events,
        json!({ "count": count }),
    )))
}

pub async fn export_events(
    state: web::Data<AppState>,
    query: web::Query<AuditFilter>,
) -> ActixResult<HttpResponse> {
    let csv = state.access().audit().export_audit_logs(Some(&*query));
    Ok(csv_response("audit-logs.csv", csv))
}

pub async fn cleanup_events(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<CleanupRequest>>,
) -> ActixResult<HttpResponse> {
    let identity = get_identity(&req)?;
    let audit = state.access().audit();
    let days_to_keep = body
        .and_then(|b| b.into_inner().days_to_keep)
        .unwrap_or_else(|| audit.retention_days());

    let removed = audit.cleanup_old_logs(days_to_keep);
    info!(
        user_id = %identity.id,
        removed = removed,
        days_to_keep = days_to_keep,
        "Audit log cleanup requested"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(CleanupResult {
        removed,
        days_to_keep,
    })))
}
