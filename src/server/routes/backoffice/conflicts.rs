//! Role conflict endpoints

use crate::auth::conflict::ConflictResolution;
use crate::server::middleware::get_identity;
use crate::server::routes::{ApiResponse, csv_response};
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Deserialize)]
pub struct ResolveRequest {
    pub resolution: ConflictResolution,
}

pub async fn list_conflicts(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let conflicting = state.access().conflicts().detect_conflicting_users().await?;
    let count = conflicting.len();

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(
        conflicting,
        json!({ "count": count }),
    )))
}

pub async fn conflict_report(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let report = state.access().conflicts().generate_conflict_report().await?;
    Ok(csv_response("role-conflicts.csv", report))
}

pub async fn resolve_conflict(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ResolveRequest>,
) -> ActixResult<HttpResponse> {
    let identity = get_identity(&req)?;
    let user_id = path.into_inner();

    let resolved = state
        .access()
        .conflicts()
        .resolve_user_conflict(&user_id, body.resolution, &identity.id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(resolved)))
}
