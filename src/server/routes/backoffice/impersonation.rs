//! Impersonation endpoints

use crate::auth::permissions::{Action, Resource, get_permissions};
use crate::server::middleware::{client_info, extract_impersonation_token, get_identity};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::BackofficeError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    pub seller_user_id: String,
    #[serde(default)]
    pub seller_email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndRequest {
    /// Falls back to the `x-impersonation-token` header
    pub session_token: Option<String>,
}

pub async fn list_sessions(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let sessions = state.access().impersonation().active_sessions();
    let count = sessions.len();

    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(
        sessions,
        json!({ "count": count }),
    )))
}

pub async fn start(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<StartRequest>,
) -> ActixResult<HttpResponse> {
    let identity = get_identity(&req)?;
    let client = client_info(&req);

    let started = state
        .access()
        .impersonation()
        .start_impersonation(
            &identity.id,
            &body.seller_user_id,
            &body.seller_email,
            &client,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(started)))
}

pub async fn end(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: Option<web::Json<EndRequest>>,
) -> ActixResult<HttpResponse> {
    let token = body
        .and_then(|b| b.into_inner().session_token)
        .or_else(|| extract_impersonation_token(req.headers()))
        .ok_or_else(|| BackofficeError::bad_request("Impersonation token is required"))?;
    let identity = get_identity(&req)?;
    let client = client_info(&req);

    let impersonation = state.access().impersonation();
    // settings writers may end any session, everyone else only their own
    let may_end_any =
        get_permissions(identity.role).allows(Resource::Configuracoes, Some(Action::Write));
    let ended = if may_end_any {
        impersonation.end_impersonation(&token, &client).await?
    } else {
        impersonation
            .end_own_impersonation(&token, &identity.id, &client)
            .await?
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(ended)))
}

pub async fn force_end(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let client = client_info(&req);
    let admin_user_id = path.into_inner();

    let ended = state
        .access()
        .impersonation()
        .force_end_admin_sessions(&admin_user_id, &client);

    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({
        "adminUserId": admin_user_id,
        "ended": ended,
    }))))
}
