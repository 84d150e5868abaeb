//! Unscoped authentication endpoints

use crate::auth::permissions::{PermissionSet, get_permissions};
use crate::auth::{AuthenticatedIdentity, impersonation::ImpersonationSession};
use crate::server::middleware::{client_info, extract_access_token, extract_impersonation_token};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use tracing::info;

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/api/auth/backoffice-login",
        web::post().to(backoffice_login),
    )
    .route(
        "/api/impersonation/session",
        web::get().to(impersonation_session),
    );
}

/// Identity plus the permissions its role grants
#[derive(Debug, Clone, Serialize)]
pub struct IdentityView {
    pub user: AuthenticatedIdentity,
    pub permissions: PermissionSet,
}

impl From<AuthenticatedIdentity> for IdentityView {
    fn from(user: AuthenticatedIdentity) -> Self {
        let permissions = *get_permissions(user.role);
        Self { user, permissions }
    }
}

/// Impersonation session lookup result
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ImpersonationSession>,
}

/// Backoffice sign-in gate.
///
/// The caller has already authenticated elsewhere; this only decides whether
/// that identity may enter the backoffice.
async fn backoffice_login(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let token = extract_access_token(req.headers());
    let client = client_info(&req);

    match state
        .access()
        .guard()
        .check_backoffice_login(token.as_deref(), &client)
        .await
    {
        Ok(identity) => {
            info!(user_id = %identity.id, "Backoffice login accepted");
            Ok(HttpResponse::Ok().json(ApiResponse::success(IdentityView::from(identity))))
        }
        Err(denial) => Ok(denial.to_response()),
    }
}

/// Current impersonation session for the merchant dashboard
async fn impersonation_session(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> ActixResult<HttpResponse> {
    let session = match extract_impersonation_token(req.headers()) {
        Some(token) => {
            state
                .access()
                .impersonation()
                .validate_impersonation_token(&token)
                .await
        }
        None => None,
    };

    Ok(HttpResponse::Ok().json(SessionStatus {
        active: session.is_some(),
        session,
    }))
}
