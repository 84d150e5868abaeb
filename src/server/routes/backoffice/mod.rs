//! Backoffice API
//!
//! Everything under `/api/backoffice` requires backoffice access; each
//! resource adds its own permission on top.

mod audit;
mod conflicts;
mod impersonation;

use crate::auth::permissions::{Action, Resource};
use crate::server::middleware::{RbacMiddleware, get_identity};
use crate::server::routes::ApiResponse;
use crate::server::routes::auth::IdentityView;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

/// Configure backoffice routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/backoffice")
            .wrap(RbacMiddleware::backoffice())
            .route("/me", web::get().to(me))
            .service(
                web::resource("/audit/events")
                    .wrap(RbacMiddleware::require(Resource::Auditoria, Action::Read))
                    .route(web::get().to(audit::list_events)),
            )
            .service(
                web::resource("/audit/export")
                    .wrap(RbacMiddleware::require(Resource::Auditoria, Action::Export))
                    .route(web::get().to(audit::export_events)),
            )
            .service(
                web::resource("/audit/cleanup")
                    .wrap(RbacMiddleware::require(Resource::Configuracoes, Action::Critical))
                    .route(web::post().to(audit::cleanup_events)),
            )
            .service(
                web::resource("/conflicts")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Read))
                    .route(web::get().to(conflicts::list_conflicts)),
            )
            .service(
                web::resource("/conflicts/report")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Read))
                    .route(web::get().to(conflicts::conflict_report)),
            )
            .service(
                web::resource("/conflicts/{user_id}/resolve")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Write))
                    .route(web::post().to(conflicts::resolve_conflict)),
            )
            .service(
                web::resource("/impersonation/sessions")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Impersonate))
                    .route(web::get().to(impersonation::list_sessions)),
            )
            .service(
                web::resource("/impersonation/start")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Impersonate))
                    .route(web::post().to(impersonation::start)),
            )
            .service(
                web::resource("/impersonation/end")
                    .wrap(RbacMiddleware::require(Resource::Usuarios, Action::Impersonate))
                    .route(web::post().to(impersonation::end)),
            )
            .service(
                web::resource("/impersonation/force-end/{admin_user_id}")
                    .wrap(RbacMiddleware::require(Resource::Configuracoes, Action::Write))
                    .route(web::post().to(impersonation::force_end)),
            ),
    );
}

/// Caller identity and permissions
async fn me(req: HttpRequest) -> ActixResult<HttpResponse> {
    let identity = get_identity(&req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(IdentityView::from(identity))))
}
