//! Backoffice access middleware

use crate::auth::AuthenticatedIdentity;
use crate::auth::guard::{Denial, DenialCode, Requirement};
use crate::auth::permissions::{Action, Resource};
use crate::server::middleware::helpers::{client_info, extract_access_token};
use crate::server::state::AppState;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::error;

/// Gate for backoffice routes.
///
/// Verifies the access token once per request and stores the resulting
/// [`AuthenticatedIdentity`] in the request extensions. Nested instances
/// reuse that identity and only check their own requirement.
#[derive(Debug, Clone, Copy)]
pub struct RbacMiddleware {
    requirement: Option<Requirement>,
}

impl RbacMiddleware {
    /// Coarse backoffice access only
    pub fn backoffice() -> Self {
        Self { requirement: None }
    }

    /// Backoffice access plus `resource.action`
    pub fn require(resource: Resource, action: Action) -> Self {
        Self {
            requirement: Some(Requirement::new(resource, action)),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RbacMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RbacMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RbacMiddlewareService {
            service: Rc::new(service),
            requirement: self.requirement,
        }))
    }
}

/// Service implementation for the RBAC middleware
pub struct RbacMiddlewareService<S> {
    service: Rc<S>,
    requirement: Option<Requirement>,
}

impl<S, B> Service<ServiceRequest> for RbacMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let requirement = self.requirement;

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                error!("RBAC middleware mounted without application state");
                let denial = Denial::new(DenialCode::AuthError, "Access control unavailable");
                return Ok(req.into_response(denial.to_response()).map_into_right_body());
            };

            let client = client_info(req.request());
            let guard = state.access.guard();
            let existing = req.extensions().get::<AuthenticatedIdentity>().cloned();

            let decision = match existing {
                Some(identity) => guard
                    .authorize_identity(&identity, requirement, &client)
                    .map(|_| identity),
                None => {
                    let token = extract_access_token(req.headers());
                    guard.authorize(token.as_deref(), requirement, &client).await
                }
            };

            match decision {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(denial) => Ok(req.into_response(denial.to_response()).map_into_right_body()),
            }
        })
    }
}

/// Identity stored by [`RbacMiddleware`]
pub fn get_identity(req: &HttpRequest) -> Result<AuthenticatedIdentity, actix_web::Error> {
    req.extensions()
        .get::<AuthenticatedIdentity>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Missing authenticated identity"))
}
