use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUserId;
use crate::auth::token::redact;
use crate::error::AppError;
use crate::state::AppState;

pub const MISSING_TOKEN_MESSAGE: &str = "Missing Authorization token";
pub const INVALID_SESSION_MESSAGE: &str = "Session expired or invalid";

/// Session guard for the scopes it wraps.
///
/// Reads the raw session token from the `Authorization` header (no scheme prefix),
/// resolves it through the `SessionStore`, and stores the bound user id in the
/// request extensions for `AuthenticatedUserId`. Rejections are rendered here as
/// `401` responses so outer middleware still sees a normal response.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
                .filter(|value| !value.is_empty());

            let token = match token {
                Some(token) => token,
                None => {
                    log::warn!("Rejected {} {}: no session token", req.method(), req.path());
                    return Ok(reject(req, AppError::Unauthorized(MISSING_TOKEN_MESSAGE.into())));
                }
            };

            let state = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.clone(),
                None => {
                    return Ok(reject(
                        req,
                        AppError::InternalServerError("Application state is not configured".into()),
                    ))
                }
            };

            match state.sessions.resolve_session(&token).await {
                Ok(Some(user_id)) => {
                    req.extensions_mut().insert(AuthenticatedUserId(user_id));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Ok(None) => {
                    log::warn!(
                        "Rejected {} {}: unknown or expired session {}",
                        req.method(),
                        req.path(),
                        redact(&token)
                    );
                    Ok(reject(req, AppError::Unauthorized(INVALID_SESSION_MESSAGE.into())))
                }
                Err(app_err) => Ok(reject(req, app_err)),
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    req.error_response(err).map_into_right_body()
}
