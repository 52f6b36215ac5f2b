//! Permissive cross-origin handling.
//!
//! Every response carries the same three CORS headers whether or not the request
//! had an `Origin`, and any `OPTIONS` request is answered with an empty `200`
//! before routing or session checks run.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header, Method},
    middleware::DefaultHeaders,
    Error, HttpResponse,
};
use futures::future::{ready, Either, LocalBoxFuture, Ready};

pub const ALLOWED_ORIGIN: &str = "*";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization";
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE";

/// Middleware adding the CORS headers to every response.
pub fn headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS))
}

/// Answers `OPTIONS` on any path with an empty `200`.
pub struct Preflight;

impl<S, B> Transform<S, ServiceRequest> for Preflight
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = PreflightService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PreflightService { service }))
    }
}

pub struct PreflightService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PreflightService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Either<
        Ready<Result<Self::Response, Self::Error>>,
        LocalBoxFuture<'static, Result<Self::Response, Self::Error>>,
    >;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() == Method::OPTIONS {
            let res = req
                .into_response(HttpResponse::Ok().finish())
                .map_into_right_body();
            return Either::Left(ready(Ok(res)));
        }

        let fut = self.service.call(req);
        Either::Right(Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        }))
    }
}
