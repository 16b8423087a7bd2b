//! HTTP middleware for photogram-service.
//!
//! Bearer-token authentication: the Authorization header carries the user's
//! auth token, which must match exactly one user row. The resolved id is
//! stored in request extensions for handlers to extract.
//!
//! The middleware itself is lenient so public endpoints (signup, profile
//! reads, the public feed) can share the route tree: a request without an
//! Authorization header passes through anonymously, and handlers that demand
//! an identity enforce it through the `UserId` extractor (401 when absent).
//! A header that is present but does not resolve to a user is rejected
//! outright.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;
use std::future::{ready, Ready};
use std::rc::Rc;
use uuid::Uuid;

/// Extracted user identifier stored in request extensions after auth.
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Actix middleware that resolves the Authorization token to a user.
pub struct TokenAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for TokenAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct TokenAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            if let Some(header) = auth_header {
                // Clients send either the bare token or a Bearer-prefixed one.
                let token = header.strip_prefix("Bearer ").unwrap_or(&header);
                if token.is_empty() {
                    return Err(ErrorUnauthorized("Missing auth token"));
                }

                let pool = req
                    .app_data::<actix_web::web::Data<PgPool>>()
                    .ok_or_else(|| ErrorUnauthorized("Auth backend unavailable"))?
                    .clone();

                let user = crate::db::user_repo::find_by_auth_token(&pool, token)
                    .await
                    .map_err(|err| {
                        tracing::error!("auth token lookup failed: {}", err);
                        ErrorUnauthorized("Auth backend unavailable")
                    })?
                    .ok_or_else(|| ErrorUnauthorized("Invalid auth token"))?;

                req.extensions_mut().insert(UserId(user.id));
            }

            service.call(req).await
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<UserId>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("User ID missing")),
        )
    }
}
