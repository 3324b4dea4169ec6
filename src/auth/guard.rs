use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use super::strategy::{AuthStrategy, AuthenticatedUser, bearer_token};
use crate::error::ApiError;

/// Route guard that delegates credential checks to an [`AuthStrategy`].
///
/// Wrap a scope with it to require a bearer credential:
///
/// ```rust,ignore
/// web::scope("/uploads").wrap(JwtAuthGuard::new(strategy))
/// ```
///
/// Rejected requests never reach the wrapped service. Accepted ones carry an
/// [`AuthenticatedUser`] in their extensions.
#[derive(Clone)]
pub struct JwtAuthGuard {
    strategy: Arc<dyn AuthStrategy>,
}

impl JwtAuthGuard {
    pub fn new(strategy: Arc<dyn AuthStrategy>) -> Self {
        Self { strategy }
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    strategy: Arc<dyn AuthStrategy>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
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
        let strategy = Arc::clone(&self.strategy);

        Box::pin(async move {
            match authenticate_request(req.request(), strategy.as_ref()) {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn authenticate_request(
    req: &HttpRequest,
    strategy: &dyn AuthStrategy,
) -> Result<AuthenticatedUser, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| {
            tracing::warn!(path = %req.path(), "non-ASCII Authorization header");
            ApiError::Unauthorized("Invalid credentials".to_string())
        })?;

    let token = bearer_token(header)?;

    strategy.authenticate(token).map_err(|err| {
        tracing::warn!(
            strategy = strategy.name(),
            path = %req.path(),
            error = %err,
            "credential rejected"
        );
        ApiError::Unauthorized("Invalid credentials".to_string())
    })
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            strategy: Arc::clone(&self.strategy),
        }))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string())),
        )
    }
}

/// Authenticates an optional `Authorization` header without failing the request.
///
/// Used where only some operations are protected, e.g. GraphQL fields.
pub fn optional_user(req: &HttpRequest, strategy: &dyn AuthStrategy) -> Option<AuthenticatedUser> {
    req.headers().get(AUTHORIZATION)?;
    authenticate_request(req, strategy).ok()
}
