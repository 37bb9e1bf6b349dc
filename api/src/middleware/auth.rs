//! JWT authentication middleware for the banner and collection endpoints.
//!
//! Reads `Authorization: Bearer <token>`, verifies it with the core
//! `TokenService` and stores an [`AuthContext`] in the request extensions.
//! Failing requests are answered with 401 before the handler runs.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use chrono::{DateTime, Utc};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use ma_core::errors::{DomainError, TokenError};
use ma_core::services::token::{extract_bearer_token, TokenService};

use crate::handlers::error::handle_domain_error;

/// Admin identity of an authenticated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
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
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
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

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let outcome = authenticate(&req, &self.token_service);

        Box::pin(async move {
            match outcome {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(error) => {
                    log::warn!("Rejected {} {}: {}", req.method(), req.path(), error);
                    let response = handle_domain_error(&DomainError::Token(error));
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Verify the bearer token of a request
pub fn authenticate(req: &ServiceRequest, tokens: &TokenService) -> Result<AuthContext, TokenError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(TokenError::MissingToken)?
        .to_str()
        .map_err(|_| TokenError::InvalidTokenFormat)?;
    let token = extract_bearer_token(header).ok_or(TokenError::InvalidTokenFormat)?;

    let session = tokens.verify(token)?;
    Ok(AuthContext {
        email: session.email,
        expires_at: session.expires_at,
    })
}

/// Extractor for handlers behind [`JwtAuth`]
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
