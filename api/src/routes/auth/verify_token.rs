use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};

use ma_core::errors::TokenError;
use ma_core::services::token::extract_bearer_token;
use ma_core::services::{NotificationChannel, OtpStore};

use crate::app::AuthState;
use crate::dto::auth::VerifyTokenResponse;

/// Handler for POST /api/auth/verify-token
///
/// Answers 200 `{valid: true, email, expiresAt}` for a live token and
/// 401 `{valid: false, message}` otherwise.
pub async fn verify_token<S, N>(
    req: HttpRequest,
    state: web::Data<AuthState<S, N>>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    N: NotificationChannel + 'static,
{
    let result = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(TokenError::MissingToken)
        .and_then(|value| value.to_str().map_err(|_| TokenError::InvalidTokenFormat))
        .and_then(|value| extract_bearer_token(value).ok_or(TokenError::InvalidTokenFormat))
        .and_then(|token| state.token_service.verify(token));

    match result {
        Ok(session) => HttpResponse::Ok().json(VerifyTokenResponse::valid(
            session.email,
            session.expires_at.timestamp(),
        )),
        Err(error) => {
            log::debug!("Token check failed: {}", error);
            HttpResponse::Unauthorized().json(VerifyTokenResponse::invalid(error.to_string()))
        }
    }
}
