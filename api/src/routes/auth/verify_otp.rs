use actix_web::{web, HttpResponse};
use validator::Validate;

use ma_core::errors::DomainError;
use ma_core::services::{NotificationChannel, OtpStore};

use crate::app::AuthState;
use crate::dto::auth::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/auth/verify-otp
///
/// Consumes the code and returns a 24 hour session token.
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com", "otp": "123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "Login successful",
///     "token": "eyJ...",
///     "email": "admin@example.com",
///     "expiresIn": 86400
/// }
/// ```
///
/// ## Errors
/// - 400: email or otp missing
/// - 401: no code, expired code, wrong code or attempts exhausted
pub async fn verify_otp<S, N>(
    state: web::Data<AuthState<S, N>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    N: NotificationChannel + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.email.as_deref().unwrap_or_default();
    let otp = request.otp.as_deref().unwrap_or_default();

    let identity = match state.otp_service.verify_code(email, otp).await {
        Ok(identity) => identity,
        Err(error) => return handle_domain_error(&error),
    };

    match state.token_service.issue(&identity.email) {
        Ok(session) => {
            log::info!("Admin session issued");
            HttpResponse::Ok().json(VerifyOtpResponse {
                success: true,
                message: "Login successful".to_string(),
                expires_in: session.expires_in(),
                token: session.token,
                email: session.email,
            })
        }
        Err(error) => handle_domain_error(&DomainError::Token(error)),
    }
}
