use actix_web::{web, HttpResponse};
use validator::Validate;

use ma_core::services::{NotificationChannel, OtpStore};

use crate::app::AuthState;
use crate::dto::auth::{RequestOtpRequest, RequestOtpResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /api/auth/request-otp
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "message": "OTP sent to a***n@example.com",
///     "email": "a***n@example.com",
///     "expiresIn": 300
/// }
/// ```
///
/// Emails outside the allow-list get the same response unless reveal mode
/// is enabled, in which case they get 403.
pub async fn request_otp<S, N>(
    state: web::Data<AuthState<S, N>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    N: NotificationChannel + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let email = request.email.as_deref().unwrap_or_default();
    match state.otp_service.request_code(email).await {
        Ok(dispatch) => HttpResponse::Ok().json(RequestOtpResponse {
            success: true,
            message: format!("OTP sent to {}", dispatch.masked_email),
            email: dispatch.masked_email,
            expires_in: dispatch.expires_in_seconds,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
