//! Mapping of domain errors to HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use ma_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use ma_shared::errors::{error_codes, ErrorResponse};

/// Status code and body for a domain error
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, body) = error_parts(error);

    if status.is_server_error() {
        log::error!("Request failed: {}", error);
    } else {
        log::warn!("Request rejected ({}): {}", status.as_u16(), error);
    }

    HttpResponse::build(status).json(body)
}

fn error_parts(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::ValidationErr(validation) => validation_parts(validation),
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),
        DomainError::Auth(auth) => auth_parts(auth),
        DomainError::Token(token) => token_parts(token),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, not_found_message(resource)),
        ),
        DomainError::External { message } => (
            StatusCode::BAD_GATEWAY,
            ErrorResponse::new(error_codes::UPSTREAM_ERROR, message.clone()),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
        ),
    }
}

fn validation_parts(error: &ValidationError) -> (StatusCode, ErrorResponse) {
    let code = match error {
        ValidationError::FileTooLarge { .. } => error_codes::FILE_TOO_LARGE,
        ValidationError::UnsupportedImageType { .. } => error_codes::UNSUPPORTED_IMAGE_TYPE,
        _ => error_codes::VALIDATION_ERROR,
    };
    let message = match error {
        ValidationError::RequiredField { field } => format!("{} is required", capitalize(field)),
        other => other.to_string(),
    };
    (StatusCode::BAD_REQUEST, ErrorResponse::new(code, message))
}

fn auth_parts(error: &AuthError) -> (StatusCode, ErrorResponse) {
    let message = error.to_string();
    match error {
        AuthError::NotAuthorized => (
            StatusCode::FORBIDDEN,
            ErrorResponse::new(error_codes::NOT_AUTHORIZED_ADMIN, message),
        ),
        AuthError::DispatchFailed => (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorResponse::new(error_codes::EMAIL_DISPATCH_FAILED, message),
        ),
        AuthError::CodeNotFound => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::OTP_NOT_FOUND, message),
        ),
        AuthError::CodeExpired => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::OTP_EXPIRED, message),
        ),
        AuthError::MaxAttemptsExceeded => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::OTP_ATTEMPTS_EXCEEDED, message),
        ),
        AuthError::InvalidCode { remaining_attempts } => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(
                error_codes::OTP_INVALID,
                format!("{}. {} attempts remaining", message, remaining_attempts),
            )
            .add_detail("remaining_attempts", remaining_attempts),
        ),
    }
}

fn token_parts(error: &TokenError) -> (StatusCode, ErrorResponse) {
    let code = match error {
        TokenError::TokenGenerationFailed => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(error_codes::INTERNAL_ERROR, error.to_string()),
            )
        }
        TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
        TokenError::MissingToken => error_codes::UNAUTHORIZED,
        TokenError::InvalidTokenFormat | TokenError::InvalidSignature => error_codes::TOKEN_INVALID,
    };
    (
        StatusCode::UNAUTHORIZED,
        ErrorResponse::new(code, error.to_string()),
    )
}

/// 400 response for DTO validation failures
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data");
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }
    log::warn!("Request body failed validation: {}", errors);
    HttpResponse::BadRequest().json(response)
}

/// `JsonConfig` error handler answering malformed bodies with a JSON 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        other => format!("Invalid JSON body: {}", other),
    };
    let response =
        HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::BAD_REQUEST, message));
    InternalError::from_response(err, response).into()
}

fn not_found_message(resource: &str) -> String {
    format!("{} not found", capitalize(resource))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
