//! Domain-specific error types for the login flow, session tokens and input
//! validation
//!
//! Messages here are the English text shown to API callers. None of them
//! ever carries a one-time code.

use thiserror::Error;

/// Email OTP authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("This email is not registered as an admin")]
    NotAuthorized,

    #[error("Failed to send OTP email. Please try again.")]
    DispatchFailed,

    #[error("No OTP found for this email")]
    CodeNotFound,

    #[error("OTP has expired")]
    CodeExpired,

    #[error("Maximum OTP attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Incorrect OTP")]
    InvalidCode { remaining_attempts: u32 },
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("No token provided")]
    MissingToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("File size exceeds {max_bytes} byte limit")]
    FileTooLarge { max_bytes: usize },

    #[error("Invalid file type. Allowed: {allowed}")]
    UnsupportedImageType { allowed: String },
}

impl ValidationError {
    /// Shorthand for a missing or blank field
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            field: field.into(),
        }
    }
}
