use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for POST /api/auth/request-otp
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RequestOtpRequest {
    /// Admin email; missing and blank are both rejected by the service
    #[serde(default)]
    #[validate(length(max = 254, message = "Email address is too long"))]
    pub email: Option<String>,
}

/// Response body for a dispatched code
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpResponse {
    pub success: bool,
    pub message: String,
    /// Masked email, e.g. `a***n@x.com`
    pub email: String,
    /// Code lifetime in seconds
    pub expires_in: i64,
}

/// Request body for POST /api/auth/verify-otp
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 254, message = "Email address is too long"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 16, message = "OTP is too long"))]
    pub otp: Option<String>,
}

/// Response body for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub email: String,
    /// Session lifetime in seconds
    pub expires_in: i64,
}

/// Response body for POST /api/auth/verify-token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTokenResponse {
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Token expiry as a Unix timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VerifyTokenResponse {
    pub fn valid(email: String, expires_at: i64) -> Self {
        Self {
            valid: true,
            email: Some(email),
            expires_at: Some(expires_at),
            message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            email: None,
            expires_at: None,
            message: Some(message.into()),
        }
    }
}
