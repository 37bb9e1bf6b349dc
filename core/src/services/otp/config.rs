//! Configuration for the OTP service

use ma_shared::config::OtpConfig;

use crate::domain::entities::otp_entry::{CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Digits per code
    pub code_length: usize,
    /// Minutes before a code expires
    pub code_expiration_minutes: i64,
    /// Failed submissions allowed per code
    pub max_attempts: u32,
    /// Return `NotAuthorized` for unknown emails instead of a normal success
    pub reveal_unauthorized: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: CODE_LENGTH,
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: MAX_ATTEMPTS,
            reveal_unauthorized: false,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            code_expiration_minutes: config.expiration_minutes,
            max_attempts: config.max_attempts,
            reveal_unauthorized: config.reveal_unauthorized,
        }
    }
}

impl OtpServiceConfig {
    /// Code lifetime in seconds
    pub fn expires_in_seconds(&self) -> i64 {
        self.code_expiration_minutes * 60
    }
}
