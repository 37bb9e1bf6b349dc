//! Email Module
//!
//! Delivers one-time login codes by email.
//!
//! - **SMTP**: `lettre` async transport with STARTTLS, per-attempt timeout
//!   and a single retry
//! - **Mock**: logs instead of sending; development and tests only
//! - **Template**: HTML body of the login email

pub mod mock_email;
pub mod smtp;
pub mod template;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use tracing::{info, warn};

use ma_core::services::otp::NotificationChannel;
use ma_shared::config::{Environment, SmtpConfig};

use crate::InfrastructureError;

pub use mock_email::MockEmailService;
pub use smtp::SmtpEmailService;

/// Email channel selected at startup
pub enum EmailChannel {
    Smtp(SmtpEmailService),
    Mock(MockEmailService),
}

impl EmailChannel {
    /// Build the channel for the configured relay
    ///
    /// Without `SMTP_HOST` the mock channel is used in development and test
    /// runs only; anywhere else a missing relay is a configuration error.
    pub fn from_config(
        config: &SmtpConfig,
        environment: Environment,
        code_ttl_minutes: i64,
    ) -> Result<Self, InfrastructureError> {
        if config.is_configured() {
            let service =
                SmtpEmailService::new(config.clone())?.with_code_ttl_minutes(code_ttl_minutes);
            info!(provider = "smtp", "Email delivery via SMTP relay");
            return Ok(EmailChannel::Smtp(service));
        }

        if !environment.allows_mock_delivery() {
            return Err(InfrastructureError::Config(format!(
                "SMTP_HOST must be set in {}",
                environment
            )));
        }

        warn!(
            provider = "mock",
            "SMTP_HOST not set, login codes will be logged instead of emailed"
        );
        Ok(EmailChannel::Mock(MockEmailService::new()))
    }

    pub fn provider_name(&self) -> &'static str {
        match self {
            EmailChannel::Smtp(_) => "smtp",
            EmailChannel::Mock(_) => "mock",
        }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String> {
        match self {
            EmailChannel::Smtp(service) => service.send_code(email, code).await,
            EmailChannel::Mock(service) => service.send_code(email, code).await,
        }
    }
}
