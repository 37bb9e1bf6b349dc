//! SMTP email delivery through an authenticated STARTTLS relay

use async_trait::async_trait;
use chrono::Utc;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use ma_core::domain::entities::DEFAULT_EXPIRATION_MINUTES;
use ma_core::services::otp::NotificationChannel;
use ma_shared::config::SmtpConfig;
use ma_shared::utils::email::mask_email;

use super::template::{render_otp_email, render_otp_text, OTP_EMAIL_SUBJECT};
use crate::InfrastructureError;

/// Delay before the second send attempt, doubled for each further one
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Sends login codes through the configured SMTP relay
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    config: SmtpConfig,
    code_ttl_minutes: i64,
}

impl SmtpEmailService {
    /// Build the transport for a configured relay
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let host = config
            .host
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("SMTP_HOST is not set".to_string()))?;

        let address = config
            .sender()
            .ok_or_else(|| {
                InfrastructureError::Config("SMTP_FROM or SMTP_USER must be set".to_string())
            })?
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;
        let sender = Mailbox::new(Some(config.from_name.clone()), address);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| InfrastructureError::Email(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
            config,
            code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
        })
    }

    /// Code lifetime quoted in the email body
    pub fn with_code_ttl_minutes(mut self, minutes: i64) -> Self {
        self.code_ttl_minutes = minutes;
        self
    }

    fn build_message(
        &self,
        to: &str,
        code: &str,
        message_id: &str,
    ) -> Result<Message, InfrastructureError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient: {}", e)))?;
        let minutes = self.code_ttl_minutes;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(OTP_EMAIL_SUBJECT)
            .message_id(Some(message_id.to_string()))
            .multipart(MultiPart::alternative_plain_html(
                render_otp_text(code, minutes),
                render_otp_email(code, minutes, Utc::now()),
            ))
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }

    async fn send_once(&self, message: Message) -> Result<(), InfrastructureError> {
        let timeout = Duration::from_secs(self.config.timeout_seconds);
        match tokio::time::timeout(timeout, self.transport.send(message)).await {
            Ok(Ok(response)) if response.is_positive() => Ok(()),
            Ok(Ok(response)) => Err(InfrastructureError::Email(format!(
                "Relay rejected message with code {}",
                response.code()
            ))),
            Ok(Err(e)) => Err(InfrastructureError::Email(e.to_string())),
            Err(_) => Err(InfrastructureError::Email(format!(
                "Send timed out after {}s",
                self.config.timeout_seconds
            ))),
        }
    }
}

#[async_trait]
impl NotificationChannel for SmtpEmailService {
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String> {
        let masked = mask_email(email);
        let message_id = format!("<{}@multiyo-admin>", Uuid::new_v4());
        let message = self
            .build_message(email, code, &message_id)
            .map_err(|e| e.to_string())?;

        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.send_once(message.clone()).await {
                Ok(()) => {
                    info!(
                        target: "email_service",
                        provider = "smtp",
                        email = %masked,
                        message_id = %message_id,
                        attempt = attempt,
                        "Email sent successfully"
                    );
                    return Ok(message_id);
                }
                Err(e) => {
                    warn!(
                        target: "email_service",
                        provider = "smtp",
                        email = %masked,
                        attempt = attempt,
                        error = %e,
                        "Email send attempt failed"
                    );
                    last_error = Some(e);
                    if attempt < max_attempts {
                        let delay = RETRY_BASE_DELAY_MS * 2u64.pow(attempt - 1);
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                    }
                }
            }
        }

        let error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Email delivery failed".to_string());
        error!(
            target: "email_service",
            provider = "smtp",
            email = %masked,
            error = %error,
            "All email send attempts failed"
        );
        Err(error)
    }
}
