use ma_core::services::otp::NotificationChannel;
use ma_shared::config::{Environment, SmtpConfig};

use crate::email::{EmailChannel, MockEmailService, SmtpEmailService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_counts_messages() {
    let service = MockEmailService::with_options(false, false);

    let first = service.send_code("admin@x.com", "123456").await.unwrap();
    let second = service.send_code("admin@x.com", "654321").await.unwrap();

    assert!(first.starts_with("mock_"));
    assert_ne!(first, second);
    assert_eq!(service.get_message_count(), 2);
}

#[tokio::test]
async fn test_mock_simulated_failure() {
    let service = MockEmailService::with_options(false, true);

    let result = service.send_code("admin@x.com", "123456").await;

    assert!(result.is_err());
    assert_eq!(service.get_message_count(), 0);
}

#[test]
fn test_unconfigured_smtp_uses_mock_in_development() {
    let channel =
        EmailChannel::from_config(&SmtpConfig::default(), Environment::Development, 5).unwrap();
    assert_eq!(channel.provider_name(), "mock");
}

#[test]
fn test_unconfigured_smtp_is_rejected_in_production() {
    let result = EmailChannel::from_config(&SmtpConfig::default(), Environment::Production, 5);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_unconfigured_smtp_is_rejected_in_staging() {
    let result = EmailChannel::from_config(&SmtpConfig::default(), Environment::Staging, 5);
    assert!(matches!(result, Err(InfrastructureError::Config(message)) if message.contains("staging")));
}

#[test]
fn test_unconfigured_smtp_uses_mock_in_test_runs() {
    let channel = EmailChannel::from_config(&SmtpConfig::default(), Environment::Test, 5).unwrap();
    assert_eq!(channel.provider_name(), "mock");
}

#[test]
fn test_smtp_requires_sender_address() {
    let config = SmtpConfig {
        host: Some("smtp.example.com".to_string()),
        ..Default::default()
    };

    let result = SmtpEmailService::new(config);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_configured_smtp_builds_transport() {
    let config = SmtpConfig {
        host: Some("smtp.example.com".to_string()),
        username: Some("mailer@example.com".to_string()),
        password: Some("app-password".to_string()),
        ..Default::default()
    };

    let channel = EmailChannel::from_config(&config, Environment::Production, 5).unwrap();
    assert_eq!(channel.provider_name(), "smtp");
}
