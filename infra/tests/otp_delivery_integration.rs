//! OTP service wired to the in-memory store and the mock email channel

use std::sync::Arc;
use std::time::Duration;

use ma_core::domain::value_objects::AdminAllowList;
use ma_core::errors::{AuthError, DomainError};
use ma_core::services::{OtpService, OtpServiceConfig};
use ma_infra::{InMemoryOtpStore, MockEmailService};

const ADMIN: &str = "admin@x.com";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn service(
    channel: MockEmailService,
) -> (OtpService<InMemoryOtpStore, MockEmailService>, Arc<InMemoryOtpStore>) {
    service_with_config(channel, OtpServiceConfig::default())
}

fn service_with_config(
    channel: MockEmailService,
    config: OtpServiceConfig,
) -> (OtpService<InMemoryOtpStore, MockEmailService>, Arc<InMemoryOtpStore>) {
    init_tracing();
    let store = Arc::new(InMemoryOtpStore::new());
    let service = OtpService::new(
        Arc::clone(&store),
        Arc::new(channel),
        AdminAllowList::new([ADMIN]),
        config,
    );
    (service, store)
}

// Codes are sent from a background task; give it a moment to finish
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_delivered_code_is_stored() {
    let channel = MockEmailService::with_options(false, false);
    let (service, store) = service(channel.clone());

    let dispatch = service.request_code(ADMIN).await.unwrap();
    settle().await;

    assert_eq!(dispatch.masked_email, "a***n@x.com");
    assert_eq!(store.len().await, 1);
    assert_eq!(channel.get_message_count(), 1);
    assert_eq!(service.purge_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_undelivered_code_is_discarded() {
    let (service, store) = service(MockEmailService::with_options(false, true));

    service.request_code(ADMIN).await.unwrap();
    settle().await;

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_undelivered_code_fails_the_request_in_reveal_mode() {
    let config = OtpServiceConfig {
        reveal_unauthorized: true,
        ..Default::default()
    };
    let (service, store) = service_with_config(MockEmailService::with_options(false, true), config);

    let result = service.request_code(ADMIN).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DispatchFailed))
    ));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_outsider_never_reaches_the_channel() {
    let channel = MockEmailService::with_options(false, false);
    let (service, store) = service(channel.clone());

    service.request_code("someone@else.com").await.unwrap();
    settle().await;

    assert!(store.is_empty().await);
    assert_eq!(channel.get_message_count(), 0);
}
