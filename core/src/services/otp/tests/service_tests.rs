//! Unit tests for the OTP service

use chrono::{Duration, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::time::Instant;

use crate::domain::entities::otp_entry::{OtpEntry, CODE_LENGTH};
use crate::domain::value_objects::AdminAllowList;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::{eventually, MockNotificationChannel, MockOtpStore};

const ADMIN: &str = "admin@x.com";

fn create_service(
    config: OtpServiceConfig,
    channel_fails: bool,
) -> (
    OtpService<MockOtpStore, MockNotificationChannel>,
    Arc<MockOtpStore>,
    Arc<MockNotificationChannel>,
) {
    let store = Arc::new(MockOtpStore::new(false));
    let channel = Arc::new(MockNotificationChannel::new(channel_fails));
    let allow_list = AdminAllowList::new([ADMIN, "ops@multiyo.com"]);
    let service = OtpService::new(store.clone(), channel.clone(), allow_list, config);
    (service, store, channel)
}

fn wrong_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_string()
    } else {
        "000000".to_string()
    }
}

#[tokio::test]
async fn test_request_code_success() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);

    let dispatch = service.request_code("  Admin@X.com ").await.unwrap();
    assert_eq!(dispatch.masked_email, "a***n@x.com");
    assert_eq!(dispatch.expires_in_seconds, 300);

    let entry = store.entry(ADMIN).expect("entry stored under normalized email");
    assert_eq!(entry.code.len(), CODE_LENGTH);
    assert_eq!(entry.attempts, 0);
    assert_eq!(entry.expires_at - entry.created_at, Duration::minutes(5));
    assert_eq!(channel.wait_for_code(ADMIN).await, Some(entry.code));
}

#[tokio::test]
async fn test_request_code_validates_input() {
    let (service, _, _) = create_service(OtpServiceConfig::default(), false);

    let result = service.request_code("   ").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));

    let result = service.request_code("not-an-email").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));
}

#[tokio::test]
async fn test_unknown_email_gets_uniform_response_and_no_entry() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);

    let dispatch = service.request_code("intruder@x.com").await.unwrap();
    assert_eq!(dispatch.masked_email, "i******r@x.com");
    assert_eq!(dispatch.expires_in_seconds, 300);

    assert!(store.entry("intruder@x.com").is_none());
    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn test_unknown_email_rejected_in_reveal_mode() {
    let config = OtpServiceConfig {
        reveal_unauthorized: true,
        ..Default::default()
    };
    let (service, store, channel) = create_service(config, false);

    let result = service.request_code("intruder@x.com").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::NotAuthorized))));
    assert!(store.entry("intruder@x.com").is_none());
    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn test_background_dispatch_failure_discards_entry() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), true);

    // The caller sees the regular success shape
    let dispatch = service.request_code(ADMIN).await.unwrap();
    assert_eq!(dispatch.masked_email, "a***n@x.com");

    assert!(eventually(|| store.entry(ADMIN).is_none()).await);
}

#[tokio::test]
async fn test_dispatch_failure_surfaces_in_reveal_mode() {
    let config = OtpServiceConfig {
        reveal_unauthorized: true,
        ..Default::default()
    };
    let (service, store, _) = create_service(config, true);

    let result = service.request_code(ADMIN).await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::DispatchFailed))));
    assert!(store.entry(ADMIN).is_none());
}

#[tokio::test]
async fn test_admin_and_unknown_email_answer_without_waiting_for_delivery() {
    let store = Arc::new(MockOtpStore::new(false));
    let channel =
        Arc::new(MockNotificationChannel::new(false).with_delay(StdDuration::from_millis(500)));
    let service = OtpService::new(
        store,
        channel.clone(),
        AdminAllowList::new([ADMIN]),
        OtpServiceConfig::default(),
    );

    let started = Instant::now();
    let admin = service.request_code(ADMIN).await.unwrap();
    let admin_elapsed = started.elapsed();

    let started = Instant::now();
    let unknown = service.request_code("intruder@x.com").await.unwrap();
    let unknown_elapsed = started.elapsed();

    assert!(admin_elapsed < StdDuration::from_millis(250), "admin took {:?}", admin_elapsed);
    assert!(unknown_elapsed < StdDuration::from_millis(250));
    assert_eq!(admin.expires_in_seconds, unknown.expires_in_seconds);

    // The code still arrives once the slow relay finishes
    assert_eq!(channel.sent_count(), 0);
    assert!(channel.wait_for_code(ADMIN).await.is_some());
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let store = Arc::new(MockOtpStore::new(true));
    let channel = Arc::new(MockNotificationChannel::new(false));
    let service = OtpService::new(
        store,
        channel.clone(),
        AdminAllowList::new([ADMIN]),
        OtpServiceConfig::default(),
    );

    let result = service.request_code(ADMIN).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(channel.sent_count(), 0);
}

#[tokio::test]
async fn test_verify_code_success_consumes_entry() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);
    service.request_code(ADMIN).await.unwrap();
    let code = channel.wait_for_code(ADMIN).await.unwrap();

    let identity = service.verify_code("ADMIN@x.com", &format!(" {} ", code)).await.unwrap();
    assert_eq!(identity.email, ADMIN);
    assert!(store.entry(ADMIN).is_none());

    // Replay fails
    let replay = service.verify_code(ADMIN, &code).await;
    assert!(matches!(replay, Err(DomainError::Auth(AuthError::CodeNotFound))));
}

#[tokio::test]
async fn test_verify_without_request_is_not_found() {
    let (service, _, _) = create_service(OtpServiceConfig::default(), false);

    let result = service.verify_code(ADMIN, "123456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::CodeNotFound))));
}

#[tokio::test]
async fn test_verify_requires_code() {
    let (service, _, _) = create_service(OtpServiceConfig::default(), false);

    let result = service.verify_code(ADMIN, "  ").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { ref field })) if field == "otp"
    ));
}

#[tokio::test]
async fn test_wrong_code_counts_down_remaining_attempts() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);
    service.request_code(ADMIN).await.unwrap();
    let wrong = wrong_code(&channel.wait_for_code(ADMIN).await.unwrap());

    for expected_remaining in [2, 1, 0] {
        let result = service.verify_code(ADMIN, &wrong).await;
        match result {
            Err(DomainError::Auth(AuthError::InvalidCode { remaining_attempts })) => {
                assert_eq!(remaining_attempts, expected_remaining)
            }
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    // Entry survives the third mismatch
    assert_eq!(store.entry(ADMIN).unwrap().attempts, 3);
}

#[tokio::test]
async fn test_correct_code_after_three_failures_is_rejected() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);
    service.request_code(ADMIN).await.unwrap();
    let code = channel.wait_for_code(ADMIN).await.unwrap();
    let wrong = wrong_code(&code);

    for _ in 0..3 {
        assert!(service.verify_code(ADMIN, &wrong).await.is_err());
    }

    let result = service.verify_code(ADMIN, &code).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::MaxAttemptsExceeded))
    ));
    assert!(store.entry(ADMIN).is_none());
}

#[tokio::test]
async fn test_expired_code_is_rejected_and_removed() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), false);
    let issued = Utc::now() - Duration::minutes(6);
    store.insert(
        ADMIN,
        OtpEntry::issued_at("123456".into(), issued, Duration::minutes(5)),
    );

    let result = service.verify_code(ADMIN, "123456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::CodeExpired))));
    assert!(store.entry(ADMIN).is_none());
}

#[tokio::test]
async fn test_expiry_checked_before_attempts() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), false);
    let mut entry = OtpEntry::issued_at(
        "123456".into(),
        Utc::now() - Duration::minutes(10),
        Duration::minutes(5),
    );
    entry.attempts = 3;
    store.insert(ADMIN, entry);

    let result = service.verify_code(ADMIN, "123456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::CodeExpired))));
}

#[tokio::test]
async fn test_reissue_invalidates_previous_code() {
    let (service, store, channel) = create_service(OtpServiceConfig::default(), false);
    store.insert(
        ADMIN,
        OtpEntry::new("111111".into(), Duration::minutes(5)),
    );

    service.request_code(ADMIN).await.unwrap();
    let new_code = channel.wait_for_code(ADMIN).await.unwrap();
    assert_eq!(store.entry(ADMIN).unwrap().attempts, 0);

    if new_code != "111111" {
        let result = service.verify_code(ADMIN, "111111").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCode { remaining_attempts: 2 }))
        ));
    }
    assert!(service.verify_code(ADMIN, &new_code).await.is_ok());
}

#[tokio::test]
async fn test_purge_expired() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), false);
    store.insert(
        "old@x.com",
        OtpEntry::issued_at(
            "123456".into(),
            Utc::now() - Duration::minutes(30),
            Duration::minutes(5),
        ),
    );
    store.insert(ADMIN, OtpEntry::new("654321".into(), Duration::minutes(5)));

    assert_eq!(service.purge_expired().await.unwrap(), 1);
    assert!(store.entry("old@x.com").is_none());
    assert!(store.entry(ADMIN).is_some());
}

#[tokio::test]
async fn test_custom_code_length() {
    let config = OtpServiceConfig {
        code_length: 8,
        ..Default::default()
    };
    let (service, _, channel) = create_service(config, false);

    service.request_code(ADMIN).await.unwrap();
    assert_eq!(channel.wait_for_code(ADMIN).await.unwrap().len(), 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_correct_submissions_succeed_once() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), false);
    store.insert(ADMIN, OtpEntry::new("123456".into(), Duration::minutes(5)));
    let service = Arc::new(service);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.verify_code(ADMIN, "123456").await })
        })
        .collect();

    let mut successes = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(identity) => {
                assert_eq!(identity.email, ADMIN);
                successes += 1;
            }
            Err(DomainError::Auth(AuthError::CodeNotFound)) => not_found += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(not_found, 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_wrong_submissions_count_every_attempt() {
    let config = OtpServiceConfig {
        max_attempts: 20,
        ..Default::default()
    };
    let (service, store, _) = create_service(config, false);
    store.insert(ADMIN, OtpEntry::new("123456".into(), Duration::minutes(5)));
    let service = Arc::new(service);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.verify_code(ADMIN, "000000").await })
        })
        .collect();

    let mut remaining = HashSet::new();
    for handle in handles {
        match handle.await.unwrap() {
            Err(DomainError::Auth(AuthError::InvalidCode { remaining_attempts })) => {
                remaining.insert(remaining_attempts);
            }
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    // No two submissions saw the same counter
    assert_eq!(remaining, (10..20).collect::<HashSet<u32>>());
    assert_eq!(store.entry(ADMIN).unwrap().attempts, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_wrong_submissions_respect_the_limit() {
    let (service, store, _) = create_service(OtpServiceConfig::default(), false);
    store.insert(ADMIN, OtpEntry::new("123456".into(), Duration::minutes(5)));
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = service.clone();
            tokio::spawn(async move { service.verify_code(ADMIN, "000000").await })
        })
        .collect();

    let (mut invalid, mut exceeded, mut not_found) = (0, 0, 0);
    for handle in handles {
        match handle.await.unwrap() {
            Err(DomainError::Auth(AuthError::InvalidCode { .. })) => invalid += 1,
            Err(DomainError::Auth(AuthError::MaxAttemptsExceeded)) => exceeded += 1,
            Err(DomainError::Auth(AuthError::CodeNotFound)) => not_found += 1,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    assert_eq!((invalid, exceeded, not_found), (3, 1, 4));
    assert!(store.entry(ADMIN).is_none());
}
