//! Unit tests for token service

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{extract_bearer_token, TokenService, TokenServiceConfig};

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_issue_and_verify() {
    let service = create_test_service();

    let session = service.issue("admin@x.com").unwrap();
    assert_eq!(session.email, "admin@x.com");
    assert_eq!(session.expires_in(), 86400);

    let verified = service.verify(&session.token).unwrap();
    assert_eq!(verified.email, "admin@x.com");
    assert_eq!(verified.expires_at, session.expires_at);
}

#[test]
fn test_expired_token() {
    let service = create_test_service();
    let session = service
        .issue_at("admin@x.com", Utc::now() - Duration::hours(25))
        .unwrap();

    assert_eq!(service.verify(&session.token), Err(TokenError::TokenExpired));
}

#[test]
fn test_wrong_secret_is_invalid_signature() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..Default::default()
    })
    .unwrap();

    let session = other.issue("admin@x.com").unwrap();
    assert_eq!(service.verify(&session.token), Err(TokenError::InvalidSignature));
}

#[test]
fn test_garbage_token_is_invalid_format() {
    let service = create_test_service();

    assert_eq!(service.verify("not.a.jwt"), Err(TokenError::InvalidTokenFormat));
    assert_eq!(service.verify(""), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_token_without_email_is_invalid_format() {
    #[derive(serde::Serialize)]
    struct NoEmail {
        iat: i64,
        exp: i64,
    }

    let service = create_test_service();
    let now = Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &NoEmail { iat: now, exp: now + 60 },
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_token_with_blank_email_is_invalid_format() {
    let service = create_test_service();
    let claims = Claims::new("  ", Utc::now(), Duration::minutes(5));
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    assert_eq!(service.verify(&token), Err(TokenError::InvalidTokenFormat));
}

#[test]
fn test_empty_secret_rejected() {
    let result = TokenService::new(TokenServiceConfig {
        jwt_secret: String::new(),
        ..Default::default()
    });
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[test]
fn test_extract_bearer_token() {
    assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    assert_eq!(extract_bearer_token("bearer abc"), Some("abc"));
    assert_eq!(extract_bearer_token("BEARER   abc"), Some("abc"));
    assert_eq!(extract_bearer_token("Bearer"), None);
    assert_eq!(extract_bearer_token("Basic abc"), None);
    assert_eq!(extract_bearer_token("Bearer abc extra"), None);
    assert_eq!(extract_bearer_token(""), None);
}
