//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::value_objects::{SessionToken, VerifiedSession};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for issuing and verifying admin session tokens
///
/// Tokens are not stored anywhere; a token is valid while its signature
/// checks out and its `exp` is not in the past.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an internal error for an empty secret or a
    /// non-HMAC algorithm
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if !matches!(
            config.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Session lifetime in seconds
    pub fn session_expiry_seconds(&self) -> i64 {
        self.config.session_expiry_seconds
    }

    /// Issues a session token for a verified admin email
    pub fn issue(&self, email: &str) -> Result<SessionToken, TokenError> {
        self.issue_at(email, Utc::now())
    }

    /// Issues a session token as if the current time were `now`
    pub fn issue_at(&self, email: &str, now: DateTime<Utc>) -> Result<SessionToken, TokenError> {
        let claims = Claims::new(
            email,
            now,
            Duration::seconds(self.config.session_expiry_seconds),
        );

        let token = encode(
            &Header::new(self.config.algorithm),
            &claims,
            &self.encoding_key,
        )
        .map_err(|e| {
            tracing::error!(error = %e, event = "token_generation_failed", "Failed to sign session token");
            TokenError::TokenGenerationFailed
        })?;

        Ok(SessionToken {
            token,
            email: claims.email.clone(),
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
        })
    }

    /// Verifies a session token and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedSession)` - Signature and expiry check passed
    /// * `Err(TokenError::TokenExpired)` - Valid signature, `exp` in the past
    /// * `Err(TokenError::InvalidSignature)` - Signed with another key
    /// * `Err(TokenError::InvalidTokenFormat)` - Anything else
    pub fn verify(&self, token: &str) -> Result<VerifiedSession, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;

        if data.claims.email.trim().is_empty() {
            return Err(TokenError::InvalidTokenFormat);
        }

        Ok(VerifiedSession {
            expires_at: data.claims.expires_at(),
            email: data.claims.email,
        })
    }
}

/// Extracts the token from an `Authorization` header value
///
/// The value must be exactly two whitespace-separated parts with a
/// case-insensitive `Bearer` scheme.
pub fn extract_bearer_token(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token)
}
