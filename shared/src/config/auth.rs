//! Authentication configuration: session tokens, one-time codes and the
//! admin allow-list

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::utils::email::is_valid_email;

const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token expiry time in seconds
    pub expiry_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expiry_seconds: 86400, // 24 hours
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session expiry in hours
    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.expiry_seconds = hours * 3600;
        self
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET_KEY")
            .or_else(|_| std::env::var("JWT_SECRET"))
            .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let expiry_seconds = std::env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);

        Self {
            secret,
            expiry_seconds,
        }
    }

    /// Accepted session lifetimes: one minute to 30 days
    pub const EXPIRY_SECONDS_RANGE: RangeInclusive<i64> = 60..=30 * 24 * 3600;

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Values outside the supported ranges
    pub fn limit_violations(&self) -> Vec<String> {
        out_of_range("JWT_EXPIRATION", self.expiry_seconds, &Self::EXPIRY_SECONDS_RANGE)
            .into_iter()
            .collect()
    }
}

/// One-time code configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a code
    pub code_length: usize,

    /// Minutes until an issued code expires
    pub expiration_minutes: i64,

    /// Failed submissions allowed per code
    pub max_attempts: u32,

    /// Answer unknown emails with an explicit "not an admin" error instead
    /// of the regular success response
    #[serde(default)]
    pub reveal_unauthorized: bool,

    /// Seconds between sweeps of expired codes
    #[serde(default = "default_purge_interval")]
    pub purge_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            expiration_minutes: 5,
            max_attempts: 3,
            reveal_unauthorized: false,
            purge_interval_seconds: default_purge_interval(),
        }
    }
}

impl OtpConfig {
    pub const CODE_LENGTH_RANGE: RangeInclusive<usize> = 4..=10;
    /// One minute to one day
    pub const EXPIRATION_MINUTES_RANGE: RangeInclusive<i64> = 1..=24 * 60;
    pub const MAX_ATTEMPTS_RANGE: RangeInclusive<u32> = 1..=10;
    /// One second to one hour
    pub const PURGE_INTERVAL_RANGE: RangeInclusive<u64> = 1..=3600;

    /// Values outside the supported ranges
    pub fn limit_violations(&self) -> Vec<String> {
        [
            out_of_range("OTP_LENGTH", self.code_length, &Self::CODE_LENGTH_RANGE),
            out_of_range(
                "OTP_EXPIRATION_MINUTES",
                self.expiration_minutes,
                &Self::EXPIRATION_MINUTES_RANGE,
            ),
            out_of_range("OTP_MAX_ATTEMPTS", self.max_attempts, &Self::MAX_ATTEMPTS_RANGE),
            out_of_range(
                "OTP_PURGE_INTERVAL_SECONDS",
                self.purge_interval_seconds,
                &Self::PURGE_INTERVAL_RANGE,
            ),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            code_length: parse_env("OTP_LENGTH").unwrap_or(defaults.code_length),
            expiration_minutes: parse_env("OTP_EXPIRATION_MINUTES")
                .unwrap_or(defaults.expiration_minutes),
            max_attempts: parse_env("OTP_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            reveal_unauthorized: parse_env("OTP_REVEAL_UNAUTHORIZED")
                .unwrap_or(defaults.reveal_unauthorized),
            purge_interval_seconds: parse_env("OTP_PURGE_INTERVAL_SECONDS")
                .unwrap_or(defaults.purge_interval_seconds),
        }
    }
}

/// Admin allow-list configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    /// Normalized admin emails in configuration order
    pub emails: Vec<String>,
}

impl AdminConfig {
    /// Load `ADMIN_1`, `ADMIN_2`, ... until the first missing or blank index
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the numbered admin entries through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut emails = Vec::new();
        let mut counter = 1;

        while let Some(value) = lookup(&format!("ADMIN_{}", counter)) {
            let email = value.trim().to_lowercase();
            if email.is_empty() {
                break;
            }
            emails.push(email);
            counter += 1;
        }

        Self { emails }
    }

    /// Entries that can never log in because they are not valid addresses,
    /// as `(variable name, value)` pairs
    pub fn invalid_entries(&self) -> Vec<(String, &str)> {
        self.emails
            .iter()
            .enumerate()
            .filter(|(_, email)| !is_valid_email(email))
            .map(|(index, email)| (format!("ADMIN_{}", index + 1), email.as_str()))
            .collect()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// One-time code configuration
    #[serde(default)]
    pub otp: OtpConfig,

    /// Admin allow-list
    #[serde(default)]
    pub admins: AdminConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            otp: OtpConfig::from_env(),
            admins: AdminConfig::from_env(),
        }
    }
}

fn out_of_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Option<String>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        None
    } else {
        Some(format!(
            "{} must be between {} and {} (got {})",
            name,
            range.start(),
            range.end(),
            value
        ))
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn default_purge_interval() -> u64 {
    60
}
