//! One-time code entity for email-based admin login.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use std::fmt;

/// Maximum number of failed submissions per code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Default lifetime of a code (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// An outstanding one-time code challenge for one admin email
///
/// At most one entry exists per email; issuing a new code replaces the old
/// entry. `Debug` output never includes the code.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpEntry {
    /// Fixed-length numeric code
    pub code: String,

    /// When the code was issued
    pub created_at: DateTime<Utc>,

    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Failed submissions so far
    pub attempts: u32,
}

impl OtpEntry {
    /// Creates an entry for `code` issued now
    pub fn new(code: String, ttl: Duration) -> Self {
        Self::issued_at(code, Utc::now(), ttl)
    }

    /// Creates an entry for `code` issued at `now`
    pub fn issued_at(code: String, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code,
            created_at: now,
            expires_at: now + ttl,
            attempts: 0,
        }
    }

    /// Generates a uniformly random numeric code from the OS CSPRNG
    pub fn generate_code(length: usize) -> String {
        let mut rng = OsRng;
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Whether the code is past its expiry at `now`
    ///
    /// A code is still accepted at exactly `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the failed-attempt budget is used up
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Compares a submitted code in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Counts a failed submission and returns the attempts left
    pub fn record_failure(&mut self, max_attempts: u32) -> u32 {
        self.attempts += 1;
        self.remaining_attempts(max_attempts)
    }

    /// Attempts left before the entry is exhausted
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Seconds from `now` until expiry, zero once expired
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

impl fmt::Debug for OtpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpEntry")
            .field("code", &"<redacted>")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("attempts", &self.attempts)
            .finish()
    }
}
