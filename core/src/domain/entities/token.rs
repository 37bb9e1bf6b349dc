//! Session token claims.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Session token lifetime (24 hours)
pub const SESSION_TOKEN_EXPIRY_SECONDS: i64 = 86400;

/// JWT payload of an admin session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin email the session belongs to
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Claims for a session issued at `now` lasting `ttl`
    pub fn new(email: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            email: email.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Issue time as a `DateTime`
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_default()
    }

    /// Expiry time as a `DateTime`
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}
