//! Traits for code storage and delivery

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_entry::OtpEntry;

/// Storage of outstanding codes, keyed by normalized email
#[async_trait]
pub trait OtpStore: Send + Sync + 'static {
    /// Store an entry, replacing any existing one for the email
    async fn put(&self, email: &str, entry: OtpEntry) -> Result<(), String>;
    /// Fetch the entry for an email
    async fn get(&self, email: &str) -> Result<Option<OtpEntry>, String>;
    /// Drop the entry for an email (no-op when absent)
    async fn remove(&self, email: &str) -> Result<(), String>;
    /// Drop every entry expired at `now`, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String>;
}

/// Out-of-band delivery of a code to its owner
#[async_trait]
pub trait NotificationChannel: Send + Sync + 'static {
    /// Deliver `code` to `email`, returning a provider message id
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String>;
}
