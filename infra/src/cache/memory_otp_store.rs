//! In-process implementation of the `OtpStore` trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use ma_core::domain::entities::otp_entry::OtpEntry;
use ma_core::services::otp::OtpStore;

/// One-time code store backed by a mutex-guarded map
///
/// Keys are the normalized admin emails; each put replaces the previous
/// entry for that email.
#[derive(Default)]
pub struct InMemoryOtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, email: &str, entry: OtpEntry) -> Result<(), String> {
        self.entries.lock().await.insert(email.to_string(), entry);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpEntry>, String> {
        Ok(self.entries.lock().await.get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<(), String> {
        self.entries.lock().await.remove(email);
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, String> {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let purged = before - entries.len();
        if purged > 0 {
            debug!(purged = purged, remaining = entries.len(), "Purged expired OTP entries");
        }
        Ok(purged)
    }
}
