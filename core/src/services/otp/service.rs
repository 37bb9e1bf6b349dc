//! Main OTP service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use ma_shared::utils::validation::required_trimmed;

use crate::domain::entities::otp_entry::OtpEntry;
use crate::domain::value_objects::{AdminAllowList, AdminEmail, OtpDispatch, VerifiedIdentity};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};

use super::config::OtpServiceConfig;
use super::traits::{NotificationChannel, OtpStore};

/// Issues and verifies one-time login codes for allow-listed admins
pub struct OtpService<S: OtpStore, N: NotificationChannel> {
    /// Storage for outstanding codes
    store: Arc<S>,
    /// Delivery channel (email)
    channel: Arc<N>,
    /// Emails allowed to log in
    allow_list: AdminAllowList,
    /// Service configuration
    config: OtpServiceConfig,
    /// Serializes every read-modify-write of the store
    store_lock: Arc<Mutex<()>>,
}

impl<S: OtpStore, N: NotificationChannel> OtpService<S, N> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Code storage implementation
    /// * `channel` - Notification channel used to deliver codes
    /// * `allow_list` - Admin emails permitted to request codes
    /// * `config` - Service configuration
    pub fn new(
        store: Arc<S>,
        channel: Arc<N>,
        allow_list: AdminAllowList,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            channel,
            allow_list,
            config,
            store_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Issue a code to an admin email
    ///
    /// This method:
    /// 1. Normalizes and validates the email
    /// 2. Checks the admin allow-list
    /// 3. Generates a code and stores it, replacing any previous one
    /// 4. Sends the code through the notification channel
    ///
    /// Unknown emails get no entry and no message. Unless
    /// `reveal_unauthorized` is set they receive the same result as a real
    /// admin, and the send is handed to a background task so response time
    /// does not depend on allow-list membership either. A failed background
    /// send is logged and its entry discarded.
    ///
    /// # Returns
    ///
    /// * `Ok(OtpDispatch)` - Masked email and code lifetime
    /// * `Err(DomainError)` - Invalid input, storage failure, or (reveal mode
    ///   only) an unauthorized email or a failed delivery
    pub async fn request_code(&self, raw_email: &str) -> DomainResult<OtpDispatch> {
        let email = AdminEmail::parse(raw_email)?;
        let masked = email.masked();
        let dispatch = OtpDispatch {
            masked_email: masked.clone(),
            expires_in_seconds: self.config.expires_in_seconds(),
        };

        if !self.allow_list.contains(&email) {
            tracing::warn!(
                email = %masked,
                event = "otp_request_unauthorized",
                "Code requested for an email outside the admin allow-list"
            );
            if self.config.reveal_unauthorized {
                return Err(AuthError::NotAuthorized.into());
            }
            return Ok(dispatch);
        }

        let code = OtpEntry::generate_code(self.config.code_length);
        let entry = OtpEntry::new(
            code.clone(),
            Duration::minutes(self.config.code_expiration_minutes),
        );

        {
            let _guard = self.store_lock.lock().await;
            self.store
                .put(email.as_str(), entry)
                .await
                .map_err(|e| {
                    tracing::error!(
                        email = %masked,
                        error = %e,
                        event = "otp_storage_failed",
                        "Failed to store verification code"
                    );
                    DomainError::Internal {
                        message: format!("Failed to store verification code: {}", e),
                    }
                })?;
        }

        tracing::info!(
            email = %masked,
            event = "otp_generated",
            expires_in = dispatch.expires_in_seconds,
            "Generated new verification code"
        );

        let delivery = deliver(
            self.store.clone(),
            self.channel.clone(),
            self.store_lock.clone(),
            email,
            code,
        );

        // Outside reveal mode response time must not depend on allow-list
        // membership, so the send runs in the background.
        if !self.config.reveal_unauthorized {
            tokio::spawn(delivery);
            return Ok(dispatch);
        }

        if delivery.await {
            Ok(dispatch)
        } else {
            Err(AuthError::DispatchFailed.into())
        }
    }

    /// Verify a submitted code
    ///
    /// Checks run in a fixed order: missing entry, expiry, exhausted
    /// attempts, then the constant-time comparison. Expired and exhausted
    /// entries are removed; a mismatch increments the attempt counter; a
    /// match consumes the entry.
    ///
    /// The entry survives the last allowed mismatch (zero attempts
    /// remaining), so the following submission fails with
    /// `MaxAttemptsExceeded` even when it carries the right code.
    pub async fn verify_code(
        &self,
        raw_email: &str,
        raw_code: &str,
    ) -> DomainResult<VerifiedIdentity> {
        let email = AdminEmail::parse(raw_email)?;
        let code = required_trimmed(Some(raw_code)).ok_or_else(|| ValidationError::required("otp"))?;
        let masked = email.masked();

        let _guard = self.store_lock.lock().await;

        let Some(mut entry) = self.store.get(email.as_str()).await.map_err(store_error)? else {
            tracing::warn!(
                email = %masked,
                event = "otp_not_found",
                "No outstanding code for email"
            );
            return Err(AuthError::CodeNotFound.into());
        };

        if entry.is_expired_at(Utc::now()) {
            self.store.remove(email.as_str()).await.map_err(store_error)?;
            tracing::warn!(email = %masked, event = "otp_expired", "Verification code expired");
            return Err(AuthError::CodeExpired.into());
        }

        if entry.attempts_exhausted(self.config.max_attempts) {
            self.store.remove(email.as_str()).await.map_err(store_error)?;
            tracing::warn!(
                email = %masked,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded"
            );
            return Err(AuthError::MaxAttemptsExceeded.into());
        }

        if !entry.matches(code) {
            let remaining_attempts = entry.record_failure(self.config.max_attempts);
            self.store
                .put(email.as_str(), entry)
                .await
                .map_err(store_error)?;
            tracing::warn!(
                email = %masked,
                remaining_attempts = remaining_attempts,
                event = "otp_verification_failed",
                "Incorrect verification code"
            );
            return Err(AuthError::InvalidCode { remaining_attempts }.into());
        }

        self.store.remove(email.as_str()).await.map_err(store_error)?;
        tracing::info!(
            email = %masked,
            event = "otp_verified_success",
            "Verification code successfully verified"
        );

        Ok(VerifiedIdentity {
            email: email.as_str().to_string(),
        })
    }

    /// Remove expired entries; returns how many were dropped
    pub async fn purge_expired(&self) -> DomainResult<usize> {
        let _guard = self.store_lock.lock().await;
        let purged = self
            .store
            .purge_expired(Utc::now())
            .await
            .map_err(store_error)?;
        if purged > 0 {
            tracing::debug!(purged = purged, event = "otp_purged", "Purged expired codes");
        }
        Ok(purged)
    }
}

/// Send a stored code and drop it again when delivery fails
///
/// Returns whether the code reached the channel.
async fn deliver<S: OtpStore, N: NotificationChannel>(
    store: Arc<S>,
    channel: Arc<N>,
    store_lock: Arc<Mutex<()>>,
    email: AdminEmail,
    code: String,
) -> bool {
    let masked = email.masked();
    match channel.send_code(email.as_str(), &code).await {
        Ok(message_id) => {
            tracing::info!(
                email = %masked,
                message_id = %message_id,
                event = "otp_dispatched",
                "Verification code sent"
            );
            true
        }
        Err(e) => {
            tracing::error!(
                email = %masked,
                error = %e,
                event = "otp_dispatch_failed",
                "Failed to deliver verification code"
            );
            discard_undelivered(store.as_ref(), &store_lock, &email, &code).await;
            false
        }
    }
}

// Drops the entry for a code that could not be delivered, unless a newer
// request has already replaced it.
async fn discard_undelivered<S: OtpStore>(
    store: &S,
    store_lock: &Mutex<()>,
    email: &AdminEmail,
    code: &str,
) {
    let _guard = store_lock.lock().await;
    match store.get(email.as_str()).await {
        Ok(Some(current)) if current.matches(code) => {
            if let Err(e) = store.remove(email.as_str()).await {
                tracing::error!(
                    email = %email.masked(),
                    error = %e,
                    event = "otp_cleanup_failed",
                    "Failed to remove undelivered code"
                );
            }
        }
        Ok(_) => {}
        Err(e) => tracing::error!(
            email = %email.masked(),
            error = %e,
            event = "otp_cleanup_failed",
            "Failed to read undelivered code"
        ),
    }
}

fn store_error(e: String) -> DomainError {
    DomainError::Internal {
        message: format!("Verification code storage error: {}", e),
    }
}
