//! Mock Email Service Implementation
//!
//! Logs instead of sending. The code itself is only printed to the console
//! so development logins work without a relay; structured logs carry the
//! masked address only.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use ma_core::services::otp::NotificationChannel;
use ma_shared::utils::email::mask_email;

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockEmailService {
    /// Create a new mock email service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationChannel for MockEmailService {
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String> {
        let masked = mask_email(email);

        if self.simulate_failure {
            warn!(email = %masked, provider = "mock", "Mock email service simulating failure");
            return Err("Simulated email sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", email);
            println!("Message ID: {}", message_id);
            println!("Login code: {}", code);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }
}
