//! Email one-time code login
//!
//! - code generation from the OS CSPRNG
//! - delivery through a pluggable notification channel
//! - verification with expiry and a fixed attempt budget
//! - admin allow-list enforcement

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::{NotificationChannel, OtpStore};
