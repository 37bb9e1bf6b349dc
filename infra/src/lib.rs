//! # Infrastructure Layer
//!
//! Concrete implementations of the traits defined in `ma_core`:
//!
//! - **Cache**: in-process one-time code store
//! - **Email**: SMTP delivery through `lettre`, plus a logging mock for development
//! - **Storefront**: Shopify Storefront GraphQL client for collections
//! - **Database**: MySQL banner repository using SQLx

// Re-export core types for convenience
pub use ma_core::errors::*;

/// Cache module - in-memory code storage
pub mod cache;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - code delivery
pub mod email;

/// Storefront module - collection catalog client
pub mod storefront;

pub use cache::InMemoryOtpStore;
pub use database::{DatabasePool, MySqlBannerRepository};
pub use email::{EmailChannel, MockEmailService, SmtpEmailService};
pub use storefront::StorefrontClient;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storefront API returned an error payload
    #[error("Storefront error: {0}")]
    Storefront(String),
}
