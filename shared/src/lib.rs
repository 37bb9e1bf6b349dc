//! Shared utilities and common types for the MultiYO admin server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Utility functions (email normalization, masking, validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AdminConfig, AppConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, OtpConfig,
    ServerConfig, SmtpConfig, StorefrontConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::{email, validation};
