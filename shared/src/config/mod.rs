//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session tokens, one-time codes and the admin allow-list
//! - `database` - banner store connection pool
//! - `email` - SMTP relay for code delivery
//! - `environment` - environment detection
//! - `server` - HTTP server and CORS
//! - `storefront` - Shopify Storefront API

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod storefront;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AdminConfig, AuthConfig, JwtConfig, OtpConfig};
pub use database::DatabaseConfig;
pub use email::SmtpConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig};
pub use storefront::StorefrontConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// SMTP configuration
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Storefront configuration
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            smtp: SmtpConfig::from_env(),
            storefront: StorefrontConfig::from_env(),
        }
    }

    /// Numeric settings outside their supported ranges
    ///
    /// These would fail inside request handlers, so they are fatal in every
    /// environment.
    pub fn limit_violations(&self) -> Vec<String> {
        let mut problems = self.auth.jwt.limit_violations();
        problems.extend(self.auth.otp.limit_violations());
        problems
    }

    /// Check the settings that must be present before serving traffic
    ///
    /// Returns one message per problem; an empty list means the
    /// configuration is usable. Includes every limit violation.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = self.limit_violations();

        if self.auth.admins.emails.is_empty() {
            problems.push("no admin emails configured (ADMIN_1, ADMIN_2, ...)".to_string());
        }
        for (name, email) in self.auth.admins.invalid_entries() {
            problems.push(format!("{} is not a valid email address: {}", name, email));
        }
        if self.environment.is_production() {
            if self.auth.jwt.is_using_default_secret() {
                problems.push("JWT_SECRET_KEY must be set in production".to_string());
            }
        }
        if !self.smtp.is_configured() && !self.environment.allows_mock_delivery() {
            problems.push(format!("SMTP_HOST must be set in {}", self.environment));
        }
        if self.smtp.is_configured() && self.smtp.sender().is_none() {
            problems.push("SMTP_FROM or SMTP_USER must be set when SMTP_HOST is set".to_string());
        }

        problems
    }
}
