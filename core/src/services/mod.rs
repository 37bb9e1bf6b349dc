//! Business services containing domain logic and use cases.

pub mod banner;
pub mod otp;
pub mod token;

// Re-export commonly used types
pub use banner::{BannerService, BannerServiceConfig, CollectionCatalog};
pub use otp::{NotificationChannel, OtpService, OtpServiceConfig, OtpStore};
pub use token::{extract_bearer_token, TokenService, TokenServiceConfig};
