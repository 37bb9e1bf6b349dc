//! Value objects representing immutable domain concepts.

pub mod admin;
pub mod auth_response;

// Re-export commonly used types
pub use admin::{AdminAllowList, AdminEmail};
pub use auth_response::{OtpDispatch, SessionToken, VerifiedIdentity, VerifiedSession};
