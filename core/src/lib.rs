//! # MultiYO Admin Core
//!
//! Business logic for the MultiYO admin backend: email one-time code login,
//! stateless session tokens and collection banner management. Storage,
//! email delivery and the storefront are reached through traits implemented
//! in `ma_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
