//! Session token service module
//!
//! Issues and verifies the stateless HS256 JWTs handed out after a
//! successful code verification, and parses `Authorization: Bearer` headers.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::{extract_bearer_token, TokenService};
