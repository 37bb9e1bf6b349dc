//! Request and response bodies
//!
//! Field names are camelCase on the wire to match the admin front end.

pub mod auth;
pub mod banner;
pub mod collection;

pub use auth::*;
pub use banner::*;
pub use collection::*;
