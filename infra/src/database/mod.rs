//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and health checks
//! - Banner table bootstrap
//! - Banner repository implementation

pub mod connection;
pub mod mysql;


pub use connection::DatabasePool;
pub use mysql::MySqlBannerRepository;
