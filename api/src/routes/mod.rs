pub mod auth;
pub mod banners;
pub mod collections;
pub mod health;
