//! Storefront Module
//!
//! Reads product collections from the Shopify Storefront GraphQL API.

pub mod client;


pub use client::{parse_collections, StorefrontClient, COLLECTIONS_QUERY};
