//! Storefront product collection as consumed by the banner screens.

use serde::{Deserialize, Serialize};

/// Collection image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionImage {
    pub url: String,
    pub alt_text: Option<String>,
}

/// A product collection read from the storefront
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Storefront global id (e.g. `gid://shopify/Collection/1`)
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<CollectionImage>,
    /// Number of products returned with the collection
    pub product_count: usize,
}
