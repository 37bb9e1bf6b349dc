//! Trait for the storefront collection catalog

use async_trait::async_trait;

use crate::domain::entities::collection::Collection;

/// Read access to the storefront's product collections
#[async_trait]
pub trait CollectionCatalog: Send + Sync {
    /// Fetch all collections
    async fn list_collections(&self) -> Result<Vec<Collection>, String>;
}
