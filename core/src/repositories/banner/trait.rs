//! Banner repository trait defining the interface for banner persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::banner::Banner;
use crate::errors::DomainError;

/// Repository trait for Banner entity persistence operations
#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// All banners, newest `created_at` first
    async fn list(&self) -> Result<Vec<Banner>, DomainError>;

    /// Find a banner by id
    ///
    /// # Returns
    /// * `Ok(Some(Banner))` - Banner found
    /// * `Ok(None)` - No banner with this id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, DomainError>;

    /// Persist a new banner
    async fn insert(&self, banner: &Banner) -> Result<(), DomainError>;

    /// Overwrite an existing banner; `Ok(false)` when the id is unknown
    async fn update(&self, banner: &Banner) -> Result<bool, DomainError>;

    /// Delete a banner; `Ok(false)` when the id is unknown
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Whether the backing store is reachable
    async fn is_healthy(&self) -> bool;
}
