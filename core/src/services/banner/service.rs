//! Main banner service implementation

use std::sync::Arc;
use uuid::Uuid;

use ma_shared::utils::validation::required_trimmed;

use crate::domain::entities::banner::{Banner, ImageType, ImageUpload};
use crate::domain::entities::collection::Collection;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::BannerRepository;

use super::config::BannerServiceConfig;
use super::traits::CollectionCatalog;

/// Banner management on top of a banner repository and the storefront catalog
pub struct BannerService<R: BannerRepository, C: CollectionCatalog> {
    repository: Arc<R>,
    catalog: Arc<C>,
    config: BannerServiceConfig,
}

impl<R: BannerRepository, C: CollectionCatalog> BannerService<R, C> {
    pub fn new(repository: Arc<R>, catalog: Arc<C>, config: BannerServiceConfig) -> Self {
        Self {
            repository,
            catalog,
            config,
        }
    }

    /// Largest image accepted by upload and replace
    pub fn max_image_bytes(&self) -> usize {
        self.config.max_image_bytes
    }

    /// All storefront collections
    pub async fn list_collections(&self) -> DomainResult<Vec<Collection>> {
        self.catalog.list_collections().await.map_err(|e| {
            tracing::error!(error = %e, event = "catalog_fetch_failed", "Failed to fetch collections");
            DomainError::External {
                message: format!("Failed to fetch collections: {}", e),
            }
        })
    }

    /// All banners, newest first
    pub async fn list_banners(&self) -> DomainResult<Vec<Banner>> {
        self.repository.list().await
    }

    /// Store a new banner for a collection
    ///
    /// An id the storefront does not know is still accepted; the banner
    /// then uses the id as its collection title.
    pub async fn upload_banner(
        &self,
        image: ImageUpload<'_>,
        collection_id: Option<&str>,
    ) -> DomainResult<Banner> {
        let collection_id =
            required_trimmed(collection_id).ok_or_else(|| ValidationError::required("collectionId"))?;
        let image_type = self.validate_image(&image)?;

        let collections = self.list_collections().await?;
        let collection = collections.iter().find(|c| c.id == collection_id);
        if collection.is_none() {
            tracing::warn!(
                collection_id = collection_id,
                event = "banner_unknown_collection",
                "Uploading banner for a collection the storefront does not list"
            );
        }

        let banner = Banner::new(image.bytes, image_type, collection_id, collection);
        self.repository.insert(&banner).await?;

        tracing::info!(
            banner_id = %banner.id,
            collection_id = collection_id,
            image_type = %image_type,
            size = image.bytes.len(),
            event = "banner_uploaded",
            "Banner uploaded"
        );
        Ok(banner)
    }

    /// Replace the image and collection of an existing banner
    pub async fn replace_banner(
        &self,
        banner_id: &str,
        image: ImageUpload<'_>,
        collection_id: Option<&str>,
    ) -> DomainResult<Banner> {
        let mut banner = self.find_banner(banner_id).await?;

        let image_type = self.validate_image(&image)?;
        let collection_id =
            required_trimmed(collection_id).ok_or_else(|| ValidationError::required("collectionId"))?;

        let collections = self.list_collections().await?;
        let collection = collections
            .iter()
            .find(|c| c.id == collection_id)
            .ok_or_else(|| DomainError::not_found("collection"))?;

        banner.replace(image.bytes, image_type, collection);
        if !self.repository.update(&banner).await? {
            return Err(DomainError::not_found("banner"));
        }

        tracing::info!(
            banner_id = %banner.id,
            collection_id = collection_id,
            event = "banner_replaced",
            "Banner replaced"
        );
        Ok(banner)
    }

    /// Delete a banner
    pub async fn delete_banner(&self, banner_id: &str) -> DomainResult<()> {
        let id = parse_banner_id(banner_id)?;
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found("banner"));
        }
        tracing::info!(banner_id = %id, event = "banner_deleted", "Banner deleted");
        Ok(())
    }

    /// Whether the banner store is reachable
    pub async fn database_connected(&self) -> bool {
        self.repository.is_healthy().await
    }

    async fn find_banner(&self, banner_id: &str) -> DomainResult<Banner> {
        let id = parse_banner_id(banner_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("banner"))
    }

    fn validate_image(&self, image: &ImageUpload<'_>) -> Result<ImageType, ValidationError> {
        if image.bytes.is_empty() {
            return Err(ValidationError::required("banner image"));
        }
        let image_type = image
            .image_type()
            .ok_or_else(|| ValidationError::UnsupportedImageType {
                allowed: ImageType::ALLOWED.to_string(),
            })?;
        if image.bytes.len() > self.config.max_image_bytes {
            return Err(ValidationError::FileTooLarge {
                max_bytes: self.config.max_image_bytes,
            });
        }
        Ok(image_type)
    }
}

// Ids that are not UUIDs cannot name a stored banner
fn parse_banner_id(banner_id: &str) -> DomainResult<Uuid> {
    Uuid::parse_str(banner_id.trim()).map_err(|_| DomainError::not_found("banner"))
}
