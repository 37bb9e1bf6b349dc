//! Mock implementation of BannerRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::banner::Banner;
use crate::errors::DomainError;

use super::r#trait::BannerRepository;

/// Mock banner repository for testing
pub struct MockBannerRepository {
    banners: Arc<RwLock<HashMap<Uuid, Banner>>>,
}

impl MockBannerRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            banners: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn count(&self) -> usize {
        self.banners.read().await.len()
    }
}

impl Default for MockBannerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BannerRepository for MockBannerRepository {
    async fn list(&self) -> Result<Vec<Banner>, DomainError> {
        let banners = self.banners.read().await;
        let mut all: Vec<Banner> = banners.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, DomainError> {
        Ok(self.banners.read().await.get(&id).cloned())
    }

    async fn insert(&self, banner: &Banner) -> Result<(), DomainError> {
        let mut banners = self.banners.write().await;
        if banners.contains_key(&banner.id) {
            return Err(DomainError::Validation {
                message: "Banner already exists".to_string(),
            });
        }
        banners.insert(banner.id, banner.clone());
        Ok(())
    }

    async fn update(&self, banner: &Banner) -> Result<bool, DomainError> {
        let mut banners = self.banners.write().await;
        match banners.get_mut(&banner.id) {
            Some(existing) => {
                *existing = banner.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.banners.write().await.remove(&id).is_some())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
