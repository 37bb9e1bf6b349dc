use serde::{Deserialize, Serialize};

use ma_core::domain::entities::{Collection, CollectionImage};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionImageDto {
    pub url: String,
    pub alt_text: Option<String>,
}

impl From<&CollectionImage> for CollectionImageDto {
    fn from(image: &CollectionImage) -> Self {
        Self {
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
        }
    }
}

/// Storefront collection as listed in the banner editor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDto {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub image: Option<CollectionImageDto>,
    pub product_count: usize,
}

impl From<&Collection> for CollectionDto {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id.clone(),
            title: collection.title.clone(),
            handle: collection.handle.clone(),
            description: collection.description.clone(),
            image: collection.image.as_ref().map(CollectionImageDto::from),
            product_count: collection.product_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionListResponse {
    pub collections: Vec<CollectionDto>,
}
