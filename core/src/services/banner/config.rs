//! Configuration for the banner service

use crate::domain::entities::banner::MAX_IMAGE_BYTES;

#[derive(Debug, Clone)]
pub struct BannerServiceConfig {
    /// Largest accepted image in bytes
    pub max_image_bytes: usize,
}

impl Default for BannerServiceConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}
