//! Banner management: listing, upload, replacement and deletion of
//! collection banners, plus the storefront collection lookup they rely on.

mod config;
mod service;
mod traits;


pub use config::BannerServiceConfig;
pub use service::BannerService;
pub use traits::CollectionCatalog;
