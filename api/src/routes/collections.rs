use actix_web::{web, HttpResponse};

use ma_core::repositories::BannerRepository;
use ma_core::services::CollectionCatalog;

use crate::app::BannerState;
use crate::dto::collection::{CollectionDto, CollectionListResponse};
use crate::handlers::error::handle_domain_error;

/// GET /api/collections (JWT protected)
pub async fn list_collections<R, C>(state: web::Data<BannerState<R, C>>) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    match state.banner_service.list_collections().await {
        Ok(collections) => HttpResponse::Ok().json(CollectionListResponse {
            collections: collections.iter().map(CollectionDto::from).collect(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}
