//! Banner endpoints (JWT protected)
//!
//! Upload and replace take `multipart/form-data` with the image in the
//! `banner` file part and the target collection in `collectionId`.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use ma_core::repositories::BannerRepository;
use ma_core::services::CollectionCatalog;

use crate::app::BannerState;
use crate::dto::banner::{
    BannerDto, BannerForm, BannerListResponse, BannerResponse, MessageResponse,
};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// GET /api/banners, newest first
pub async fn list_banners<R, C>(state: web::Data<BannerState<R, C>>) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    match state.banner_service.list_banners().await {
        Ok(banners) => HttpResponse::Ok().json(BannerListResponse {
            banners: banners.iter().map(BannerDto::from).collect(),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// POST /api/banners/upload
pub async fn upload_banner<R, C>(
    auth: AuthContext,
    state: web::Data<BannerState<R, C>>,
    payload: Multipart,
) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    let service = &state.banner_service;
    let form = match BannerForm::read(payload, service.max_image_bytes()).await {
        Ok(form) => form,
        Err(error) => return handle_domain_error(&error),
    };
    log::info!("Banner upload by {} ({} bytes)", auth.email, form.image.len());

    let result = service
        .upload_banner(form.upload(), form.collection_id.as_deref())
        .await;

    match result {
        Ok(banner) => HttpResponse::Created().json(BannerResponse {
            message: "Banner uploaded successfully".to_string(),
            banner: BannerDto::from(&banner),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// PUT /api/banners/{id}/replace
pub async fn replace_banner<R, C>(
    auth: AuthContext,
    state: web::Data<BannerState<R, C>>,
    path: web::Path<String>,
    payload: Multipart,
) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    let banner_id = path.into_inner();
    let service = &state.banner_service;
    let form = match BannerForm::read(payload, service.max_image_bytes()).await {
        Ok(form) => form,
        Err(error) => return handle_domain_error(&error),
    };
    log::info!("Banner {} replaced by {}", banner_id, auth.email);

    let result = service
        .replace_banner(&banner_id, form.upload(), form.collection_id.as_deref())
        .await;

    match result {
        Ok(banner) => HttpResponse::Ok().json(BannerResponse {
            message: "Banner replaced successfully".to_string(),
            banner: BannerDto::from(&banner),
        }),
        Err(error) => handle_domain_error(&error),
    }
}

/// DELETE /api/banners/{id}
pub async fn delete_banner<R, C>(
    auth: AuthContext,
    state: web::Data<BannerState<R, C>>,
    path: web::Path<String>,
) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    let banner_id = path.into_inner();

    match state.banner_service.delete_banner(&banner_id).await {
        Ok(()) => {
            log::info!("Banner {} deleted by {}", banner_id, auth.email);
            HttpResponse::Ok().json(MessageResponse {
                message: "Banner deleted successfully".to_string(),
            })
        }
        Err(error) => handle_domain_error(&error),
    }
}
