use actix_web::{web, HttpResponse};
use serde_json::json;

use ma_core::repositories::BannerRepository;
use ma_core::services::CollectionCatalog;

use crate::app::BannerState;

/// GET /health
///
/// Always 200; `database` reports whether the banner store answers.
pub async fn health_check<R, C>(state: web::Data<BannerState<R, C>>) -> HttpResponse
where
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    let database = if state.banner_service.database_connected().await {
        "connected"
    } else {
        "disconnected"
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "multiyo-admin-api",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
