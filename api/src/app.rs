//! Application state and factory

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use std::sync::Arc;

use ma_core::repositories::BannerRepository;
use ma_core::services::{
    BannerService, CollectionCatalog, NotificationChannel, OtpService, OtpStore, TokenService,
};
use ma_shared::config::AppConfig;
use ma_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, banners, collections, health};

/// Services behind the login endpoints
pub struct AuthState<S: OtpStore, N: NotificationChannel> {
    pub otp_service: Arc<OtpService<S, N>>,
    pub token_service: Arc<TokenService>,
}

/// Services behind the banner and collection endpoints
pub struct BannerState<R: BannerRepository, C: CollectionCatalog> {
    pub banner_service: Arc<BannerService<R, C>>,
}

/// Create and configure the application with all dependencies
pub fn create_app<S, N, R, C>(
    auth_state: web::Data<AuthState<S, N>>,
    banner_state: web::Data<BannerState<R, C>>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    N: NotificationChannel + 'static,
    R: BannerRepository + 'static,
    C: CollectionCatalog + 'static,
{
    let jwt = JwtAuth::new(Arc::clone(&auth_state.token_service));

    App::new()
        .app_data(auth_state)
        .app_data(banner_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .wrap(create_cors(&config.cors, config.environment))
        .route("/health", web::get().to(health::health_check::<R, C>))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/request-otp", web::post().to(auth::request_otp::<S, N>))
                        .route("/verify-otp", web::post().to(auth::verify_otp::<S, N>))
                        .route("/verify-token", web::post().to(auth::verify_token::<S, N>)),
                )
                .service(
                    web::scope("/collections")
                        .wrap(jwt.clone())
                        .route("", web::get().to(collections::list_collections::<R, C>)),
                )
                .service(
                    web::scope("/banners")
                        .wrap(jwt)
                        .route("", web::get().to(banners::list_banners::<R, C>))
                        .route("/upload", web::post().to(banners::upload_banner::<R, C>))
                        .route("/{id}/replace", web::put().to(banners::replace_banner::<R, C>))
                        .route("/{id}", web::delete().to(banners::delete_banner::<R, C>)),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
