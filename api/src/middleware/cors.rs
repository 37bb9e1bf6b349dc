//! CORS configuration for the admin front end.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ma_shared::config::{CorsConfig, Environment};

/// Build the CORS middleware
///
/// Configured origins are always honoured. With no origins configured,
/// development allows any origin and production allows none.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() {
        if environment.is_production() {
            log::warn!("ALLOWED_ORIGINS is empty, cross-origin requests will be refused");
        } else {
            log::info!("Configuring permissive CORS for {}", environment);
            cors = cors.allow_any_origin();
        }
        return cors;
    }

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }
    cors
}
