use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

use ma_api::{config, create_app, AuthState, BannerState};
use ma_core::domain::value_objects::AdminAllowList;
use ma_core::services::{
    BannerService, BannerServiceConfig, NotificationChannel, OtpService, OtpServiceConfig,
    OtpStore, TokenService, TokenServiceConfig,
};
use ma_infra::{
    DatabasePool, EmailChannel, InMemoryOtpStore, MySqlBannerRepository, StorefrontClient,
};
use ma_shared::config::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::init_logging(Environment::from_env());

    let config = config::load()?;
    info!("Starting MultiYO admin API ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET_KEY is not set, using the development secret");
    }

    // Login flow
    let token_service = Arc::new(
        TokenService::new(TokenServiceConfig::from(&config.auth.jwt))
            .context("invalid JWT configuration")?,
    );
    let allow_list = AdminAllowList::from_config(&config.auth.admins);
    info!("Loaded {} admin email(s)", allow_list.len());

    let channel = EmailChannel::from_config(
        &config.smtp,
        config.environment,
        config.auth.otp.expiration_minutes,
    )?;
    info!("Email provider: {}", channel.provider_name());

    let otp_service = Arc::new(OtpService::new(
        Arc::new(InMemoryOtpStore::new()),
        Arc::new(channel),
        allow_list,
        OtpServiceConfig::from(&config.auth.otp),
    ));
    spawn_purge_task(
        Arc::clone(&otp_service),
        Duration::from_secs(config.auth.otp.purge_interval_seconds.max(1)),
    );

    // Banners
    let pool = match DatabasePool::new(&config.database).await {
        Ok(pool) => {
            pool.ensure_schema().await?;
            pool
        }
        Err(e) if !config.environment.is_production() => {
            error!("Database unavailable, banner endpoints will fail: {}", e);
            DatabasePool::new_lazy(&config.database)?
        }
        Err(e) => return Err(e).context("failed to connect to the banner database"),
    };
    let banner_service = Arc::new(BannerService::new(
        Arc::new(MySqlBannerRepository::new(pool.pool().clone())),
        Arc::new(StorefrontClient::new(config.storefront.clone())?),
        BannerServiceConfig::default(),
    ));

    let auth_state = web::Data::new(AuthState {
        otp_service,
        token_service,
    });
    let banner_state = web::Data::new(BannerState { banner_service });

    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    info!("Server will bind to: {}", bind_address);

    let app_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(auth_state.clone(), banner_state.clone(), &app_config)
    });
    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// Periodically drop expired codes so abandoned logins do not pile up
fn spawn_purge_task<S, N>(otp_service: Arc<OtpService<S, N>>, every: Duration)
where
    S: OtpStore + 'static,
    N: NotificationChannel + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            if let Err(e) = otp_service.purge_expired().await {
                warn!("Failed to purge expired codes: {}", e);
            }
        }
    });
}
