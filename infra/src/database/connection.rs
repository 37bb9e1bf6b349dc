//! Database connection pool management

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use ma_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Banner table, created on startup when missing
const CREATE_BANNERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS banners (
        id CHAR(36) NOT NULL PRIMARY KEY,
        image_data MEDIUMTEXT NOT NULL,
        image_type VARCHAR(10) NOT NULL,
        collection_id VARCHAR(255) NOT NULL,
        collection_title VARCHAR(255) NOT NULL,
        collection_handle VARCHAR(255) NULL,
        created_at DATETIME(6) NOT NULL,
        updated_at DATETIME(6) NOT NULL,
        INDEX idx_banners_created_at (created_at)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// MySQL connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect a new pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(1800))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create database pool");
                InfrastructureError::Database(e)
            })?;

        tracing::info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Build a pool that connects on first use
    ///
    /// Lets a development server start while MySQL is down; health checks
    /// report the store as disconnected until it comes up.
    pub fn new_lazy(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect_lazy_with(connect_options);

        Ok(Self { pool })
    }

    /// Underlying SQLx pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create the banner table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        sqlx::query(CREATE_BANNERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create banners table");
                InfrastructureError::Database(e)
            })?;
        tracing::info!("Banner schema ready");
        Ok(())
    }

    /// Close all connections; call on shutdown
    pub async fn close(&self) {
        tracing::info!("Closing database connection pool");
        self.pool.close().await;
    }
}
