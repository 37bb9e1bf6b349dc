//! MySQL implementation of the BannerRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use ma_core::domain::entities::banner::{Banner, ImageType};
use ma_core::errors::DomainError;
use ma_core::repositories::BannerRepository;

const BANNER_COLUMNS: &str = "id, image_data, image_type, collection_id, collection_title, \
                              collection_handle, created_at, updated_at";

/// MySQL implementation of BannerRepository
pub struct MySqlBannerRepository {
    pool: MySqlPool,
}

impl MySqlBannerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_banner(row: &MySqlRow) -> Result<Banner, DomainError> {
        let id: String = row.try_get("id").map_err(column_error("id"))?;
        let image_type: String = row.try_get("image_type").map_err(column_error("image_type"))?;

        Ok(Banner {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid banner UUID: {}", e),
            })?,
            image_data: row.try_get("image_data").map_err(column_error("image_data"))?,
            image_type: image_type
                .parse::<ImageType>()
                .map_err(|message| DomainError::Internal { message })?,
            collection_id: row
                .try_get("collection_id")
                .map_err(column_error("collection_id"))?,
            collection_title: row
                .try_get("collection_title")
                .map_err(column_error("collection_title"))?,
            collection_handle: row
                .try_get("collection_handle")
                .map_err(column_error("collection_handle"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, action = action, "Banner query failed");
        DomainError::Internal {
            message: format!("Failed to {}: {}", action, e),
        }
    }
}

#[async_trait]
impl BannerRepository for MySqlBannerRepository {
    async fn list(&self) -> Result<Vec<Banner>, DomainError> {
        let query = format!(
            "SELECT {} FROM banners ORDER BY created_at DESC",
            BANNER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("list banners"))?;

        rows.iter().map(Self::row_to_banner).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, DomainError> {
        let query = format!("SELECT {} FROM banners WHERE id = ?", BANNER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error("find banner"))?;

        row.as_ref().map(Self::row_to_banner).transpose()
    }

    async fn insert(&self, banner: &Banner) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO banners (
                id, image_data, image_type, collection_id, collection_title,
                collection_handle, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(banner.id.to_string())
            .bind(&banner.image_data)
            .bind(banner.image_type.as_str())
            .bind(&banner.collection_id)
            .bind(&banner.collection_title)
            .bind(&banner.collection_handle)
            .bind(banner.created_at)
            .bind(banner.updated_at)
            .execute(&self.pool)
            .await
            .map_err(query_error("save banner"))?;

        Ok(())
    }

    async fn update(&self, banner: &Banner) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE banners
            SET image_data = ?, image_type = ?, collection_id = ?, collection_title = ?,
                collection_handle = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&banner.image_data)
            .bind(banner.image_type.as_str())
            .bind(&banner.collection_id)
            .bind(&banner.collection_title)
            .bind(&banner.collection_handle)
            .bind(banner.updated_at)
            .bind(banner.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("update banner"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM banners WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_error("delete banner"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
