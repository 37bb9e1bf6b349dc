use actix_multipart::{Field, Multipart, MultipartError};
use chrono::{DateTime, Utc};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use ma_core::domain::entities::{Banner, ImageUpload};
use ma_core::errors::{DomainError, ValidationError};

/// Longest accepted `collectionId` form value
const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// Multipart form posted by the admin panel's upload and replace dialogs
///
/// The image arrives in the `banner` file part and the target collection
/// in the `collectionId` text part. Other parts are drained and ignored.
#[derive(Debug, Default)]
pub struct BannerForm {
    pub image: Vec<u8>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub collection_id: Option<String>,
}

impl BannerForm {
    /// Read the form, refusing images over `max_image_bytes` without
    /// buffering the rest of the file
    pub async fn read(mut payload: Multipart, max_image_bytes: usize) -> Result<Self, DomainError> {
        let mut form = BannerForm::default();

        while let Some(field) = payload.next().await {
            let mut field = field.map_err(malformed)?;
            let disposition = field.content_disposition();
            let name = disposition.get_name().unwrap_or_default().to_string();
            let file_name = disposition.get_filename().map(str::to_string);

            match name.as_str() {
                "banner" => {
                    form.file_name = file_name;
                    form.content_type = field.content_type().map(|mime| mime.to_string());
                    form.image = read_field(
                        &mut field,
                        max_image_bytes,
                        ValidationError::FileTooLarge {
                            max_bytes: max_image_bytes,
                        },
                    )
                    .await?;
                }
                "collectionId" => {
                    let invalid = || ValidationError::InvalidFormat {
                        field: "collectionId".to_string(),
                    };
                    let bytes = read_field(&mut field, MAX_TEXT_FIELD_BYTES, invalid()).await?;
                    form.collection_id = Some(String::from_utf8(bytes).map_err(|_| invalid())?);
                }
                _ => {
                    while let Some(chunk) = field.next().await {
                        chunk.map_err(malformed)?;
                    }
                }
            }
        }

        Ok(form)
    }

    /// View of the uploaded file for the banner service
    pub fn upload(&self) -> ImageUpload<'_> {
        ImageUpload::new(&self.image)
            .with_file_name(self.file_name.as_deref())
            .with_content_type(self.content_type.as_deref())
    }
}

async fn read_field(
    field: &mut Field,
    limit: usize,
    too_large: ValidationError,
) -> Result<Vec<u8>, DomainError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if data.len() + chunk.len() > limit {
            return Err(too_large.into());
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn malformed(error: MultipartError) -> DomainError {
    log::warn!("Rejected banner form: {}", error);
    ValidationError::InvalidFormat {
        field: "multipart form".to_string(),
    }
    .into()
}

/// Banner as returned to the admin panel
///
/// The raw base64 payload is only exposed inside `imageUrl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub image_url: String,
    pub image_type: String,
    pub collection_id: String,
    pub collection_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_handle: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Banner> for BannerDto {
    fn from(banner: &Banner) -> Self {
        Self {
            id: banner.id.to_string(),
            image_url: banner.image_url(),
            image_type: banner.image_type.to_string(),
            collection_id: banner.collection_id.clone(),
            collection_title: banner.collection_title.clone(),
            collection_handle: banner.collection_handle.clone(),
            created_at: banner.created_at,
            updated_at: banner.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerListResponse {
    pub banners: Vec<BannerDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    pub message: String,
    pub banner: BannerDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
