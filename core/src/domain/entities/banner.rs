//! Banner entity: a promotional image linked to a storefront collection.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::collection::Collection;

/// Largest accepted image (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted banner image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Png,
    Jpeg,
    Jpg,
    Gif,
    Webp,
}

impl ImageType {
    /// Comma separated list for error messages
    pub const ALLOWED: &'static str = "png, jpg, jpeg, gif, webp";

    /// Subtype used in storage and in data URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpeg => "jpeg",
            ImageType::Jpg => "jpg",
            ImageType::Gif => "gif",
            ImageType::Webp => "webp",
        }
    }

    /// Parses a `Content-Type` value such as `image/png; charset=binary`
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next()?.trim().to_lowercase();
        let subtype = essence.strip_prefix("image/")?;
        subtype.parse().ok()
    }

    /// Type named by a file extension, e.g. `summer.JPG`
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;
        extension.parse().ok()
    }
}

/// Image file as received from the admin panel
#[derive(Debug, Clone, Copy)]
pub struct ImageUpload<'a> {
    pub bytes: &'a [u8],
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
}

impl<'a> ImageUpload<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            file_name: None,
            content_type: None,
        }
    }

    pub fn with_file_name(mut self, file_name: Option<&'a str>) -> Self {
        self.file_name = file_name;
        self
    }

    pub fn with_content_type(mut self, content_type: Option<&'a str>) -> Self {
        self.content_type = content_type;
        self
    }

    /// Image type from the file extension
    ///
    /// The declared content type is only consulted when the file name has
    /// no extension.
    pub fn image_type(&self) -> Option<ImageType> {
        match self.file_name.filter(|name| name.contains('.')) {
            Some(name) => ImageType::from_file_name(name),
            None => self.content_type.and_then(ImageType::from_mime),
        }
    }
}

impl FromStr for ImageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ImageType::Png),
            "jpeg" => Ok(ImageType::Jpeg),
            "jpg" => Ok(ImageType::Jpg),
            "gif" => Ok(ImageType::Gif),
            "webp" => Ok(ImageType::Webp),
            other => Err(format!("Unsupported image type: {}", other)),
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: Uuid,

    /// Base64 image payload
    pub image_data: String,

    pub image_type: ImageType,

    pub collection_id: String,
    pub collection_title: String,
    pub collection_handle: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Banner {
    /// Creates a banner for raw image bytes
    ///
    /// `collection` is `None` when the storefront does not know
    /// `collection_id`; the id then doubles as the title.
    pub fn new(
        image: &[u8],
        image_type: ImageType,
        collection_id: &str,
        collection: Option<&Collection>,
    ) -> Self {
        let now = Utc::now();
        let (collection_title, collection_handle) = match collection {
            Some(c) => (c.title.clone(), Some(c.handle.clone())),
            None => (collection_id.to_string(), None),
        };

        Self {
            id: Uuid::new_v4(),
            image_data: STANDARD.encode(image),
            image_type,
            collection_id: collection_id.to_string(),
            collection_title,
            collection_handle,
            created_at: now,
            updated_at: now,
        }
    }

    /// Swaps the image and collection link, keeping `id` and `created_at`
    pub fn replace(&mut self, image: &[u8], image_type: ImageType, collection: &Collection) {
        self.image_data = STANDARD.encode(image);
        self.image_type = image_type;
        self.collection_id = collection.id.clone();
        self.collection_title = collection.title.clone();
        self.collection_handle = Some(collection.handle.clone());
        self.updated_at = Utc::now();
    }

    /// `data:` URL that renders the image directly in a browser
    pub fn image_url(&self) -> String {
        format!("data:image/{};base64,{}", self.image_type, self.image_data)
    }
}
