//! In-memory collaborators for the HTTP integration tests

#![allow(dead_code)]

use actix_web::web;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use ma_api::{AuthState, BannerState};
use ma_core::domain::entities::{Banner, Collection};
use ma_core::domain::value_objects::AdminAllowList;
use ma_core::errors::DomainError;
use ma_core::repositories::BannerRepository;
use ma_core::services::{
    BannerService, BannerServiceConfig, CollectionCatalog, NotificationChannel, OtpService,
    OtpServiceConfig, TokenService, TokenServiceConfig,
};
use ma_infra::InMemoryOtpStore;

pub const ADMIN: &str = "admin@x.com";

/// Channel that keeps every code it is asked to send
#[derive(Default)]
pub struct Inbox {
    sent: Mutex<Vec<(String, String)>>,
}

impl Inbox {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    /// Codes go out on a background task; poll until one arrives
    pub async fn wait_for_code(&self, email: &str) -> Option<String> {
        for _ in 0..200 {
            if let Some(code) = self.last_code_for(email) {
                return Some(code);
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        None
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationChannel for Inbox {
    async fn send_code(&self, email: &str, code: &str) -> Result<String, String> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(format!("inbox-{}", self.count()))
    }
}

#[derive(Default)]
pub struct MemoryBanners {
    banners: Mutex<HashMap<Uuid, Banner>>,
}

#[async_trait]
impl BannerRepository for MemoryBanners {
    async fn list(&self) -> Result<Vec<Banner>, DomainError> {
        let mut banners: Vec<Banner> = self.banners.lock().unwrap().values().cloned().collect();
        banners.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(banners)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Banner>, DomainError> {
        Ok(self.banners.lock().unwrap().get(&id).cloned())
    }

    async fn insert(&self, banner: &Banner) -> Result<(), DomainError> {
        self.banners
            .lock()
            .unwrap()
            .insert(banner.id, banner.clone());
        Ok(())
    }

    async fn update(&self, banner: &Banner) -> Result<bool, DomainError> {
        let mut banners = self.banners.lock().unwrap();
        match banners.get_mut(&banner.id) {
            Some(existing) => {
                *existing = banner.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.banners.lock().unwrap().remove(&id).is_some())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

pub struct StaticCatalog {
    collections: Vec<Collection>,
    available: bool,
}

impl StaticCatalog {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            collections,
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            collections: Vec::new(),
            available: false,
        }
    }
}

#[async_trait]
impl CollectionCatalog for StaticCatalog {
    async fn list_collections(&self) -> Result<Vec<Collection>, String> {
        if self.available {
            Ok(self.collections.clone())
        } else {
            Err("storefront unreachable".to_string())
        }
    }
}

pub fn collection(id: &str, title: &str, handle: &str) -> Collection {
    Collection {
        id: id.to_string(),
        title: title.to_string(),
        handle: handle.to_string(),
        description: String::new(),
        image: None,
        product_count: 3,
    }
}

const BOUNDARY: &str = "----multiyo-form-boundary";

/// Banner file part: (file name, content type, bytes)
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

/// `multipart/form-data` body shaped like the admin panel's `FormData`
///
/// Returns the `Content-Type` header value and the encoded body.
pub fn banner_form(file: Option<FilePart<'_>>, collection_id: Option<&str>) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"banner\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(collection_id) = collection_id {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"collectionId\"\r\n\r\n{}\r\n",
                BOUNDARY, collection_id
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}

pub type TestAuthState = AuthState<InMemoryOtpStore, Inbox>;
pub type TestBannerState = BannerState<MemoryBanners, StaticCatalog>;

pub struct TestContext {
    pub auth: web::Data<TestAuthState>,
    pub banners: web::Data<TestBannerState>,
    pub inbox: Arc<Inbox>,
}

impl TestContext {
    pub fn new(catalog: StaticCatalog) -> Self {
        Self::with_otp_config(catalog, OtpServiceConfig::default())
    }

    pub fn with_otp_config(catalog: StaticCatalog, otp_config: OtpServiceConfig) -> Self {
        let inbox = Arc::new(Inbox::default());
        let otp_service = OtpService::new(
            Arc::new(InMemoryOtpStore::new()),
            Arc::clone(&inbox),
            AdminAllowList::new([ADMIN]),
            otp_config,
        );
        let token_service = TokenService::new(TokenServiceConfig {
            jwt_secret: "api-test-secret".to_string(),
            ..Default::default()
        })
        .unwrap();
        let banner_service = BannerService::new(
            Arc::new(MemoryBanners::default()),
            Arc::new(catalog),
            BannerServiceConfig::default(),
        );

        Self {
            auth: web::Data::new(AuthState {
                otp_service: Arc::new(otp_service),
                token_service: Arc::new(token_service),
            }),
            banners: web::Data::new(BannerState {
                banner_service: Arc::new(banner_service),
            }),
            inbox,
        }
    }

    pub fn bearer(&self) -> String {
        let session = self.auth.token_service.issue(ADMIN).unwrap();
        format!("Bearer {}", session.token)
    }
}
