//! Shopify Storefront GraphQL client

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use ma_core::domain::entities::collection::{Collection, CollectionImage};
use ma_core::services::banner::CollectionCatalog;
use ma_shared::config::StorefrontConfig;

use crate::InfrastructureError;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// First 50 collections with up to 250 product ids each, for counting
pub const COLLECTIONS_QUERY: &str = r#"
{
  collections(first: 50) {
    edges {
      node {
        id
        title
        handle
        description
        image {
          url
          altText
        }
        products(first: 250) {
          edges {
            node {
              id
            }
          }
        }
      }
    }
  }
}
"#;

/// Storefront API client
pub struct StorefrontClient {
    http: reqwest::Client,
    config: StorefrontConfig,
}

impl StorefrontClient {
    pub fn new(config: StorefrontConfig) -> Result<Self, InfrastructureError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        if !config.is_configured() {
            warn!("Storefront credentials missing, collection requests will fail");
        }

        Ok(Self { http, config })
    }

    /// Fetch all collections, retrying once on transport or HTTP status errors
    pub async fn fetch_collections(&self) -> Result<Vec<Collection>, InfrastructureError> {
        if !self.config.is_configured() {
            return Err(InfrastructureError::Config(
                "Missing storefront credentials. Set SHOPIFY_DOMAIN and SHOPIFY_STOREFRONT_TOKEN"
                    .to_string(),
            ));
        }

        let max_attempts = self.config.retries + 1;
        let mut attempt = 0;

        let body = loop {
            attempt += 1;
            match self.post_query().await {
                Ok(body) => break body,
                Err(e) if attempt < max_attempts => {
                    warn!(
                        attempt = attempt,
                        error = %e,
                        "Storefront request failed, retrying"
                    );
                }
                Err(e) => {
                    error!(attempt = attempt, error = %e, "Storefront request failed");
                    return Err(e);
                }
            }
        };

        let collections = parse_collections(&body)?;
        info!(count = collections.len(), "Fetched storefront collections");
        Ok(collections)
    }

    async fn post_query(&self) -> Result<Value, InfrastructureError> {
        debug!(endpoint = %self.config.endpoint(), "Posting collections query");
        let response = self
            .http
            .post(self.config.endpoint())
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .json(&json!({ "query": COLLECTIONS_QUERY }))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}

/// Map a GraphQL response body to collections
///
/// A non-empty `errors` array fails the whole response. Missing optional
/// fields default: empty description, no image, zero products.
pub fn parse_collections(body: &Value) -> Result<Vec<Collection>, InfrastructureError> {
    if let Some(errors) = body.get("errors") {
        let has_errors = errors.as_array().map_or(true, |list| !list.is_empty());
        if has_errors {
            error!(errors = %errors, "Storefront API returned errors");
            return Err(InfrastructureError::Storefront(errors.to_string()));
        }
    }

    let edges = body
        .pointer("/data/collections/edges")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    edges
        .iter()
        .map(|edge| {
            let node = edge.get("node").ok_or_else(|| {
                InfrastructureError::Storefront("Collection edge without node".to_string())
            })?;
            parse_node(node)
        })
        .collect()
}

fn parse_node(node: &Value) -> Result<Collection, InfrastructureError> {
    let field = |name: &str| {
        node.get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                InfrastructureError::Storefront(format!("Collection is missing `{}`", name))
            })
    };

    let image = node
        .get("image")
        .filter(|image| !image.is_null())
        .and_then(|image| {
            let url = image.get("url").and_then(Value::as_str)?;
            Some(CollectionImage {
                url: url.to_string(),
                alt_text: image
                    .get("altText")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        });

    let product_count = node
        .pointer("/products/edges")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    Ok(Collection {
        id: field("id")?,
        title: field("title")?,
        handle: field("handle")?,
        description: node
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image,
        product_count,
    })
}

#[async_trait]
impl CollectionCatalog for StorefrontClient {
    async fn list_collections(&self) -> Result<Vec<Collection>, String> {
        self.fetch_collections().await.map_err(|e| e.to_string())
    }
}
