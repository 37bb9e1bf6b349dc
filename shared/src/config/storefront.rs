//! Shopify Storefront API configuration

use serde::{Deserialize, Serialize};

/// Storefront GraphQL endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontConfig {
    /// Shop domain, e.g. `my-shop.myshopify.com`
    pub domain: String,

    /// Storefront access token
    #[serde(skip_serializing)]
    pub access_token: String,

    /// API version segment of the endpoint path
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries after the first failed request
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            access_token: String::new(),
            api_version: default_api_version(),
            timeout_seconds: default_timeout(),
            retries: default_retries(),
        }
    }
}

impl StorefrontConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            domain: std::env::var("SHOPIFY_DOMAIN").unwrap_or_default(),
            access_token: std::env::var("SHOPIFY_STOREFRONT_TOKEN").unwrap_or_default(),
            api_version: std::env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| default_api_version()),
            ..Default::default()
        }
    }

    /// Whether domain and token are both present
    pub fn is_configured(&self) -> bool {
        !self.domain.trim().is_empty() && !self.access_token.trim().is_empty()
    }

    /// GraphQL endpoint URL
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.domain.trim_end_matches('/'),
            self.api_version
        )
    }
}

fn default_api_version() -> String {
    String::from("2024-01")
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    1
}
