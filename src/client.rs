//! Catalog Fetch Client - REST Access to the Product Store
//!
//! The storefront core consumes the store API read-only. Failures map onto a
//! small taxonomy the view layer renders from; no raw transport fault crosses
//! that boundary.

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

use crate::products::Product;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The requested product is absent from the store (HTTP 404).
    #[error("Product not found")]
    NotFound,

    /// The store answered with a non-success status other than 404.
    #[error("Failed to fetch product")]
    Upstream { status: u16 },

    /// Connection, body, or decode failure.
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Message shown to the shopper.
    ///
    /// Transport details surface when present; an empty detail falls back to
    /// the generic line.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::NotFound => "Product not found".to_string(),
            FetchError::Upstream { .. } => "Failed to fetch product".to_string(),
            FetchError::Transport(detail) if detail.is_empty() => {
                "Failed to load product".to_string()
            }
            FetchError::Transport(detail) => detail.clone(),
        }
    }
}

/// Read-only access to the product store.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Product list for the gallery, in stored order.
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Single product by id.
    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError>;
}

/// reqwest-backed client for the storefront REST API.
pub struct HttpCatalogClient {
    http: reqwest::Client,
    api_base: String,
}

impl HttpCatalogClient {
    /// Build a client for an API base such as "http://localhost:3000/api".
    pub fn new(api_base: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("forgestore-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(format!("HTTP client error: {e}")))?;
        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Upstream {
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ProductSource for HttpCatalogClient {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json(format!("{}/products", self.api_base)).await
    }

    #[instrument(skip(self))]
    async fn fetch_product(&self, id: &str) -> Result<Product, FetchError> {
        self.get_json(format!("{}/products/{}", self.api_base, id))
            .await
    }
}
