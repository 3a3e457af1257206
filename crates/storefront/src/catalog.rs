//! Product catalog client (external collaborator).
//!
//! The catalog is an uncontrolled third-party REST API (dummyjson-style
//! endpoints). Responses are cached for 5 minutes via `moka`. Fetch
//! failures are retryable: re-issuing the request is the recovery path
//! and never affects cart or order state.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use karvaan_core::ProductId;

use crate::config::CatalogConfig;

/// How long catalog responses stay cached.
const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("catalog returned HTTP {0}")]
    Status(u16),

    /// Response body could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with the given id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

impl CatalogError {
    /// Whether re-issuing the request is a sensible recovery.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status(_))
    }
}

/// A raw product record as returned by the catalog.
///
/// Only `id` is required; every other field may be absent and is
/// normalized to a documented default when the product enters the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub id: Option<ProductId>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub discount_percentage: Option<Decimal>,
    pub stock: Option<i64>,
}

/// A page of catalog products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPage {
    pub products: Vec<ProductRecord>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Clone)]
enum CacheValue {
    Page(ProductPage),
    Product(ProductRecord),
}

/// Client for the external product catalog.
///
/// Cheaply cloneable; responses are cached for [`CACHE_TTL`].
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
                cache,
            }),
        }
    }

    /// Fetch a page of products.
    ///
    /// # Errors
    ///
    /// Returns a retryable [`CatalogError`] if the catalog is unreachable
    /// or responds with a non-success status.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: u32, skip: u32) -> Result<ProductPage, CatalogError> {
        let key = format!("products:{limit}:{skip}");
        if let Some(CacheValue::Page(page)) = self.inner.cache.get(&key).await {
            tracing::debug!("catalog cache hit");
            return Ok(page);
        }

        let url = format!("{}/products?limit={limit}&skip={skip}", self.inner.base_url);
        let page: ProductPage = self.fetch(&url).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Page(page.clone()))
            .await;
        Ok(page)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown ids, otherwise a
    /// retryable [`CatalogError`].
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        let key = format!("product:{id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            tracing::debug!("catalog cache hit");
            return Ok(product);
        }

        let url = format!("{}/products/{id}", self.inner.base_url);
        let product: ProductRecord = match self.fetch(&url).await {
            Ok(product) => product,
            Err(CatalogError::Status(404)) => return Err(CatalogError::NotFound(id)),
            Err(e) => return Err(e),
        };

        self.inner
            .cache
            .insert(key, CacheValue::Product(product.clone()))
            .await;
        Ok(product)
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = %status, url, "catalog request failed");
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
