//! Product catalog seam.
//!
//! The matcher only needs "the current list of products". Where that list comes
//! from (HTTP API, static defaults, a cache in front of either) is decided by the
//! implementations in `homewatt-catalog`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::Product;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog is not configured: {0}")]
    NotConfigured(String),
    #[error("request to `{endpoint}` failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("`{endpoint}` responded with HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode `{endpoint}` payload: {message}")]
    Decode { endpoint: String, message: String },
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Short label for logs and health output.
    fn name(&self) -> &'static str;

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}
