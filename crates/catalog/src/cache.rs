use std::time::{Duration, Instant};

use async_trait::async_trait;
use homewatt_core::{CatalogError, Product, ProductCatalog};
use tokio::sync::RwLock;
use tracing::debug;

struct CacheEntry {
    products: Vec<Product>,
    fetched_at: Instant,
}

/// Keeps the last non-empty catalog result for `ttl`. Empty results and errors are
/// passed through without being cached, so the next call retries the inner catalog.
pub struct CachedProductCatalog<C> {
    inner: C,
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl<C> CachedProductCatalog<C>
where
    C: ProductCatalog,
{
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self { inner, ttl, entry: RwLock::new(None) }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    async fn cached(&self) -> Option<Vec<Product>> {
        let guard = self.entry.read().await;
        guard
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.products.clone())
    }
}

#[async_trait]
impl<C> ProductCatalog for CachedProductCatalog<C>
where
    C: ProductCatalog,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.cached().await {
            debug!(catalog = self.inner.name(), count = products.len(), "catalog cache hit");
            return Ok(products);
        }

        let products = self.inner.fetch_products().await?;
        if !products.is_empty() {
            *self.entry.write().await =
                Some(CacheEntry { products: products.clone(), fetched_at: Instant::now() });
        }
        Ok(products)
    }
}
