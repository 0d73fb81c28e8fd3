//! Product catalog implementations for the matcher.

mod builtin;
mod cache;
mod http;

use std::sync::Arc;
use std::time::Duration;

use homewatt_core::config::CatalogConfig;
use homewatt_core::{CatalogError, ProductCatalog};
use tracing::info;

pub use builtin::StaticProductCatalog;
pub use cache::CachedProductCatalog;
pub use http::{HttpProductCatalog, PRODUCTS_PATH, PRODUCT_HISTORY_PATH};

/// Builds the catalog described by `config`: a cached HTTP catalog when a base
/// URL is configured, otherwise the built-in product list.
pub fn catalog_from_config(
    config: &CatalogConfig,
) -> Result<Arc<dyn ProductCatalog>, CatalogError> {
    match config.base_url.as_deref() {
        Some(base_url) => {
            let http = HttpProductCatalog::new(
                base_url,
                Duration::from_secs(config.timeout_secs),
                config.api_key.clone(),
            )?;
            info!(
                event_name = "catalog.http.configured",
                base_url = %http.base_url(),
                cache_ttl_secs = config.cache_ttl_secs,
                "using remote product catalog"
            );
            let ttl = Duration::from_secs(config.cache_ttl_secs);
            Ok(Arc::new(CachedProductCatalog::new(http, ttl)))
        }
        None => {
            info!(event_name = "catalog.builtin.configured", "using built-in product catalog");
            Ok(Arc::new(StaticProductCatalog::builtin()))
        }
    }
}

#[cfg(test)]
mod tests {
    use homewatt_core::config::AppConfig;

    use super::catalog_from_config;

    #[test]
    fn unconfigured_catalog_uses_builtin_products() {
        let config = AppConfig::default();
        let catalog = catalog_from_config(&config.catalog).expect("catalog should build");
        assert_eq!(catalog.name(), "builtin");
    }

    #[test]
    fn configured_base_url_builds_cached_http_catalog() {
        let mut config = AppConfig::default();
        config.catalog.base_url = Some("http://127.0.0.1:9".to_string());

        let catalog = catalog_from_config(&config.catalog).expect("catalog should build");
        assert_eq!(catalog.name(), "http");
    }
}
