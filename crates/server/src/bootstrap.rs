use std::sync::Arc;

use homewatt_catalog::catalog_from_config;
use homewatt_core::config::{AppConfig, ConfigError};
use homewatt_core::{
    CatalogError, MatchService, ProductCatalog, ProductMatcher, RecommendationFilter,
};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub catalog: Arc<dyn ProductCatalog>,
    pub service: MatchService,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("product catalog setup failed: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = catalog_from_config(&config.catalog)?;
    let service = MatchService::new(Arc::clone(&catalog))
        .with_matcher(ProductMatcher::with_max_products(config.matching.max_products))
        .with_filter(RecommendationFilter::with_fallback_count(config.matching.fallback_count));

    info!(
        event_name = "system.bootstrap.catalog_ready",
        correlation_id = "bootstrap",
        catalog = catalog.name(),
        max_products = config.matching.max_products,
        fallback_count = config.matching.fallback_count,
        "match service initialized"
    );

    Ok(Application { config, catalog, service })
}

#[cfg(test)]
mod tests {
    use homewatt_core::config::AppConfig;
    use homewatt_core::Recommendation;

    use crate::bootstrap::bootstrap_with_config;

    #[tokio::test]
    async fn bootstrap_without_catalog_url_uses_builtin_products() {
        let app = bootstrap_with_config(AppConfig::default()).expect("bootstrap should succeed");

        assert_eq!(app.catalog.name(), "builtin");
        let matches = app
            .service
            .match_recommendations(
                vec![Recommendation::new("1", "Install a smart thermostat", "smart_thermostat")],
                None,
            )
            .await
            .expect("matching should succeed");

        assert!(!matches[0].used_defaults);
        assert!(!matches[0].products.is_empty());
    }

    #[tokio::test]
    async fn configured_limits_reach_the_match_service() {
        let mut config = AppConfig::default();
        config.matching.max_products = 1;
        let app = bootstrap_with_config(config).expect("bootstrap should succeed");

        let matches = app
            .service
            .match_recommendations(vec![Recommendation::new("1", "Upgrade HVAC", "hvac")], None)
            .await
            .expect("matching should succeed");

        assert_eq!(matches[0].products.len(), 1);
    }

    #[test]
    fn invalid_catalog_url_is_reported_as_catalog_error() {
        let mut config = AppConfig::default();
        config.catalog.base_url = Some("   ".to_string());

        let message = bootstrap_with_config(config).err().map(|error| error.to_string());
        assert!(message.is_some_and(|message| message.contains("product catalog setup failed")));
    }
}
