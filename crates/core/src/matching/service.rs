//! Async entry point: one catalog fetch, then matching for every recommendation.

use std::sync::Arc;

use tracing::{info, warn};

use super::{FilterOutcome, ProductMatcher, ProductRecommendationMatch, RecommendationFilter};
use crate::catalog::ProductCatalog;
use crate::domain::product::Product;
use crate::domain::recommendation::Recommendation;
use crate::errors::DomainError;

#[derive(Clone)]
pub struct MatchService {
    catalog: Arc<dyn ProductCatalog>,
    matcher: ProductMatcher,
    filter: RecommendationFilter,
}

impl MatchService {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog, matcher: ProductMatcher::new(), filter: RecommendationFilter::new() }
    }

    pub fn with_matcher(mut self, matcher: ProductMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_filter(mut self, filter: RecommendationFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn catalog_name(&self) -> &'static str {
        self.catalog.name()
    }

    /// Fetches the catalog, swallowing failures into an empty list so matching
    /// degrades to the default product lists instead of failing.
    pub async fn load_catalog(&self) -> Vec<Product> {
        match self.catalog.fetch_products().await {
            Ok(products) => products,
            Err(error) => {
                warn!(
                    event_name = "matching.catalog.fetch_failed",
                    catalog = self.catalog.name(),
                    error = %error,
                    "product catalog unavailable; falling back to default products"
                );
                Vec::new()
            }
        }
    }

    pub async fn match_recommendations(
        &self,
        mut recommendations: Vec<Recommendation>,
        budget: Option<f64>,
    ) -> Result<Vec<ProductRecommendationMatch>, DomainError> {
        let budget = validate_budget(budget)?;
        let catalog = self.load_catalog().await;

        let matches: Vec<ProductRecommendationMatch> = recommendations
            .iter_mut()
            .map(|recommendation| self.matcher.match_products(recommendation, &catalog, budget))
            .collect();

        info!(
            event_name = "matching.recommendations.matched",
            catalog = self.catalog.name(),
            catalog_size = catalog.len(),
            recommendations = matches.len(),
            defaulted = matches.iter().filter(|matched| matched.used_defaults).count(),
            "matched recommendations to products"
        );

        Ok(matches)
    }

    pub fn filter_recommendations(
        &self,
        recommendations: &[Recommendation],
        preferences: &[String],
    ) -> FilterOutcome {
        self.filter.filter(recommendations, preferences)
    }
}

pub fn validate_budget(budget: Option<f64>) -> Result<Option<f64>, DomainError> {
    match budget {
        Some(value) if !value.is_finite() || value < 0.0 => Err(DomainError::InvalidBudget(value)),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::{validate_budget, MatchService};
    use crate::catalog::{CatalogError, ProductCatalog};
    use crate::domain::product::Product;
    use crate::domain::recommendation::Recommendation;
    use crate::errors::DomainError;
    use crate::matching::{MatchTier, ProductMatcher};

    struct FixedCatalog(Vec<Product>);

    #[async_trait]
    impl ProductCatalog for FixedCatalog {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl ProductCatalog for FailingCatalog {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Transport {
                endpoint: "/api/products".to_owned(),
                message: "connection refused".to_owned(),
            })
        }
    }

    fn leds() -> Vec<Recommendation> {
        vec![Recommendation::new("1", "Switch to LEDs", "lighting")]
    }

    fn fixed_service() -> MatchService {
        MatchService::new(Arc::new(FixedCatalog(vec![
            Product::new("bulb", "LED Bulb", "Lighting & Fans", 5.0, 6.0),
            Product::new("strip", "LED Strip", "Light Bulbs", 20.0, 8.0),
        ])))
    }

    #[tokio::test]
    async fn matches_each_recommendation_against_one_catalog_fetch() {
        let service = fixed_service();
        let matches = service
            .match_recommendations(
                vec![
                    Recommendation::new("1", "Switch to LEDs", "lighting"),
                    Recommendation::new("2", "Insulate attic", "insulation"),
                ],
                None,
            )
            .await
            .expect("matching should succeed");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].products[0].id.0, "bulb");
        assert!(!matches[0].used_defaults);
        assert!(matches[1].used_defaults);
        assert_eq!(matches[0].recommendation.estimated_savings, Some(7.0));
    }

    #[tokio::test]
    async fn catalog_failure_degrades_to_defaults() {
        let service = MatchService::new(Arc::new(FailingCatalog));

        assert!(service.load_catalog().await.is_empty());

        let matches = service
            .match_recommendations(leds(), None)
            .await
            .expect("catalog failures must not propagate");

        assert!(matches[0].used_defaults);
        assert!(!matches[0].products.is_empty());
    }

    #[tokio::test]
    async fn rejects_negative_budget() {
        let service = fixed_service();
        let result = service
            .match_recommendations(leds(), Some(-1.0))
            .await;

        assert_eq!(result, Err(DomainError::InvalidBudget(-1.0)));
    }

    #[tokio::test]
    async fn honours_configured_matcher() {
        let service = fixed_service().with_matcher(ProductMatcher::with_max_products(1));
        let matches = service
            .match_recommendations(leds(), None)
            .await
            .expect("matching should succeed");

        assert_eq!(matches[0].products.len(), 1);
    }

    #[test]
    fn filter_delegates_to_recommendation_filter() {
        let service = fixed_service();
        let outcome = service.filter_recommendations(
            &[Recommendation::new("1", "Switch to LEDs", "lighting")],
            &["lighting".to_owned()],
        );

        assert_eq!(outcome.tier, MatchTier::Exact);
    }

    #[test]
    fn budget_validation() {
        assert_eq!(validate_budget(None), Ok(None));
        assert_eq!(validate_budget(Some(0.0)), Ok(Some(0.0)));
        assert!(validate_budget(Some(f64::NAN)).is_err());
    }
}
