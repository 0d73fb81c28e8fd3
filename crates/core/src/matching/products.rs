//! Product selection for a single recommendation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::defaults::default_products;
use super::{CategoryMapper, PreferenceMatcher, DEFAULT_MAX_PRODUCTS};
use crate::domain::category::CategoryMapping;
use crate::domain::is_missing_amount;
use crate::domain::product::Product;
use crate::domain::recommendation::Recommendation;

/// A recommendation with its derived category and the products picked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecommendationMatch {
    pub recommendation: Recommendation,
    pub mapping: CategoryMapping,
    pub products: Vec<Product>,
    /// True when no catalog product fit and the hand-authored defaults were used.
    pub used_defaults: bool,
}

#[derive(Debug, Clone)]
pub struct ProductMatcher {
    max_products: usize,
}

impl ProductMatcher {
    pub fn new() -> Self {
        Self { max_products: DEFAULT_MAX_PRODUCTS }
    }

    /// Caps the number of products per recommendation. Zero is treated as one.
    pub fn with_max_products(max_products: usize) -> Self {
        Self { max_products: max_products.max(1) }
    }

    pub fn max_products(&self) -> usize {
        self.max_products
    }

    /// Picks products for `recommendation` and backfills its missing financial
    /// fields from the picked products.
    pub fn match_products(
        &self,
        recommendation: &mut Recommendation,
        catalog: &[Product],
        budget: Option<f64>,
    ) -> ProductRecommendationMatch {
        let mapping = CategoryMapper::map(&recommendation.kind, Some(&recommendation.title));
        let mut products = self.select(&mapping, catalog, budget);

        let used_defaults = products.is_empty();
        if used_defaults {
            debug!(
                recommendation_id = %recommendation.id.0,
                main_category = %mapping.main_category,
                "no catalog product matched; using default products"
            );
            products = default_products(&mapping.main_category);
            products.truncate(self.max_products);
        }

        backfill_financials(recommendation, &products);

        ProductRecommendationMatch {
            recommendation: recommendation.clone(),
            mapping,
            products,
            used_defaults,
        }
    }

    /// Catalog products in the mapped category and within budget, best ROI first.
    pub fn select(
        &self,
        mapping: &CategoryMapping,
        catalog: &[Product],
        budget: Option<f64>,
    ) -> Vec<Product> {
        let mut selected: Vec<Product> = catalog
            .iter()
            .filter(|product| category_matches(mapping, &product.category))
            .filter(|product| budget.map_or(true, |limit| product.price <= limit))
            .cloned()
            .collect();

        selected.sort_by(|a, b| {
            b.effective_roi().partial_cmp(&a.effective_roi()).unwrap_or(Ordering::Equal)
        });
        selected.truncate(self.max_products);
        selected
    }
}

impl Default for ProductMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn category_matches(mapping: &CategoryMapping, product_category: &str) -> bool {
    if mapping.is_general() {
        return false;
    }

    PreferenceMatcher::matches(&mapping.sub_category, product_category)
        || PreferenceMatcher::matches(&mapping.main_category, product_category)
}

/// Fills absent or zero financial fields with averages over `products`.
/// Fields that already carry a value are never overwritten.
fn backfill_financials(recommendation: &mut Recommendation, products: &[Product]) {
    if products.is_empty() || !recommendation.needs_financials() {
        return;
    }

    let count = products.len() as f64;
    let average_savings =
        products.iter().map(|product| product.annual_savings).sum::<f64>() / count;
    let average_price = products.iter().map(|product| product.price).sum::<f64>() / count;

    if is_missing_amount(recommendation.estimated_savings) {
        recommendation.estimated_savings = Some(average_savings);
    }
    if is_missing_amount(recommendation.estimated_cost) {
        recommendation.estimated_cost = Some(average_price);
    }
    if is_missing_amount(recommendation.implementation_cost) {
        recommendation.implementation_cost = Some(average_price);
    }
    if is_missing_amount(recommendation.payback_period) {
        let savings = recommendation.estimated_savings.unwrap_or(0.0);
        let cost = recommendation.estimated_cost.unwrap_or(0.0);
        if savings > 0.0 {
            recommendation.payback_period = Some(cost / savings);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProductMatcher;
    use crate::domain::category::CategoryMapping;
    use crate::domain::product::Product;
    use crate::domain::recommendation::Recommendation;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("hp-1", "Basic Heat Pump", "Heat Pumps", 4_000.0, 400.0),
            Product::new("hp-2", "Premium Heat Pump", "Heat Pumps", 8_000.0, 1_600.0),
            Product::new("hp-3", "Mid Heat Pump", "Heating & Cooling", 5_000.0, 750.0),
            Product::new("hp-4", "Ducted Heat Pump", "Heating & Cooling", 6_000.0, 600.0),
            Product::new("led-1", "LED Bulb", "Lighting & Fans", 5.0, 4.0),
        ]
    }

    #[test]
    fn ranks_by_roi_and_caps_at_three() {
        let matcher = ProductMatcher::new();
        let mut recommendation = Recommendation::new("r1", "Install a heat pump", "heat_pump");

        let matched = matcher.match_products(&mut recommendation, &catalog(), None);

        let ids: Vec<&str> = matched.products.iter().map(|product| product.id.0.as_str()).collect();
        assert_eq!(ids, vec!["hp-2", "hp-3", "hp-1"]);
        assert!(!matched.used_defaults);
        assert_eq!(matched.mapping, CategoryMapping::new("Heating & Cooling", "Heat Pumps"));
    }

    #[test]
    fn never_returns_more_than_three_products() {
        let matcher = ProductMatcher::new();
        let big_catalog: Vec<Product> = (0..20)
            .map(|index| {
                Product::new(format!("led-{index}"), "LED", "Lighting & Fans", 10.0, index as f64)
            })
            .collect();

        for kind in ["lighting", "hvac", "solar", "unknown", "appliances"] {
            let mut recommendation = Recommendation::new("r", "Recommendation", kind);
            let matched = matcher.match_products(&mut recommendation, &big_catalog, None);
            assert!(matched.products.len() <= 3, "type `{kind}` returned too many products");
        }
    }

    #[test]
    fn budget_excludes_expensive_products() {
        let matcher = ProductMatcher::new();
        let mut recommendation = Recommendation::new("r1", "Install a heat pump", "heat_pump");

        let matched = matcher.match_products(&mut recommendation, &catalog(), Some(5_000.0));

        let ids: Vec<&str> = matched.products.iter().map(|product| product.id.0.as_str()).collect();
        assert_eq!(ids, vec!["hp-3", "hp-1"]);
    }

    #[test]
    fn empty_match_falls_back_to_category_defaults() {
        let matcher = ProductMatcher::new();
        let mut recommendation = Recommendation::new("r1", "Add attic insulation", "insulation");

        let matched = matcher.match_products(&mut recommendation, &catalog(), None);

        assert!(matched.used_defaults);
        assert!(!matched.products.is_empty());
        assert!(matched.products.len() <= 3);
        assert!(matched.products.iter().all(|product| product.category == "Building Products"));
    }

    #[test]
    fn backfills_missing_financials_with_averages() {
        let matcher = ProductMatcher::new();
        let mut recommendation = Recommendation::new("r1", "Install a heat pump", "heat_pump")
            .with_estimated_savings(0.0);

        matcher.match_products(&mut recommendation, &catalog(), Some(5_000.0));

        // hp-3 (5000 / 750) and hp-1 (4000 / 400)
        assert_eq!(recommendation.estimated_savings, Some(575.0));
        assert_eq!(recommendation.estimated_cost, Some(4_500.0));
        assert_eq!(recommendation.implementation_cost, Some(4_500.0));
        let payback = recommendation.payback_period.expect("payback should be derived");
        assert!((payback - 4_500.0 / 575.0).abs() < 1e-9);
    }

    #[test]
    fn backfill_keeps_existing_values() {
        let matcher = ProductMatcher::new();
        let mut recommendation = Recommendation::new("r1", "Install a heat pump", "heat_pump")
            .with_estimated_savings(1_000.0)
            .with_estimated_cost(2_000.0);

        let matched = matcher.match_products(&mut recommendation, &catalog(), None);

        assert_eq!(recommendation.estimated_savings, Some(1_000.0));
        assert_eq!(recommendation.estimated_cost, Some(2_000.0));
        assert_eq!(recommendation.payback_period, Some(2.0));
        assert_eq!(matched.recommendation, recommendation);
    }

    #[test]
    fn max_products_is_configurable() {
        let matcher = ProductMatcher::with_max_products(1);
        let mut recommendation = Recommendation::new("r1", "Install a heat pump", "heat_pump");

        let matched = matcher.match_products(&mut recommendation, &catalog(), None);

        assert_eq!(matched.products.len(), 1);
        assert_eq!(matched.products[0].id.0, "hp-2");
    }
}
