use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(#[serde(deserialize_with = "super::deserialize_identifier")] pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// Catalog entry as served by the products API or the built-in default lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub annual_savings: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payback_period: Option<f64>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        annual_savings: f64,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category: category.into(),
            price,
            annual_savings,
            roi: None,
            payback_period: None,
            features: Vec::new(),
        }
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// ROI as published, or `annual_savings / price` when the catalog omits it.
    pub fn effective_roi(&self) -> f64 {
        match self.roi {
            Some(roi) if roi.is_finite() => roi,
            _ if self.price > 0.0 => self.annual_savings / self.price,
            _ => 0.0,
        }
    }

    /// Payback in years, or `price / annual_savings` when the catalog omits it.
    pub fn effective_payback_period(&self) -> Option<f64> {
        match self.payback_period {
            Some(years) if years.is_finite() => Some(years),
            _ if self.annual_savings > 0.0 => Some(self.price / self.annual_savings),
            _ => None,
        }
    }

    /// Clamps negative amounts to zero and fills in derived ROI/payback figures.
    pub fn normalized(mut self) -> Self {
        self.price = non_negative(self.price);
        self.annual_savings = non_negative(self.annual_savings);
        self.roi = Some(self.effective_roi());
        self.payback_period = self.effective_payback_period();
        self
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::Product;

    #[test]
    fn derives_roi_and_payback_when_catalog_omits_them() {
        let product = Product::new("p1", "Heat Pump", "Heating & Cooling", 4_000.0, 800.0);

        assert!((product.effective_roi() - 0.2).abs() < f64::EPSILON);
        assert_eq!(product.effective_payback_period(), Some(5.0));
    }

    #[test]
    fn published_roi_wins_over_derived_value() {
        let mut product = Product::new("p1", "Heat Pump", "Heating & Cooling", 4_000.0, 800.0);
        product.roi = Some(0.35);

        assert_eq!(product.effective_roi(), 0.35);
    }

    #[test]
    fn normalized_clamps_negative_amounts() {
        let product = Product::new("p1", "Broken", "Appliances", -10.0, -5.0).normalized();

        assert_eq!(product.price, 0.0);
        assert_eq!(product.annual_savings, 0.0);
        assert_eq!(product.roi, Some(0.0));
        assert_eq!(product.payback_period, None);
    }

    #[test]
    fn deserializes_numeric_ids_and_null_amounts() {
        let product: Product = serde_json::from_str(
            r#"{"id": 42, "name": "LED Bulb", "category": "Lighting & Fans",
                "price": null, "annualSavings": 12.5}"#,
        )
        .expect("product payload should deserialize");

        assert_eq!(product.id.0, "42");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.annual_savings, 12.5);
        assert!(product.features.is_empty());
    }
}
