use async_trait::async_trait;
use homewatt_core::matching::builtin_catalog;
use homewatt_core::{CatalogError, Product, ProductCatalog};

/// In-memory catalog. `builtin()` serves the hand-authored default products.
#[derive(Clone, Debug)]
pub struct StaticProductCatalog {
    name: &'static str,
    products: Vec<Product>,
}

impl StaticProductCatalog {
    pub fn builtin() -> Self {
        Self { name: "builtin", products: builtin_catalog() }
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { name: "static", products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductCatalog for StaticProductCatalog {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use homewatt_core::{Product, ProductCatalog};

    use super::StaticProductCatalog;

    #[tokio::test]
    async fn builtin_catalog_covers_every_category() {
        let catalog = StaticProductCatalog::builtin();
        let products = catalog.fetch_products().await.expect("static fetch cannot fail");

        assert_eq!(products.len(), catalog.len());
        assert!(products.iter().any(|product| product.category == "Water Heaters"));
        assert!(products.iter().any(|product| product.category == "Smart Home"));
    }

    #[tokio::test]
    async fn from_products_serves_given_list() {
        let catalog = StaticProductCatalog::from_products(vec![Product::new(
            "p1",
            "Bulb",
            "Lighting & Fans",
            3.0,
            2.0,
        )]);

        let products = catalog.fetch_products().await.expect("static fetch cannot fail");
        assert_eq!(products.len(), 1);
        assert_eq!(catalog.name(), "static");
    }
}
