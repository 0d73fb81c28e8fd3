use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use homewatt_core::{CatalogError, Product, ProductCatalog};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

pub const PRODUCTS_PATH: &str = "/api/products";
pub const PRODUCT_HISTORY_PATH: &str = "/api/dashboard/product-history";

/// Accepts both a bare array and the `{"products": [...]}` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsPayload {
    Bare(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

impl ProductsPayload {
    fn into_products(self) -> Vec<Product> {
        match self {
            Self::Bare(products) | Self::Wrapped { products } => products,
        }
    }
}

/// Catalog backed by the products API.
pub struct HttpProductCatalog {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
}

impl HttpProductCatalog {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        api_key: Option<SecretString>,
    ) -> Result<Self, CatalogError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CatalogError::NotConfigured("catalog base url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("homewatt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| CatalogError::NotConfigured(error.to_string()))?;

        Ok(Self { client, base_url, api_key })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<Product>, CatalogError> {
        let endpoint = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&endpoint);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request.send().await.map_err(|error| CatalogError::Transport {
            endpoint: endpoint.clone(),
            message: error.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(CatalogError::Status { endpoint, status: response.status().as_u16() });
        }

        let payload: ProductsPayload = response.json().await.map_err(|error| {
            CatalogError::Decode { endpoint: endpoint.clone(), message: error.to_string() }
        })?;
        let products = payload.into_products();

        debug!(endpoint = %endpoint, count = products.len(), "fetched catalog list");
        Ok(products)
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    fn name(&self) -> &'static str {
        "http"
    }

    /// Fetches products and product history concurrently. A single failing list is
    /// logged and skipped; only when both fail is an error returned.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let (products, history) =
            tokio::join!(self.fetch_list(PRODUCTS_PATH), self.fetch_list(PRODUCT_HISTORY_PATH));

        match (products, history) {
            (Ok(products), Ok(history)) => Ok(merge_products(products, history)),
            (Ok(products), Err(error)) | (Err(error), Ok(products)) => {
                warn!(
                    event_name = "catalog.http.partial_fetch",
                    error = %error,
                    "one catalog list failed; continuing with the other"
                );
                Ok(merge_products(products, Vec::new()))
            }
            (Err(error), Err(_)) => Err(error),
        }
    }
}

/// Products first, then history entries whose id has not been seen. Every entry is
/// normalized so downstream ranking can rely on non-negative amounts.
fn merge_products(products: Vec<Product>, history: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    products
        .into_iter()
        .chain(history)
        .filter(|product| seen.insert(product.id.clone()))
        .map(Product::normalized)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use homewatt_core::{CatalogError, Product, ProductCatalog};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::{merge_products, HttpProductCatalog};

    async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let address = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        format!("http://{address}")
    }

    fn catalog(base_url: &str) -> HttpProductCatalog {
        HttpProductCatalog::new(base_url, Duration::from_secs(5), None).expect("client builds")
    }

    #[tokio::test]
    async fn merges_products_and_history_without_duplicates() {
        let router = Router::new()
            .route(
                "/api/products",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Heat Pump", "category": "Heat Pumps",
                         "price": 5000, "annualSavings": 800},
                        {"id": "bulb", "name": "LED Bulb", "category": "Lighting & Fans",
                         "price": 4, "annualSavings": 3}
                    ]))
                }),
            )
            .route(
                "/api/dashboard/product-history",
                get(|| async {
                    Json(json!({"products": [
                        {"id": "1", "name": "Old Heat Pump", "category": "Heat Pumps",
                         "price": 4000, "annualSavings": 500},
                        {"id": "fridge", "name": "Fridge", "category": "Appliances",
                         "price": 1200, "annualSavings": null}
                    ]}))
                }),
            );
        let base_url = spawn(router).await;

        let products = catalog(&base_url).fetch_products().await.expect("fetch succeeds");

        let ids: Vec<&str> = products.iter().map(|product| product.id.0.as_str()).collect();
        assert_eq!(ids, vec!["1", "bulb", "fridge"]);
        assert_eq!(products[0].name, "Heat Pump");
        assert_eq!(products[2].annual_savings, 0.0);
        assert!(products[0].roi.is_some());
    }

    #[tokio::test]
    async fn history_failure_still_returns_products() {
        let router = Router::new()
            .route(
                "/api/products",
                get(|| async {
                    Json(json!([
                        {"id": "a", "name": "A", "category": "Appliances",
                         "price": 10, "annualSavings": 1}
                    ]))
                }),
            )
            .route(
                "/api/dashboard/product-history",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
        let base_url = spawn(router).await;

        let products = catalog(&base_url).fetch_products().await.expect("partial fetch succeeds");
        assert_eq!(products.len(), 1);
    }

    #[tokio::test]
    async fn both_lists_failing_reports_status_error() {
        let router = Router::new()
            .route("/api/products", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
            .route(
                "/api/dashboard/product-history",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            );
        let base_url = spawn(router).await;

        let error = catalog(&base_url).fetch_products().await.expect_err("fetch should fail");
        assert!(matches!(error, CatalogError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_error() {
        let router = Router::new()
            .route("/api/products", get(|| async { Json(json!({"unexpected": true})) }))
            .route("/api/dashboard/product-history", get(|| async { Json(json!("nope")) }));
        let base_url = spawn(router).await;

        let error = catalog(&base_url).fetch_products().await.expect_err("fetch should fail");
        assert!(matches!(error, CatalogError::Decode { .. }));
    }

    #[tokio::test]
    async fn sends_bearer_api_key_when_configured() {
        async fn guarded(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
            match headers.get("authorization").and_then(|value| value.to_str().ok()) {
                Some("Bearer catalog-key") => Ok(Json(json!([]))),
                _ => Err(StatusCode::UNAUTHORIZED),
            }
        }

        let router = Router::new()
            .route("/api/products", get(guarded))
            .route("/api/dashboard/product-history", get(guarded));
        let base_url = spawn(router).await;

        let keyed = HttpProductCatalog::new(
            &format!("{base_url}/"),
            Duration::from_secs(5),
            Some("catalog-key".to_string().into()),
        )
        .expect("client builds");

        assert_eq!(keyed.base_url(), base_url);
        assert!(keyed.fetch_products().await.expect("authorized fetch").is_empty());
        assert!(catalog(&base_url).fetch_products().await.is_err());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
        let address = listener.local_addr().expect("local addr");
        drop(listener);

        let error = HttpProductCatalog::new(
            &format!("http://{address}"),
            Duration::from_secs(1),
            None,
        )
        .expect("client builds")
        .fetch_products()
        .await
        .expect_err("nothing listens on the port");

        assert!(matches!(error, CatalogError::Transport { .. }));
    }

    #[test]
    fn blank_base_url_is_rejected() {
        assert!(matches!(
            HttpProductCatalog::new("  ", Duration::from_secs(1), None),
            Err(CatalogError::NotConfigured(_))
        ));
    }

    #[test]
    fn merge_prefers_products_over_history() {
        let merged = merge_products(
            vec![Product::new("x", "Current", "Appliances", -5.0, 10.0)],
            vec![Product::new("x", "Historic", "Appliances", 1.0, 1.0)],
        );

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Current");
        assert_eq!(merged[0].price, 0.0);
    }
}
