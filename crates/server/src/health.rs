use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use homewatt_core::ProductCatalog;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    catalog: Arc<dyn ProductCatalog>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub catalog: HealthCheck,
    pub checked_at: String,
}

pub fn router(catalog: Arc<dyn ProductCatalog>) -> Router {
    Router::new().route("/health", get(health)).with_state(HealthState { catalog })
}

/// Always answers 200: an unreachable catalog only degrades matching to the
/// default product lists, so the service keeps accepting requests.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let catalog = catalog_check(state.catalog.as_ref()).await;
    let ready = catalog.status == "ready";

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: "ready",
            detail: "homewatt-server runtime initialized".to_string(),
        },
        catalog,
        checked_at: Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(payload))
}

async fn catalog_check(catalog: &dyn ProductCatalog) -> HealthCheck {
    match catalog.fetch_products().await {
        Ok(products) => HealthCheck {
            status: "ready",
            detail: format!("{} catalog returned {} products", catalog.name(), products.len()),
        },
        Err(error) => HealthCheck {
            status: "degraded",
            detail: format!(
                "{} catalog unavailable, default products in use: {error}",
                catalog.name()
            ),
        },
    }
}
