//! JSON API over the match service.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use homewatt_core::{
    ApplicationError, FilterOutcome, InterfaceError, MatchService, ProductRecommendationMatch,
    Recommendation,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct ApiState {
    service: MatchService,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub budget: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
    pub correlation_id: String,
}

pub fn router(service: MatchService) -> Router {
    Router::new()
        .route("/api/recommendations/match", post(match_recommendations))
        .route("/api/recommendations/filter", post(filter_recommendations))
        .with_state(ApiState { service })
}

pub async fn match_recommendations(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<MatchRequest>,
) -> Result<Json<Vec<ProductRecommendationMatch>>, (StatusCode, Json<ApiError>)> {
    let correlation_id = correlation_id(&headers);
    let count = request.recommendations.len();

    let matches = state
        .service
        .match_recommendations(request.recommendations, request.budget)
        .await
        .map_err(|error| {
            interface_error(ApplicationError::from(error).into_interface(correlation_id.clone()))
        })?;

    info!(
        event_name = "api.recommendations.match",
        correlation_id = %correlation_id,
        recommendations = count,
        "recommendations matched"
    );
    Ok(Json(matches))
}

pub async fn filter_recommendations(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<FilterRequest>,
) -> Json<FilterOutcome> {
    let correlation_id = correlation_id(&headers);
    let outcome =
        state.service.filter_recommendations(&request.recommendations, &request.preferences);

    info!(
        event_name = "api.recommendations.filter",
        correlation_id = %correlation_id,
        input = request.recommendations.len(),
        selected = outcome.recommendations.len(),
        tier = ?outcome.tier,
        "recommendations filtered"
    );
    Json(outcome)
}

fn correlation_id(headers: &HeaderMap) -> String {
    headers
        .get(CORRELATION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

fn interface_error(error: InterfaceError) -> (StatusCode, Json<ApiError>) {
    let (status, kind, message) = match &error {
        InterfaceError::BadRequest { message, .. } => {
            (StatusCode::BAD_REQUEST, "bad_request", message.clone())
        }
        InterfaceError::ServiceUnavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "service_unavailable",
            error.user_message().to_string(),
        ),
        InterfaceError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal", error.user_message().to_string())
        }
    };

    warn!(
        event_name = "api.request.rejected",
        correlation_id = %error.correlation_id(),
        error = %error,
        "request rejected"
    );
    (
        status,
        Json(ApiError { error: kind, message, correlation_id: error.correlation_id().to_string() }),
    )
}
