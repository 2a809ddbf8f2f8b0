//! HTTP surface for rendering clients.

use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::domain::aggregates::{PriceResolver, PriceView, ProductListing, SortOrder};
use crate::domain::value_objects::PriceRange;
use crate::ProductPriceInput;

#[derive(Clone)]
pub struct AppState { pub resolver: Arc<PriceResolver> }

impl AppState {
    pub fn new(resolver: PriceResolver) -> Self { Self { resolver: Arc::new(resolver) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-pricing"})) }))
        .route("/api/v1/pricing/resolve", post(resolve))
        .route("/api/v1/pricing/resolve-batch", post(resolve_batch))
        .with_state(state)
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(rejection: JsonRejection) -> ApiError {
    tracing::warn!(error = %rejection.body_text(), "rejected pricing request");
    (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": rejection.body_text()})))
}

async fn resolve(State(s): State<AppState>, payload: Result<Json<Value>, JsonRejection>) -> Result<Json<PriceView>, ApiError> {
    let Json(raw) = payload.map_err(bad_request)?;
    Ok(Json(s.resolver.view(&ProductPriceInput::from_value(raw))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    #[serde(default)]
    pub products: Vec<Value>,
    pub sort: Option<SortOrder>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> { pub data: Vec<T>, pub total: usize }

async fn resolve_batch(State(s): State<AppState>, payload: Result<Json<BatchRequest>, JsonRejection>) -> Result<Json<ListResponse<PriceView>>, ApiError> {
    let Json(r) = payload.map_err(bad_request)?;
    let products = r.products.into_iter().map(ProductPriceInput::from_value).collect();
    let mut listing = ProductListing::price(&s.resolver, products);
    listing.filter(PriceRange::new(r.min_price, r.max_price));
    if let Some(order) = r.sort { listing.sort(order); }
    Ok(Json(ListResponse { total: listing.len(), data: listing.views() }))
}
