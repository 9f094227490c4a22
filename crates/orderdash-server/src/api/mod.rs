mod metrics;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use orderdash_core::AppConfig;
use orderdash_metrics::Dashboard;
use orderdash_source::OrderSourceClient;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OrderSourceClient>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

pub(super) fn respond<T: Serialize>(req_id: RequestId, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Fetches and normalizes the source once for this request. A failed fetch
/// still yields a dashboard, whose metrics all report defaults.
pub(super) async fn load_dashboard(state: &AppState) -> Dashboard {
    let loaded = state.client.fetch_normalized(&state.config).await;
    Dashboard::from_source(loaded, state.config.metrics.clone())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

fn metrics_router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/metrics", get(metrics::overview))
        .route("/api/v1/metrics/total-orders", get(metrics::total_orders))
        .route("/api/v1/metrics/total-revenue", get(metrics::total_revenue))
        .route(
            "/api/v1/metrics/unique-customers",
            get(metrics::unique_customers),
        )
        .route(
            "/api/v1/metrics/financial-summary",
            get(metrics::financial_summary),
        )
        .route("/api/v1/metrics/refund-rate", get(metrics::refund_rate))
        .route(
            "/api/v1/metrics/best-selling-product",
            get(metrics::best_selling_product),
        )
        .route(
            "/api/v1/metrics/top-5-products",
            get(metrics::top_5_products),
        )
        .route("/api/v1/metrics/top-10-cities", get(metrics::top_10_cities))
        .route(
            "/api/v1/metrics/upsell-analysis",
            get(metrics::upsell_analysis),
        )
        .route("/api/v1/metrics/delivery", get(metrics::delivery))
        .route("/api/v1/metrics/orders-table", get(metrics::orders_table))
}

pub fn build_app(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(metrics_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> Json<ApiResponse<HealthData>> {
    respond(req_id, HealthData { status: "ok" })
}

#[cfg(test)]
#[path = "../api_test.rs"]
mod tests;
