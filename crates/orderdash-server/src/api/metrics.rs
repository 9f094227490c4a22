use axum::{
    extract::{Query, State},
    Extension, Json,
};
use orderdash_metrics::{
    BestSellingProduct, DeliveryMetrics, FinancialSummary, MetricResponse, OrdersTable, Overview,
    RefundRate, TopCities, TopProducts, TotalOrders, TotalRevenue, UniqueCustomers,
    UpsellAnalysis,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{load_dashboard, respond, ApiResponse, AppState};

const DEFAULT_PER_PAGE: usize = 10;
const DEFAULT_PAGE: usize = 1;

type MetricJson<T> = Json<ApiResponse<MetricResponse<T>>>;

pub(super) async fn overview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<Overview> {
    respond(req_id, load_dashboard(&state).await.overview())
}

pub(super) async fn total_orders(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<TotalOrders> {
    respond(req_id, load_dashboard(&state).await.total_orders())
}

pub(super) async fn total_revenue(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<TotalRevenue> {
    respond(req_id, load_dashboard(&state).await.total_revenue())
}

pub(super) async fn unique_customers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<UniqueCustomers> {
    respond(req_id, load_dashboard(&state).await.unique_customers())
}

pub(super) async fn financial_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<FinancialSummary> {
    respond(req_id, load_dashboard(&state).await.financial_summary())
}

pub(super) async fn refund_rate(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<RefundRate> {
    respond(req_id, load_dashboard(&state).await.refund_rate())
}

pub(super) async fn best_selling_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<BestSellingProduct> {
    respond(req_id, load_dashboard(&state).await.best_selling_product())
}

pub(super) async fn top_5_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<TopProducts> {
    respond(req_id, load_dashboard(&state).await.top_5_products())
}

pub(super) async fn top_10_cities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<TopCities> {
    respond(req_id, load_dashboard(&state).await.top_10_cities())
}

pub(super) async fn upsell_analysis(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<UpsellAnalysis> {
    respond(req_id, load_dashboard(&state).await.upsell_analysis())
}

pub(super) async fn delivery(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> MetricJson<DeliveryMetrics> {
    respond(req_id, load_dashboard(&state).await.delivery())
}

/// Paging values arrive as raw text so that a negative or garbled number
/// reaches the reducer as an out-of-range page instead of a 400.
#[derive(Debug, Deserialize)]
pub(super) struct OrdersTableQuery {
    #[serde(alias = "perPage")]
    pub per_page: Option<String>,
    pub page: Option<String>,
}

/// Missing or non-numeric values take `default`; negatives clamp to `0`,
/// which the table treats as an empty page (`page`) or an invalid size
/// (`per_page`).
fn paging_value(raw: Option<&str>, default: usize) -> usize {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(value)) => usize::try_from(value).unwrap_or(0),
        Some(Err(_)) | None => default,
    }
}

pub(super) async fn orders_table(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<OrdersTableQuery>,
) -> MetricJson<OrdersTable> {
    let per_page = paging_value(query.per_page.as_deref(), DEFAULT_PER_PAGE);
    let page = paging_value(query.page.as_deref(), DEFAULT_PAGE);
    respond(
        req_id,
        load_dashboard(&state).await.orders_table(per_page, page),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_value_defaults_when_absent_or_garbled() {
        assert_eq!(paging_value(None, 10), 10);
        assert_eq!(paging_value(Some("abc"), 1), 1);
        assert_eq!(paging_value(Some(""), 1), 1);
    }

    #[test]
    fn paging_value_clamps_negatives_to_zero() {
        assert_eq!(paging_value(Some("-1"), 1), 0);
        assert_eq!(paging_value(Some("-5"), 10), 0);
        assert_eq!(paging_value(Some(" 3 "), 1), 3);
    }
}
