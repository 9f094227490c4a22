//! Command handlers. Each loads the source once, then prints JSON to stdout;
//! logs go to stderr so the output stays pipeable.

use orderdash_core::AppConfig;
use orderdash_metrics::Dashboard;
use orderdash_source::{summarize_document, FetchOptions, OrderSourceClient};
use serde::Serialize;

use crate::MetricName;

async fn load_dashboard(config: &AppConfig) -> anyhow::Result<Dashboard> {
    let client = OrderSourceClient::from_app_config(config)?;
    let loaded = client.fetch_normalized(config).await;
    Ok(Dashboard::from_source(loaded, config.metrics.clone()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) async fn run_report(config: &AppConfig) -> anyhow::Result<()> {
    let dashboard = load_dashboard(config).await?;
    if !dashboard.is_available() {
        tracing::warn!(source = %config.source_url, "source unavailable; report holds defaults");
    }
    print_json(&dashboard.report())
}

pub(crate) async fn run_metric(config: &AppConfig, name: MetricName) -> anyhow::Result<()> {
    let dashboard = load_dashboard(config).await?;
    print_json(&metric_value(&dashboard, name)?)
}

/// Serializes the one metric `name` refers to.
pub(crate) fn metric_value(
    dashboard: &Dashboard,
    name: MetricName,
) -> serde_json::Result<serde_json::Value> {
    match name {
        MetricName::Overview => serde_json::to_value(dashboard.overview()),
        MetricName::TotalOrders => serde_json::to_value(dashboard.total_orders()),
        MetricName::TotalRevenue => serde_json::to_value(dashboard.total_revenue()),
        MetricName::UniqueCustomers => serde_json::to_value(dashboard.unique_customers()),
        MetricName::FinancialSummary => serde_json::to_value(dashboard.financial_summary()),
        MetricName::RefundRate => serde_json::to_value(dashboard.refund_rate()),
        MetricName::Delivery => serde_json::to_value(dashboard.delivery()),
        MetricName::BestSellingProduct => serde_json::to_value(dashboard.best_selling_product()),
        MetricName::Top5Products => serde_json::to_value(dashboard.top_5_products()),
        MetricName::Top10Cities => serde_json::to_value(dashboard.top_10_cities()),
        MetricName::UpsellAnalysis => serde_json::to_value(dashboard.upsell_analysis()),
    }
}

pub(crate) async fn run_table(
    config: &AppConfig,
    page: usize,
    per_page: usize,
) -> anyhow::Result<()> {
    let dashboard = load_dashboard(config).await?;
    print_json(&dashboard.orders_table(per_page, page))
}

/// Unlike the metric commands, a failed fetch is an error here: there is no
/// document to describe.
pub(crate) async fn run_inspect(config: &AppConfig, url: Option<&str>) -> anyhow::Result<()> {
    let client = OrderSourceClient::from_app_config(config)?;
    let url = url.unwrap_or(&config.source_url);
    let document = client
        .fetch(url, &FetchOptions::from_app_config(config))
        .await?;
    let summary = summarize_document(&document);
    tracing::info!(shape = ?summary.shape, orders = summary.extracted_count, "inspected document");
    print_json(&summary)
}
