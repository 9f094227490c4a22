use serde_json::json;

use super::*;
use crate::reducers::fixtures::{item, order, with_amount, with_items};
use crate::reducers::IndicatorColor;

fn config() -> MetricsConfig {
    MetricsConfig::default()
}

fn sample_dashboard() -> Dashboard {
    let orders = vec![
        with_items(with_amount(order(1), 100.0), vec![item("Widget", 2, 80.0)]),
        with_amount(order(2), 50.0),
    ];
    Dashboard::new(orders, config())
}

#[test]
fn available_metrics_report_success() {
    let dashboard = sample_dashboard();
    assert!(dashboard.is_available());
    assert_eq!(dashboard.orders().len(), 2);

    let revenue = dashboard.total_revenue();
    assert!(revenue.success);
    assert_eq!(revenue.data.total_usd_formatted, "$ 150.00");
    assert_eq!(revenue.data.total_brl_formatted, "R$ 750.00");

    let best = dashboard.best_selling_product();
    assert!(best.success);
    assert_eq!(best.data.product_name, "Widget");
}

#[test]
fn empty_source_reports_zero_defaults_with_success() {
    let dashboard = Dashboard::new(Vec::new(), config());
    let report = dashboard.report();

    assert!(report.total_orders.success);
    assert_eq!(report.total_orders.data.total_orders, 0);
    assert!(report.total_revenue.success);
    assert_eq!(report.total_revenue.data, TotalRevenue::zero(5.0));
    assert!(report.unique_customers.success);
    assert_eq!(report.financial_summary.data, FinancialSummary::default());
    assert_eq!(report.refund_rate.data.indicator_color, IndicatorColor::Green);
    assert!(report.delivery.success);
    assert_eq!(report.best_selling_product.data.product_name, "No products found");
    assert!(report.top_5_products.data.products.is_empty());
    assert!(report.top_10_cities.data.cities.is_empty());
    assert_eq!(report.upsell_analysis.data, UpsellAnalysis::default());
    assert_eq!(report.overview.data, Overview::default());
}

#[test]
fn unavailable_source_degrades_every_metric() {
    let dashboard = Dashboard::unavailable("timeout", config());
    assert!(!dashboard.is_available());
    assert!(dashboard.orders().is_empty());

    let report = dashboard.report();
    assert!(!report.overview.success);
    assert!(!report.total_orders.success);
    assert!(!report.total_revenue.success);
    assert!(!report.unique_customers.success);
    assert!(!report.financial_summary.success);
    assert!(!report.refund_rate.success);
    assert!(!report.delivery.success);
    assert!(!report.best_selling_product.success);
    assert!(!report.top_5_products.success);
    assert!(!report.top_10_cities.success);
    assert!(!report.upsell_analysis.success);

    assert_eq!(
        report.best_selling_product.data.product_name,
        "Error loading product"
    );
    let table = dashboard.orders_table(10, 1);
    assert!(!table.success);
    assert_eq!(table.data, OrdersTable::unavailable(10));
}

#[test]
fn from_source_maps_errors_to_unavailable() {
    let failed: Result<Vec<NormalizedOrder>, String> = Err("HTTP 503".to_owned());
    assert!(!Dashboard::from_source(failed, config()).is_available());

    let loaded: Result<Vec<NormalizedOrder>, String> = Ok(vec![order(1)]);
    assert!(Dashboard::from_source(loaded, config()).is_available());
}

#[test]
fn one_failing_metric_does_not_affect_others() {
    let orders = vec![with_amount(order(1), f64::MAX), with_amount(order(2), f64::MAX)];
    let dashboard = Dashboard::new(orders, config());

    let revenue = dashboard.total_revenue();
    assert!(!revenue.success);
    assert_eq!(revenue.data, TotalRevenue::zero(5.0));

    let count = dashboard.total_orders();
    assert!(count.success);
    assert_eq!(count.data.total_orders, 2);
}

#[test]
fn zero_page_size_degrades_table_only() {
    let dashboard = sample_dashboard();
    let table = dashboard.orders_table(0, 1);
    assert!(!table.success);
    assert!(table.data.orders.is_empty());
    assert!(dashboard.total_orders().success);
}

#[test]
fn configured_rate_and_skus_are_used() {
    let config = MetricsConfig {
        usd_brl_rate: 4.0,
        shipping_skus: vec!["WIDGET-SKU".to_owned()],
    };
    let mut placeholder = item("Boxed Widget", 9, 1.0);
    placeholder.sku = Some("WIDGET-SKU".to_owned());
    let orders = vec![with_items(
        with_amount(order(1), 10.0),
        vec![placeholder, item("Gadget", 1, 9.0)],
    )];
    let dashboard = Dashboard::new(orders, config);

    assert_eq!(dashboard.total_revenue().data.total_brl_formatted, "R$ 40.00");
    assert_eq!(dashboard.best_selling_product().data.product_name, "Gadget");
}

#[test]
fn response_flattens_metric_fields_next_to_success() {
    let body = serde_json::to_value(sample_dashboard().refund_rate()).unwrap();
    assert_eq!(
        body,
        json!({
            "refund_rate_percent": 0.0,
            "refunded_orders_count": 0,
            "total_orders_count": 2,
            "indicator_color": "green",
            "success": true
        })
    );
}

#[test]
fn table_body_nests_orders_and_pagination() {
    let body = serde_json::to_value(sample_dashboard().orders_table(1, 2)).unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["orders"][0]["id"], json!(2));
    assert_eq!(
        body["pagination"],
        json!({"current_page": 2, "per_page": 1, "total": 2, "last_page": 2})
    );
}
