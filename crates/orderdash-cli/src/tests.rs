use super::*;
use orderdash_core::{MetricsConfig, NormalizedOrder, OrderId};
use orderdash_metrics::Dashboard;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["orderdash"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_report_command() {
    let cli = Cli::try_parse_from(["orderdash", "report"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Report)));
}

#[test]
fn parses_metric_names_in_route_form() {
    for (arg, expected) in [
        ("total-revenue", MetricName::TotalRevenue),
        ("top-5-products", MetricName::Top5Products),
        ("top-10-cities", MetricName::Top10Cities),
        ("best-selling-product", MetricName::BestSellingProduct),
        ("overview", MetricName::Overview),
    ] {
        let cli = Cli::try_parse_from(["orderdash", "metric", arg]).expect("expected valid cli args");
        assert!(
            matches!(cli.command, Some(Commands::Metric { name }) if name == expected),
            "{arg} did not parse to {expected:?}"
        );
    }
}

#[test]
fn rejects_unknown_metric() {
    assert!(Cli::try_parse_from(["orderdash", "metric", "profit"]).is_err());
}

#[test]
fn table_defaults_to_first_page_of_ten() {
    let cli = Cli::try_parse_from(["orderdash", "table"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Table {
            page: 1,
            per_page: 10
        })
    ));
}

#[test]
fn table_accepts_page_options() {
    let cli = Cli::try_parse_from(["orderdash", "table", "--page", "3", "--per-page", "25"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Table {
            page: 3,
            per_page: 25
        })
    ));
}

#[test]
fn inspect_accepts_url_override() {
    let cli = Cli::try_parse_from(["orderdash", "inspect", "--url", "https://orders.example.com/x"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Inspect { url: Some(ref u) }) if u == "https://orders.example.com/x"
    ));
}

#[test]
fn metric_value_serializes_selected_metric() {
    let orders = vec![NormalizedOrder {
        id: Some(OrderId::Int(1)),
        ..NormalizedOrder::default()
    }];
    let dashboard = Dashboard::new(orders, MetricsConfig::default());
    let value = report::metric_value(&dashboard, MetricName::TotalOrders).expect("serialize");
    assert_eq!(value, serde_json::json!({"total_orders": 1, "success": true}));
}
