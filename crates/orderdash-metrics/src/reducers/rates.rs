use orderdash_core::NormalizedOrder;
use serde::Serialize;

use crate::format::percent;

const FULLY_FULFILLED: &str = "Fully Fulfilled";

/// Traffic-light colour of the refund rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorColor {
    #[default]
    Green,
    Yellow,
    Red,
}

impl IndicatorColor {
    /// Above 20 is red, above 10 is yellow, anything else green.
    #[must_use]
    pub fn for_rate(rate_percent: f64) -> Self {
        if rate_percent > 20.0 {
            Self::Red
        } else if rate_percent > 10.0 {
            Self::Yellow
        } else {
            Self::Green
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefundRate {
    pub refund_rate_percent: f64,
    pub refunded_orders_count: usize,
    pub total_orders_count: usize,
    pub indicator_color: IndicatorColor,
}

/// Share of orders with a refund record or a refunded line item.
#[must_use]
pub fn refund_rate(orders: &[NormalizedOrder]) -> RefundRate {
    let refunded = orders.iter().filter(|o| o.has_refund()).count();
    let rate = percent(refunded, orders.len());
    RefundRate {
        refund_rate_percent: rate,
        refunded_orders_count: refunded,
        total_orders_count: orders.len(),
        indicator_color: IndicatorColor::for_rate(rate),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeliveryMetrics {
    pub delivered_orders_count: usize,
    pub total_orders_count: usize,
    pub delivery_rate_percent: f64,
}

/// Share of orders whose fulfillment status is exactly `"Fully Fulfilled"`.
#[must_use]
pub fn delivery_metrics(orders: &[NormalizedOrder]) -> DeliveryMetrics {
    let delivered = orders
        .iter()
        .filter(|o| o.fulfillment_status.as_deref() == Some(FULLY_FULFILLED))
        .count();
    DeliveryMetrics {
        delivered_orders_count: delivered,
        total_orders_count: orders.len(),
        delivery_rate_percent: percent(delivered, orders.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::fixtures::{approx, item, order, with_items, with_refund};

    fn fulfilled(id: i64, status: &str) -> NormalizedOrder {
        let mut o = order(id);
        o.fulfillment_status = Some(status.to_owned());
        o
    }

    #[test]
    fn indicator_tiers() {
        assert_eq!(IndicatorColor::for_rate(5.0), IndicatorColor::Green);
        assert_eq!(IndicatorColor::for_rate(10.0), IndicatorColor::Green);
        assert_eq!(IndicatorColor::for_rate(15.0), IndicatorColor::Yellow);
        assert_eq!(IndicatorColor::for_rate(20.0), IndicatorColor::Yellow);
        assert_eq!(IndicatorColor::for_rate(25.0), IndicatorColor::Red);
    }

    #[test]
    fn indicator_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(IndicatorColor::Yellow).unwrap(),
            serde_json::json!("yellow")
        );
    }

    #[test]
    fn refund_rate_midpoint_rounds_up() {
        let orders: Vec<_> = (1..=160)
            .map(|id| if id <= 23 { with_refund(order(id), 1.0) } else { order(id) })
            .collect();
        let metric = refund_rate(&orders);
        assert_eq!(metric.refunded_orders_count, 23);
        assert!(approx(metric.refund_rate_percent, 14.38));
        assert_eq!(metric.indicator_color, IndicatorColor::Yellow);
    }

    #[test]
    fn refund_records_and_refunded_items_both_count() {
        let mut refunded_item = item("Widget", 1, 10.0);
        refunded_item.is_refunded = true;
        let orders = vec![
            with_refund(order(1), 5.0),
            with_items(order(2), vec![refunded_item]),
            with_items(order(3), vec![item("Widget", 1, 10.0)]),
            order(4),
        ];
        let metric = refund_rate(&orders);
        assert_eq!(metric.refunded_orders_count, 2);
        assert_eq!(metric.total_orders_count, 4);
        assert!(approx(metric.refund_rate_percent, 50.0));
        assert_eq!(metric.indicator_color, IndicatorColor::Red);
    }

    #[test]
    fn refund_rate_is_rounded() {
        let orders = vec![with_refund(order(1), 1.0), order(2), order(3)];
        let metric = refund_rate(&orders);
        assert!(approx(metric.refund_rate_percent, 33.33));
    }

    #[test]
    fn empty_input_is_green_zero() {
        assert_eq!(refund_rate(&[]), RefundRate::default());
        assert_eq!(delivery_metrics(&[]), DeliveryMetrics::default());
    }

    #[test]
    fn delivery_requires_exact_status() {
        let orders = vec![
            fulfilled(1, "Fully Fulfilled"),
            fulfilled(2, "fully fulfilled"),
            fulfilled(3, "Partially Fulfilled"),
            order(4),
        ];
        let metric = delivery_metrics(&orders);
        assert_eq!(metric.delivered_orders_count, 1);
        assert_eq!(metric.total_orders_count, 4);
        assert!(approx(metric.delivery_rate_percent, 25.0));
    }
}
