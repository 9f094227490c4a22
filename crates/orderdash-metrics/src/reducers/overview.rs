use std::collections::{BTreeMap, HashSet};

use orderdash_core::NormalizedOrder;
use serde::Serialize;
use serde_json::Value;

use super::{ensure_finite, id_value, ratio};
use crate::error::MetricsError;

const SAMPLE_SIZE: usize = 3;
const NO_STATUS: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleOrder {
    pub id: Value,
    pub email: Option<String>,
    pub total_price_original: String,
    pub total_price_float: f64,
    pub status: String,
}

/// Dashboard headline figures, based on `total_price` rather than the local
/// currency amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_orders: usize,
    pub total_revenue: f64,
    /// Distinct non-null account emails.
    pub unique_customers: usize,
    pub average_order_value: f64,
    pub orders_by_status: BTreeMap<String, usize>,
    pub sample_data: Vec<SampleOrder>,
}

/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when the revenue sum overflows.
pub fn overview(orders: &[NormalizedOrder]) -> Result<Overview, MetricsError> {
    let total_revenue = ensure_finite(
        "overview",
        orders.iter().map(|o| o.total_price_amount).sum(),
    )?;

    let unique_customers = orders
        .iter()
        .filter_map(|o| o.email.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let mut orders_by_status = BTreeMap::new();
    for order in orders {
        let status = order.financial_status_text.as_deref().unwrap_or(NO_STATUS);
        *orders_by_status.entry(status.to_owned()).or_insert(0) += 1;
    }

    let sample_data = orders
        .iter()
        .take(SAMPLE_SIZE)
        .map(|order| SampleOrder {
            id: id_value(order.id.as_ref()).unwrap_or(Value::Null),
            email: order.email.clone(),
            total_price_original: order
                .total_price_text
                .clone()
                .unwrap_or_else(|| NO_STATUS.to_owned()),
            total_price_float: order.total_price_amount,
            status: order
                .financial_status_text
                .clone()
                .unwrap_or_else(|| NO_STATUS.to_owned()),
        })
        .collect();

    Ok(Overview {
        total_orders: orders.len(),
        total_revenue,
        unique_customers,
        average_order_value: ratio(total_revenue, orders.len()),
        orders_by_status,
        sample_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::fixtures::{approx, order, with_status};

    fn priced(id: i64, text: &str, amount: f64, email: Option<&str>) -> NormalizedOrder {
        let mut o = order(id);
        o.total_price_text = Some(text.to_owned());
        o.total_price_amount = amount;
        o.email = email.map(str::to_owned);
        o
    }

    #[test]
    fn headline_figures() {
        let orders = vec![
            with_status(priced(1, "2,274.47", 2274.47, Some("a@x.com")), 3, "paid"),
            with_status(priced(2, "25.53", 25.53, Some("a@x.com")), 3, "paid"),
            with_status(priced(3, "100.00", 100.0, Some("b@x.com")), 5, "refunded"),
            priced(4, "0", 0.0, None),
        ];
        let ov = overview(&orders).unwrap();

        assert_eq!(ov.total_orders, 4);
        assert!(approx(ov.total_revenue, 2400.0));
        assert_eq!(ov.unique_customers, 2);
        assert!(approx(ov.average_order_value, 600.0));
        assert_eq!(ov.orders_by_status.get("paid"), Some(&2));
        assert_eq!(ov.orders_by_status.get("refunded"), Some(&1));
        assert_eq!(ov.orders_by_status.get("N/A"), Some(&1));

        assert_eq!(ov.sample_data.len(), 3);
        assert_eq!(ov.sample_data[0].id, Value::from(1));
        assert_eq!(ov.sample_data[0].total_price_original, "2,274.47");
        assert_eq!(ov.sample_data[0].status, "paid");
    }

    #[test]
    fn sample_defaults_for_missing_fields() {
        let ov = overview(&[NormalizedOrder::default()]).unwrap();
        let sample = &ov.sample_data[0];
        assert_eq!(sample.id, Value::Null);
        assert_eq!(sample.email, None);
        assert_eq!(sample.total_price_original, "N/A");
        assert_eq!(sample.status, "N/A");
    }

    #[test]
    fn empty_overview_is_default() {
        assert_eq!(overview(&[]).unwrap(), Overview::default());
    }
}
