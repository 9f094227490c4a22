use chrono::{DateTime, NaiveDate, NaiveDateTime};
use orderdash_core::NormalizedOrder;
use serde::Serialize;
use serde_json::Value;

use super::id_value;
use crate::error::MetricsError;

const NOT_AVAILABLE: &str = "N/A";
const DISPLAY_DATE: &str = "%d/%m/%Y %H:%M";

/// One display row of the orders table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    /// Original id (number or string), `"N/A"` when absent.
    pub id: Value,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub financial_status: String,
    pub fulfillment_status: String,
    /// Local currency amount exactly as the source sent it.
    pub amount: String,
    pub amount_float: f64,
    pub created_at: String,
    pub formatted_date: String,
}

impl OrderRow {
    fn from_order(order: &NormalizedOrder) -> Self {
        Self {
            id: id_value(order.id.as_ref())
                .unwrap_or_else(|| Value::String(NOT_AVAILABLE.to_owned())),
            order_number: or_na(order.order_number.as_deref()),
            customer_name: order.customer_name(),
            customer_email: order.display_email().to_owned(),
            financial_status: order.financial_status_text.clone().unwrap_or_default(),
            fulfillment_status: or_na(order.fulfillment_status.as_deref()),
            amount: order
                .local_currency_text
                .clone()
                .unwrap_or_else(|| "0.00".to_owned()),
            amount_float: order.local_currency_amount,
            created_at: or_na(order.created_at.as_deref()),
            formatted_date: order
                .created_at
                .as_deref()
                .and_then(format_timestamp)
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        }
    }
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_owned()
}

/// Renders a source timestamp as `dd/mm/YYYY HH:MM` in its own offset.
/// Returns `None` for anything that is not a recognisable date.
fn format_timestamp(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format(DISPLAY_DATE).to_string());
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.format(DISPLAY_DATE).to_string());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt.format(DISPLAY_DATE).to_string());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.format(DISPLAY_DATE).to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub last_page: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrdersTable {
    pub orders: Vec<OrderRow>,
    pub pagination: Pagination,
}

impl OrdersTable {
    /// Empty first page reported when the table could not be built.
    #[must_use]
    pub fn unavailable(per_page: usize) -> Self {
        Self {
            orders: Vec::new(),
            pagination: Pagination {
                current_page: 1,
                per_page,
                total: 0,
                last_page: 1,
            },
        }
    }
}

/// Page `page` (1-based) of `per_page` rows. A page before the first or past
/// the last is empty, not an error.
///
/// # Errors
///
/// [`MetricsError::InvalidPageSize`] when `per_page` is zero.
pub fn orders_table(
    orders: &[NormalizedOrder],
    per_page: usize,
    page: usize,
) -> Result<OrdersTable, MetricsError> {
    if per_page == 0 {
        return Err(MetricsError::InvalidPageSize(per_page));
    }

    let total = orders.len();
    let rows = match page.checked_sub(1) {
        Some(index) => orders
            .iter()
            .skip(index.saturating_mul(per_page))
            .take(per_page)
            .map(OrderRow::from_order)
            .collect(),
        None => Vec::new(),
    };

    Ok(OrdersTable {
        orders: rows,
        pagination: Pagination {
            current_page: page,
            per_page,
            total,
            last_page: total.div_ceil(per_page),
        },
    })
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
