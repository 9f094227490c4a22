use std::collections::HashSet;

use orderdash_core::NormalizedOrder;
use serde::Serialize;

use super::ensure_finite;
use crate::error::MetricsError;
use crate::format::{brl, rounded_ratio, usd};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalOrders {
    pub total_orders: usize,
}

#[must_use]
pub fn total_orders(orders: &[NormalizedOrder]) -> TotalOrders {
    TotalOrders {
        total_orders: orders.len(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TotalRevenue {
    pub total_usd: f64,
    pub total_brl: f64,
    pub total_usd_formatted: String,
    pub total_brl_formatted: String,
    pub exchange_rate: f64,
}

impl TotalRevenue {
    fn from_usd(total_usd: f64, exchange_rate: f64) -> Self {
        let total_brl = total_usd * exchange_rate;
        Self {
            total_usd,
            total_brl,
            total_usd_formatted: usd(total_usd),
            total_brl_formatted: brl(total_brl),
            exchange_rate,
        }
    }

    #[must_use]
    pub fn zero(exchange_rate: f64) -> Self {
        Self::from_usd(0.0, exchange_rate)
    }
}

/// Sum of `local_currency_amount`, converted to BRL at the static
/// `exchange_rate`.
///
/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when either total overflows.
pub fn total_revenue(
    orders: &[NormalizedOrder],
    exchange_rate: f64,
) -> Result<TotalRevenue, MetricsError> {
    let total_usd = ensure_finite(
        "total_revenue",
        orders.iter().map(|o| o.local_currency_amount).sum(),
    )?;
    let revenue = TotalRevenue::from_usd(total_usd, exchange_rate);
    ensure_finite("total_revenue", revenue.total_brl)?;
    Ok(revenue)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniqueCustomers {
    pub unique_customers: usize,
    pub total_orders: usize,
    pub avg_orders_per_customer: f64,
}

/// Distinct non-null `customer_id`s. The average is rounded to two decimals
/// and `0` when there are no identified customers.
#[must_use]
pub fn unique_customers(orders: &[NormalizedOrder]) -> UniqueCustomers {
    let unique = orders
        .iter()
        .filter_map(|o| o.customer_id.as_deref())
        .collect::<HashSet<_>>()
        .len();

    UniqueCustomers {
        unique_customers: unique,
        total_orders: orders.len(),
        avg_orders_per_customer: rounded_ratio(orders.len(), unique),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub gross_revenue: f64,
    pub total_refunds: f64,
    pub net_revenue: f64,
    pub gross_revenue_formatted: String,
    pub total_refunds_formatted: String,
    pub net_revenue_formatted: String,
}

impl FinancialSummary {
    fn new(gross_revenue: f64, total_refunds: f64) -> Self {
        let net_revenue = gross_revenue - total_refunds;
        Self {
            gross_revenue,
            total_refunds,
            net_revenue,
            gross_revenue_formatted: usd(gross_revenue),
            total_refunds_formatted: usd(total_refunds),
            net_revenue_formatted: usd(net_revenue),
        }
    }
}

impl Default for FinancialSummary {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Gross revenue, refunds across every order's refund records, and the
/// difference.
///
/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when a sum overflows.
pub fn financial_summary(orders: &[NormalizedOrder]) -> Result<FinancialSummary, MetricsError> {
    let gross = ensure_finite(
        "financial_summary",
        orders.iter().map(|o| o.local_currency_amount).sum(),
    )?;
    let refunds = ensure_finite(
        "financial_summary",
        orders.iter().map(NormalizedOrder::refund_total).sum(),
    )?;
    let summary = FinancialSummary::new(gross, refunds);
    ensure_finite("financial_summary", summary.net_revenue)?;
    Ok(summary)
}

#[cfg(test)]
#[path = "totals_test.rs"]
mod tests;
