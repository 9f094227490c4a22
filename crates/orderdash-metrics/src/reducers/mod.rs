//! Pure reducers over a normalized order snapshot.
//!
//! Every reducer reads the whole `&[NormalizedOrder]` slice and returns a
//! fresh value. None of them log, hold shared state or depend on one
//! another. Monetary sums are plain `f64` accumulation. Reducers that sum
//! money return `Err(MetricsError::NonFiniteSum)` when the accumulation
//! overflows, which the assembler turns into that metric's defaults.

mod cities;
mod overview;
mod products;
mod rates;
mod table;
mod totals;

#[cfg(test)]
pub(crate) mod fixtures;

pub use cities::{top_cities, CitySales, TopCities};
pub use overview::{overview, Overview, SampleOrder};
pub use products::{
    best_selling_product, top_five_products, top_products, upsell_analysis, BestSellingProduct,
    ProductSales, TopProducts, UpsellAnalysis,
};
pub use rates::{delivery_metrics, refund_rate, DeliveryMetrics, IndicatorColor, RefundRate};
pub use table::{orders_table, OrderRow, OrdersTable, Pagination};
pub use totals::{
    financial_summary, total_orders, total_revenue, unique_customers, FinancialSummary,
    TotalOrders, TotalRevenue, UniqueCustomers,
};

use orderdash_core::OrderId;
use serde_json::Value;

use crate::error::MetricsError;

fn ensure_finite(metric: &'static str, value: f64) -> Result<f64, MetricsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MetricsError::NonFiniteSum { metric })
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}

fn id_value(id: Option<&OrderId>) -> Option<Value> {
    id.map(|id| match id {
        OrderId::Int(n) => Value::from(*n),
        OrderId::Text(s) => Value::String(s.clone()),
    })
}
