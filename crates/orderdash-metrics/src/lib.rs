//! Metrics over normalized orders: line-item predicates, pure reducers, and
//! the `Dashboard` assembler that gives every metric a stable response shape.

pub mod dashboard;
pub mod error;
pub mod filters;
pub mod format;
pub mod reducers;

pub use dashboard::{Dashboard, MetricResponse, MetricsReport};
pub use error::MetricsError;
pub use filters::{is_real_product, is_upsell};
pub use reducers::{
    BestSellingProduct, CitySales, DeliveryMetrics, FinancialSummary, IndicatorColor, OrderRow,
    OrdersTable, Overview, Pagination, ProductSales, RefundRate, SampleOrder, TopCities,
    TopProducts, TotalOrders, TotalRevenue, UniqueCustomers, UpsellAnalysis,
};
