//! Result assembly: runs one reducer over the request's order snapshot and
//! wraps its output with a `success` flag, substituting the metric's zero
//! defaults when the source was unavailable or the reducer failed.

use std::fmt::Display;

use orderdash_core::{MetricsConfig, NormalizedOrder};
use serde::Serialize;

use crate::error::MetricsError;
use crate::reducers::{
    self, BestSellingProduct, DeliveryMetrics, FinancialSummary, OrdersTable, Overview,
    RefundRate, TopCities, TopProducts, TotalOrders, TotalRevenue, UniqueCustomers,
    UpsellAnalysis,
};

/// A metric body: the reducer's fields flattened next to `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub success: bool,
}

impl<T> MetricResponse<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
        }
    }

    #[must_use]
    pub fn degraded(data: T) -> Self {
        Self {
            data,
            success: false,
        }
    }
}

/// Every metric at once, as printed by `orderdash report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub overview: MetricResponse<Overview>,
    pub total_orders: MetricResponse<TotalOrders>,
    pub total_revenue: MetricResponse<TotalRevenue>,
    pub unique_customers: MetricResponse<UniqueCustomers>,
    pub financial_summary: MetricResponse<FinancialSummary>,
    pub refund_rate: MetricResponse<RefundRate>,
    pub delivery: MetricResponse<DeliveryMetrics>,
    pub best_selling_product: MetricResponse<BestSellingProduct>,
    pub top_5_products: MetricResponse<TopProducts>,
    pub top_10_cities: MetricResponse<TopCities>,
    pub upsell_analysis: MetricResponse<UpsellAnalysis>,
}

/// One request's normalized orders, or the reason they could not be loaded.
///
/// The snapshot is fetched once and shared read-only by every metric
/// computed from it; each metric degrades independently.
#[derive(Debug, Clone)]
pub struct Dashboard {
    orders: Result<Vec<NormalizedOrder>, MetricsError>,
    config: MetricsConfig,
}

impl Dashboard {
    #[must_use]
    pub fn new(orders: Vec<NormalizedOrder>, config: MetricsConfig) -> Self {
        Self {
            orders: Ok(orders),
            config,
        }
    }

    /// A dashboard whose every metric reports its defaults with
    /// `success: false`.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>, config: MetricsConfig) -> Self {
        Self {
            orders: Err(MetricsError::SourceUnavailable(reason.into())),
            config,
        }
    }

    /// Builds from the outcome of loading the source.
    pub fn from_source<E: Display>(
        loaded: Result<Vec<NormalizedOrder>, E>,
        config: MetricsConfig,
    ) -> Self {
        match loaded {
            Ok(orders) => Self::new(orders, config),
            Err(err) => {
                tracing::error!(error = %err, "order source unavailable; serving default metrics");
                Self::unavailable(err.to_string(), config)
            }
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.orders.is_ok()
    }

    /// The snapshot, empty when the source was unavailable.
    #[must_use]
    pub fn orders(&self) -> &[NormalizedOrder] {
        self.orders.as_deref().unwrap_or(&[])
    }

    fn assemble<T>(
        &self,
        metric: &'static str,
        compute: impl FnOnce(&[NormalizedOrder]) -> Result<T, MetricsError>,
        fallback: impl FnOnce() -> T,
    ) -> MetricResponse<T> {
        let outcome = match &self.orders {
            Ok(orders) => compute(orders),
            Err(err) => Err(err.clone()),
        };

        match outcome {
            Ok(data) => MetricResponse::ok(data),
            Err(err) => {
                tracing::warn!(metric, error = %err, "metric degraded to defaults");
                MetricResponse::degraded(fallback())
            }
        }
    }

    #[must_use]
    pub fn total_orders(&self) -> MetricResponse<TotalOrders> {
        self.assemble(
            "total_orders",
            |orders| Ok(reducers::total_orders(orders)),
            TotalOrders::default,
        )
    }

    #[must_use]
    pub fn total_revenue(&self) -> MetricResponse<TotalRevenue> {
        let rate = self.config.usd_brl_rate;
        self.assemble(
            "total_revenue",
            |orders| reducers::total_revenue(orders, rate),
            || TotalRevenue::zero(rate),
        )
    }

    #[must_use]
    pub fn unique_customers(&self) -> MetricResponse<UniqueCustomers> {
        self.assemble(
            "unique_customers",
            |orders| Ok(reducers::unique_customers(orders)),
            UniqueCustomers::default,
        )
    }

    #[must_use]
    pub fn financial_summary(&self) -> MetricResponse<FinancialSummary> {
        self.assemble(
            "financial_summary",
            reducers::financial_summary,
            FinancialSummary::default,
        )
    }

    #[must_use]
    pub fn refund_rate(&self) -> MetricResponse<RefundRate> {
        self.assemble(
            "refund_rate",
            |orders| Ok(reducers::refund_rate(orders)),
            RefundRate::default,
        )
    }

    #[must_use]
    pub fn delivery(&self) -> MetricResponse<DeliveryMetrics> {
        self.assemble(
            "delivery",
            |orders| Ok(reducers::delivery_metrics(orders)),
            DeliveryMetrics::default,
        )
    }

    #[must_use]
    pub fn best_selling_product(&self) -> MetricResponse<BestSellingProduct> {
        let skus = &self.config.shipping_skus;
        self.assemble(
            "best_selling_product",
            |orders| reducers::best_selling_product(orders, skus),
            BestSellingProduct::unavailable,
        )
    }

    #[must_use]
    pub fn top_5_products(&self) -> MetricResponse<TopProducts> {
        let skus = &self.config.shipping_skus;
        self.assemble(
            "top_5_products",
            |orders| reducers::top_five_products(orders, skus),
            TopProducts::default,
        )
    }

    #[must_use]
    pub fn top_10_cities(&self) -> MetricResponse<TopCities> {
        self.assemble("top_10_cities", reducers::top_cities, TopCities::default)
    }

    #[must_use]
    pub fn upsell_analysis(&self) -> MetricResponse<UpsellAnalysis> {
        self.assemble(
            "upsell_analysis",
            reducers::upsell_analysis,
            UpsellAnalysis::default,
        )
    }

    #[must_use]
    pub fn orders_table(&self, per_page: usize, page: usize) -> MetricResponse<OrdersTable> {
        self.assemble(
            "orders_table",
            |orders| reducers::orders_table(orders, per_page, page),
            || OrdersTable::unavailable(per_page),
        )
    }

    #[must_use]
    pub fn overview(&self) -> MetricResponse<Overview> {
        self.assemble("overview", reducers::overview, Overview::default)
    }

    #[must_use]
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            overview: self.overview(),
            total_orders: self.total_orders(),
            total_revenue: self.total_revenue(),
            unique_customers: self.unique_customers(),
            financial_summary: self.financial_summary(),
            refund_rate: self.refund_rate(),
            delivery: self.delivery(),
            best_selling_product: self.best_selling_product(),
            top_5_products: self.top_5_products(),
            top_10_cities: self.top_10_cities(),
            upsell_analysis: self.upsell_analysis(),
        }
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
