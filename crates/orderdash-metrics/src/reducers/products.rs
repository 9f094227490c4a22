use std::collections::HashMap;

use orderdash_core::{NormalizedLineItem, NormalizedOrder};
use serde::Serialize;

use super::{ensure_finite, ratio};
use crate::error::MetricsError;
use crate::filters::{is_real_product, is_upsell};
use crate::format::{percent, usd};

const TOP_PRODUCTS: usize = 5;
const TOP_UPSELL_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
}

/// Per-name accumulator that remembers first-seen order, so a stable sort
/// breaks ties in favour of the product encountered first.
#[derive(Default)]
struct ProductTally {
    products: Vec<ProductSales>,
    index: HashMap<String, usize>,
}

impl ProductTally {
    fn add(&mut self, item: &NormalizedLineItem) {
        let name = item.product_name();
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.products.push(ProductSales {
                    name: name.to_owned(),
                    total_quantity: 0,
                    total_revenue: 0.0,
                });
                self.index.insert(name.to_owned(), self.products.len() - 1);
                self.products.len() - 1
            }
        };
        let entry = &mut self.products[slot];
        entry.total_quantity = entry
            .total_quantity
            .saturating_add(item.quantity_or_default());
        entry.total_revenue += item.revenue;
    }

    fn finish(self, metric: &'static str) -> Result<Vec<ProductSales>, MetricsError> {
        for product in &self.products {
            ensure_finite(metric, product.total_revenue)?;
        }
        Ok(self.products)
    }
}

/// Groups real (non-shipping) line items by product name and returns the
/// `limit` best sellers by quantity, ties broken by first appearance.
///
/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when a product's revenue overflows.
pub fn top_products(
    orders: &[NormalizedOrder],
    shipping_skus: &[String],
    limit: usize,
) -> Result<Vec<ProductSales>, MetricsError> {
    let mut tally = ProductTally::default();
    orders
        .iter()
        .flat_map(|o| &o.line_items)
        .filter(|item| is_real_product(item, shipping_skus))
        .for_each(|item| tally.add(item));

    let mut products = tally.finish("top_products")?;
    products.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    products.truncate(limit);
    Ok(products)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestSellingProduct {
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: f64,
    pub total_revenue_formatted: String,
}

impl BestSellingProduct {
    fn placeholder(product_name: &str) -> Self {
        Self {
            product_name: product_name.to_owned(),
            total_quantity: 0,
            total_revenue: 0.0,
            total_revenue_formatted: usd(0.0),
        }
    }

    /// Row reported when no order has a real product.
    #[must_use]
    pub fn none_found() -> Self {
        Self::placeholder("No products found")
    }

    /// Row reported when the metric could not be computed.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::placeholder("Error loading product")
    }
}

/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when a product's revenue overflows.
pub fn best_selling_product(
    orders: &[NormalizedOrder],
    shipping_skus: &[String],
) -> Result<BestSellingProduct, MetricsError> {
    let best = top_products(orders, shipping_skus, 1)?.into_iter().next();
    Ok(best.map_or_else(BestSellingProduct::none_found, |p| {
        BestSellingProduct {
            total_revenue_formatted: usd(p.total_revenue),
            product_name: p.name,
            total_quantity: p.total_quantity,
            total_revenue: p.total_revenue,
        }
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopProducts {
    pub products: Vec<ProductSales>,
}

/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when a product's revenue overflows.
pub fn top_five_products(
    orders: &[NormalizedOrder],
    shipping_skus: &[String],
) -> Result<TopProducts, MetricsError> {
    Ok(TopProducts {
        products: top_products(orders, shipping_skus, TOP_PRODUCTS)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpsellAnalysis {
    pub total_orders: usize,
    pub orders_with_upsell: usize,
    pub upsell_rate_percent: f64,
    pub total_upsell_revenue: f64,
    pub total_upsell_revenue_formatted: String,
    pub avg_upsell_value: f64,
    pub top_upsell_products: Vec<ProductSales>,
}

impl Default for UpsellAnalysis {
    fn default() -> Self {
        Self {
            total_orders: 0,
            orders_with_upsell: 0,
            upsell_rate_percent: 0.0,
            total_upsell_revenue: 0.0,
            total_upsell_revenue_formatted: usd(0.0),
            avg_upsell_value: 0.0,
            top_upsell_products: Vec::new(),
        }
    }
}

/// Orders carrying at least one upsell line item, the revenue of those items,
/// and the five upsell products with the most revenue.
///
/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when upsell revenue overflows.
pub fn upsell_analysis(orders: &[NormalizedOrder]) -> Result<UpsellAnalysis, MetricsError> {
    let mut tally = ProductTally::default();
    let mut orders_with_upsell = 0usize;
    let mut revenue = 0.0;

    for order in orders {
        let mut has_upsell = false;
        for item in order.line_items.iter().filter(|item| is_upsell(item)) {
            has_upsell = true;
            revenue += item.revenue;
            tally.add(item);
        }
        if has_upsell {
            orders_with_upsell += 1;
        }
    }

    let total_upsell_revenue = ensure_finite("upsell_analysis", revenue)?;
    let mut top_upsell_products = tally.finish("upsell_analysis")?;
    top_upsell_products.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));
    top_upsell_products.truncate(TOP_UPSELL_PRODUCTS);

    Ok(UpsellAnalysis {
        total_orders: orders.len(),
        orders_with_upsell,
        upsell_rate_percent: percent(orders_with_upsell, orders.len()),
        total_upsell_revenue,
        total_upsell_revenue_formatted: usd(total_upsell_revenue),
        avg_upsell_value: ratio(total_upsell_revenue, orders_with_upsell),
        top_upsell_products,
    })
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
