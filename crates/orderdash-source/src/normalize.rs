//! Normalization from loose [`RawOrder`] records to [`NormalizedOrder`].
//!
//! Normalization is total: every raw record yields exactly one normalized
//! record, in input order. Scalar conversions live in [`crate::parse`];
//! this module only handles structure and defaults.

use orderdash_core::{
    Address, FinancialStatus, NormalizedLineItem, NormalizedOrder, OrderId, Refund,
};

use crate::parse::non_blank;
use crate::types::{RawAddress, RawLineItem, RawOrder, RawRefund, Scalar};

/// Normalizes a batch of raw orders, preserving order and cardinality.
#[must_use]
pub fn normalize(raw_orders: Vec<RawOrder>) -> Vec<NormalizedOrder> {
    raw_orders.into_iter().map(normalize_order).collect()
}

/// Normalizes a single raw order.
#[must_use]
pub fn normalize_order(raw: RawOrder) -> NormalizedOrder {
    let (customer_first_name, customer_last_name, customer_ref) = match raw.customer {
        Some(c) => (
            c.first_name.and_then(non_blank),
            c.last_name.and_then(non_blank),
            c.id,
        ),
        None => (None, None, None),
    };

    // `customer_id` is authoritative; the nested customer object only fills
    // the gap when the top-level field is missing.
    let customer_id = raw
        .customer_id
        .as_ref()
        .and_then(Scalar::text)
        .or_else(|| customer_ref.as_ref().and_then(Scalar::text));

    let order_number = raw
        .order_number
        .as_ref()
        .and_then(Scalar::text)
        .or_else(|| raw.name.as_ref().and_then(Scalar::text));

    let financial_status = raw.financial_status.as_ref().and_then(financial_status);
    let financial_status_text = financial_status.as_ref().map(FinancialStatus::label);

    NormalizedOrder {
        id: raw.id.as_ref().and_then(order_id),
        order_number,
        email: raw.email.and_then(non_blank),
        contact_email: raw.contact_email.and_then(non_blank),
        customer_id,
        customer_first_name,
        customer_last_name,
        total_price_amount: raw.total_price.as_ref().map_or(0.0, Scalar::amount),
        total_price_text: raw.total_price.as_ref().and_then(Scalar::text),
        local_currency_amount: raw.local_currency_amount.as_ref().map_or(0.0, Scalar::amount),
        local_currency_text: raw.local_currency_amount.as_ref().and_then(Scalar::text),
        financial_status,
        financial_status_text,
        fulfillment_status: raw.fulfillment_status.as_ref().and_then(Scalar::text),
        line_items: raw.line_items.into_iter().map(normalize_line_item).collect(),
        refunds: raw.refunds.into_iter().map(normalize_refund).collect(),
        shipping_address: raw.shipping_address.map(normalize_address),
        billing_address: raw.billing_address.map(normalize_address),
        created_at: raw.created_at.and_then(non_blank),
    }
}

fn order_id(value: &Scalar) -> Option<OrderId> {
    match value {
        Scalar::Int(id) => Some(OrderId::Int(*id)),
        other => other.text().map(OrderId::Text),
    }
}

/// JSON numbers with an integral value (`3`, `3.0`) become codes so they can
/// be mapped to labels; everything else, including numeric-looking text, is
/// kept as text.
fn financial_status(value: &Scalar) -> Option<FinancialStatus> {
    match value {
        Scalar::Int(_) | Scalar::Float(_) => value
            .integer()
            .map(FinancialStatus::Code)
            .or_else(|| value.text().map(FinancialStatus::Text)),
        other => other.text().map(FinancialStatus::Text),
    }
}

fn normalize_line_item(item: RawLineItem) -> NormalizedLineItem {
    NormalizedLineItem {
        name: item.name.and_then(non_blank),
        title: item.title.and_then(non_blank),
        sku: item.sku.as_ref().and_then(Scalar::text),
        quantity: item.quantity.as_ref().and_then(Scalar::integer),
        revenue: item
            .local_currency_item_total_price
            .as_ref()
            .map_or(0.0, Scalar::amount),
        upsell_id: item.upsell_id.as_ref().and_then(Scalar::integer),
        upsell_type: item.upsell_type.as_ref().and_then(Scalar::text),
        is_refunded: item.is_refunded.as_ref().is_some_and(Scalar::is_one),
    }
}

fn normalize_refund(refund: RawRefund) -> Refund {
    Refund {
        total_amount: refund.total_amount.as_ref().map_or(0.0, Scalar::amount),
    }
}

fn normalize_address(address: RawAddress) -> Address {
    Address {
        city: address.city.and_then(non_blank),
        province_code: address.province_code.and_then(non_blank),
        province: address.province.and_then(non_blank),
        country_code: address.country_code.and_then(non_blank),
        country: address.country.and_then(non_blank),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
