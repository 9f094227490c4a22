//! Order builders shared by reducer tests.

use orderdash_core::{Address, FinancialStatus, NormalizedLineItem, NormalizedOrder, OrderId, Refund};

pub(crate) fn order(id: i64) -> NormalizedOrder {
    NormalizedOrder {
        id: Some(OrderId::Int(id)),
        ..NormalizedOrder::default()
    }
}

pub(crate) fn with_amount(mut order: NormalizedOrder, amount: f64) -> NormalizedOrder {
    order.local_currency_amount = amount;
    order.local_currency_text = Some(format!("{amount:.2}"));
    order
}

pub(crate) fn with_customer(mut order: NormalizedOrder, customer_id: &str) -> NormalizedOrder {
    order.customer_id = Some(customer_id.to_owned());
    order
}

pub(crate) fn with_refund(mut order: NormalizedOrder, amount: f64) -> NormalizedOrder {
    order.refunds.push(Refund {
        total_amount: amount,
    });
    order
}

pub(crate) fn with_status(mut order: NormalizedOrder, code: i64, label: &str) -> NormalizedOrder {
    order.financial_status = Some(FinancialStatus::Code(code));
    order.financial_status_text = Some(label.to_owned());
    order
}

pub(crate) fn with_items(mut order: NormalizedOrder, items: Vec<NormalizedLineItem>) -> NormalizedOrder {
    order.line_items = items;
    order
}

pub(crate) fn shipped_to(mut order: NormalizedOrder, city: &str, state: &str, country: &str) -> NormalizedOrder {
    order.shipping_address = Some(Address {
        city: Some(city.to_owned()),
        province_code: Some(state.to_owned()),
        country_code: Some(country.to_owned()),
        ..Address::default()
    });
    order
}

pub(crate) fn item(name: &str, quantity: i64, revenue: f64) -> NormalizedLineItem {
    NormalizedLineItem {
        name: Some(name.to_owned()),
        quantity: Some(quantity),
        revenue,
        ..NormalizedLineItem::default()
    }
}

pub(crate) fn upsell_item(name: &str, quantity: i64, revenue: f64) -> NormalizedLineItem {
    NormalizedLineItem {
        upsell_id: Some(1),
        ..item(name, quantity, revenue)
    }
}

pub(crate) fn shipping_skus() -> Vec<String> {
    vec!["SHIPPING".to_owned()]
}

pub(crate) fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
