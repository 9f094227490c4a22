//! Locates the order records inside a fetched document.
//!
//! Three document shapes are recognised, checked in this order:
//!
//! 1. `{"orders": [{"order": {...}}, ...]}`: items without an `order`
//!    wrapper are taken as-is.
//! 2. `[{"order": {...}}, ...]`
//! 3. `[{"id": ..., ...}, ...]`
//!
//! Anything else yields no orders.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentShape {
    OrdersKey,
    WrappedArray,
    BareArray,
    Unknown,
}

/// Detects which of the known shapes `doc` has. Array shapes are decided by
/// the first element only.
#[must_use]
pub fn detect_shape(doc: &Value) -> DocumentShape {
    if doc.get("orders").is_some_and(Value::is_array) {
        return DocumentShape::OrdersKey;
    }

    let first = doc.as_array().and_then(|items| items.first());
    match first {
        Some(item) if item.get("order").is_some_and(|o| !o.is_null()) => {
            DocumentShape::WrappedArray
        }
        Some(item) if item.get("id").is_some_and(|id| !id.is_null()) => DocumentShape::BareArray,
        _ => DocumentShape::Unknown,
    }
}

/// Returns the raw order objects contained in `doc`, in document order.
#[must_use]
pub fn extract_orders(doc: &Value) -> Vec<Value> {
    match detect_shape(doc) {
        DocumentShape::OrdersKey | DocumentShape::WrappedArray => {
            let items = doc
                .get("orders")
                .and_then(Value::as_array)
                .or_else(|| doc.as_array())
                .map_or(&[][..], Vec::as_slice);
            items.iter().map(unwrap_order).collect()
        }
        DocumentShape::BareArray => doc.as_array().cloned().unwrap_or_default(),
        DocumentShape::Unknown => Vec::new(),
    }
}

fn unwrap_order(item: &Value) -> Value {
    match item.get("order") {
        Some(order) if order.is_object() => order.clone(),
        _ => item.clone(),
    }
}
