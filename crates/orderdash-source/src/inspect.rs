//! Structural summary of a fetched document, for diagnosing unexpected
//! source payloads without dumping the whole body.

use serde::Serialize;
use serde_json::Value;

use crate::extract::{detect_shape, extract_orders, DocumentShape};

const SAMPLE_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    /// JSON type of the document root (`object`, `array`, ...).
    pub root_kind: &'static str,
    /// Top-level keys when the root is an object.
    pub root_keys: Vec<String>,
    pub shape: DocumentShape,
    /// Length of the `orders` array or of the root array.
    pub wrapped_items: usize,
    pub first_order: Option<OrderPreview>,
    pub extracted_count: usize,
    /// Ids of the first three extracted orders; missing ids are `null`.
    pub sample_ids: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderPreview {
    pub id: Value,
    pub email: Value,
    pub total_price: Value,
    pub financial_status: Value,
    pub line_item_count: usize,
}

impl OrderPreview {
    fn from_order(order: &Value) -> Self {
        let field = |name: &str| order.get(name).cloned().unwrap_or(Value::Null);
        Self {
            id: field("id"),
            email: field("email"),
            total_price: field("total_price"),
            financial_status: field("financial_status"),
            line_item_count: order
                .get("line_items")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }
}

/// Summarizes `doc`. Never fails: an unrecognised document simply reports
/// `DocumentShape::Unknown` and zero orders.
#[must_use]
pub fn summarize_document(doc: &Value) -> DocumentSummary {
    let root_keys = doc
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();

    let wrapped_items = doc
        .get("orders")
        .and_then(Value::as_array)
        .or_else(|| doc.as_array())
        .map_or(0, Vec::len);

    let orders = extract_orders(doc);
    let first_order = orders.first().map(OrderPreview::from_order);
    let sample_ids = orders
        .iter()
        .take(SAMPLE_SIZE)
        .map(|order| order.get("id").cloned().unwrap_or(Value::Null))
        .collect();

    DocumentSummary {
        root_kind: kind_of(doc),
        root_keys,
        shape: detect_shape(doc),
        wrapped_items,
        first_order,
        extracted_count: orders.len(),
        sample_ids,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarizes_orders_key_document() {
        let doc = json!({
            "orders": [
                {"order": {"id": 10, "email": "a@x.com", "total_price": "12.50",
                           "financial_status": 3, "line_items": [{}, {}]}},
                {"order": {"id": 11}},
                {"order": {"id": 12}},
                {"order": {"email": "noid@x.com"}}
            ],
            "meta": {"page": 1}
        });
        let summary = summarize_document(&doc);
        assert_eq!(summary.root_kind, "object");
        assert!(summary.root_keys.contains(&"orders".to_owned()));
        assert!(summary.root_keys.contains(&"meta".to_owned()));
        assert_eq!(summary.shape, DocumentShape::OrdersKey);
        assert_eq!(summary.wrapped_items, 4);
        assert_eq!(summary.extracted_count, 4);
        assert_eq!(summary.sample_ids, vec![json!(10), json!(11), json!(12)]);

        let first = summary.first_order.unwrap();
        assert_eq!(first.email, json!("a@x.com"));
        assert_eq!(first.total_price, json!("12.50"));
        assert_eq!(first.financial_status, json!(3));
        assert_eq!(first.line_item_count, 2);
    }

    #[test]
    fn unknown_document_reports_nothing_extracted() {
        let summary = summarize_document(&json!({"data": []}));
        assert_eq!(summary.shape, DocumentShape::Unknown);
        assert_eq!(summary.wrapped_items, 0);
        assert_eq!(summary.extracted_count, 0);
        assert!(summary.first_order.is_none());
        assert!(summary.sample_ids.is_empty());
    }

    #[test]
    fn bare_array_has_no_root_keys() {
        let summary = summarize_document(&json!([{"id": "A1"}]));
        assert_eq!(summary.root_kind, "array");
        assert!(summary.root_keys.is_empty());
        assert_eq!(summary.shape, DocumentShape::BareArray);
        assert_eq!(summary.sample_ids, vec![json!("A1")]);
    }
}
