//! Loose order types as the order API sends them.
//!
//! ## Observed shape
//!
//! ### Amounts
//! Money arrives as comma-grouped decimal strings (`"2,274.47"`), but some
//! records carry plain JSON numbers instead. Both are captured as [`Scalar`]
//! and parsed during normalization.
//!
//! ### `financial_status`
//! Either a numeric code (`3`) or free text (`"paid"`).
//!
//! ### Missing and mistyped fields
//! Any field may be absent, `null`, or of an unexpected JSON type. Every
//! field is deserialized through [`lenient`], so a mistyped field becomes
//! `None` for that field alone and never fails the record. A record that is
//! not a JSON object at all becomes [`RawOrder::default`].

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;

/// A JSON scalar of unknown type.
///
/// Variant order matters for `untagged`: integers must be tried before
/// floats so that `3` stays an exact code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Deserializes a field, discarding it (as `None`) when its JSON type does
/// not match `T`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], but only JSON objects are accepted. Derived structs
/// would otherwise also accept arrays positionally.
pub(crate) fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Deserializes a JSON array of objects, keeping only the elements that
/// match `T`. Anything other than an array yields an empty list.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter(serde_json::Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// One order record from the source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOrder {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub order_number: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub contact_email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub customer_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub customer: Option<RawCustomer>,
    /// Order total, e.g. `"2,274.47"`.
    #[serde(default, deserialize_with = "lenient")]
    pub total_price: Option<Scalar>,
    /// Order total in the store's local currency (USD).
    #[serde(default, deserialize_with = "lenient")]
    pub local_currency_amount: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub financial_status: Option<Scalar>,
    /// Free text; `"Fully Fulfilled"` marks a delivered order.
    #[serde(default, deserialize_with = "lenient")]
    pub fulfillment_status: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub line_items: Vec<RawLineItem>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub refunds: Vec<RawRefund>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub shipping_address: Option<RawAddress>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub billing_address: Option<RawAddress>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<String>,
}

impl RawOrder {
    /// Builds a record from any JSON value. Non-object values produce an
    /// all-default record so that one bad element never shrinks the batch.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCustomer {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLineItem {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sku: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub quantity: Option<Scalar>,
    /// Line total in local currency, e.g. `"149.90"`.
    #[serde(default, deserialize_with = "lenient")]
    pub local_currency_item_total_price: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub upsell_id: Option<Scalar>,
    #[serde(default, deserialize_with = "lenient")]
    pub upsell_type: Option<Scalar>,
    /// Observed as `0`/`1`; also accepted as `"1"` or `true`.
    #[serde(default, deserialize_with = "lenient")]
    pub is_refunded: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRefund {
    #[serde(default, deserialize_with = "lenient")]
    pub total_amount: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default, deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub province_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub province: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
}
