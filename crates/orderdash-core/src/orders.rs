use serde::{Deserialize, Serialize};

/// Label used wherever an order has no usable city.
pub const UNKNOWN_CITY: &str = "Unknown City";
/// Label used wherever an order has no usable state or province.
pub const UNKNOWN_STATE: &str = "Unknown State";
/// Label used wherever an order has no usable country.
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";

/// Order identifier as the source sent it. Uniqueness is not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderId::Int(id) => write!(f, "{id}"),
            OrderId::Text(id) => f.write_str(id),
        }
    }
}

/// Raw financial status: either one of the numeric codes or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FinancialStatus {
    Code(i64),
    Text(String),
}

impl FinancialStatus {
    /// Human-readable label for the status.
    ///
    /// Codes 1–6 map to the fixed label table; any other code, and any text
    /// status, is returned as its string form.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            FinancialStatus::Code(code) => status_label(*code)
                .map_or_else(|| code.to_string(), ToOwned::to_owned),
            FinancialStatus::Text(text) => text.clone(),
        }
    }
}

fn status_label(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("pending"),
        2 => Some("authorized"),
        3 => Some("paid"),
        4 => Some("partially_paid"),
        5 => Some("refunded"),
        6 => Some("voided"),
        _ => None,
    }
}

/// Postal address fragment used for geographic grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub province_code: Option<String>,
    pub province: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    fn state(&self) -> Option<&str> {
        self.province_code.as_deref().or(self.province.as_deref())
    }

    fn country(&self) -> Option<&str> {
        self.country_code.as_deref().or(self.country.as_deref())
    }
}

/// Resolved `(city, state, country)` triple. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub total_amount: f64,
}

/// A line item after normalization. Every field the source may omit stays
/// optional; reducers apply their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedLineItem {
    pub name: Option<String>,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    /// Line total in the local currency (`local_currency_item_total_price`).
    pub revenue: f64,
    pub upsell_id: Option<i64>,
    pub upsell_type: Option<String>,
    pub is_refunded: bool,
}

impl NormalizedLineItem {
    /// Quantity with the missing-value default of one unit.
    #[must_use]
    pub fn quantity_or_default(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Product name used for grouping, `"Unknown Product"` when absent.
    #[must_use]
    pub fn product_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Product")
    }
}

/// Canonical order record produced by the normalizer.
///
/// Monetary fields are already parsed: an absent or unparseable amount is
/// `0.0`. Nothing here is mutated once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOrder {
    pub id: Option<OrderId>,
    /// `order_number`, falling back to the order `name`.
    pub order_number: Option<String>,
    pub email: Option<String>,
    pub contact_email: Option<String>,
    pub customer_id: Option<String>,
    pub customer_first_name: Option<String>,
    pub customer_last_name: Option<String>,
    /// Original `total_price` string, e.g. `"2,274.47"`.
    pub total_price_text: Option<String>,
    pub total_price_amount: f64,
    /// Original `local_currency_amount` string.
    pub local_currency_text: Option<String>,
    pub local_currency_amount: f64,
    pub financial_status: Option<FinancialStatus>,
    pub financial_status_text: Option<String>,
    pub fulfillment_status: Option<String>,
    pub line_items: Vec<NormalizedLineItem>,
    pub refunds: Vec<Refund>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub created_at: Option<String>,
}

impl NormalizedOrder {
    /// Resolves city, state and country independently: shipping address
    /// first, then billing, then the `Unknown *` labels.
    #[must_use]
    pub fn location(&self) -> Location {
        let shipping = self.shipping_address.as_ref();
        let billing = self.billing_address.as_ref();

        let pick = |get: fn(&Address) -> Option<&str>, fallback: &str| -> String {
            shipping
                .and_then(get)
                .or_else(|| billing.and_then(get))
                .unwrap_or(fallback)
                .to_string()
        };

        Location {
            city: pick(|a| a.city.as_deref(), UNKNOWN_CITY),
            state: pick(Address::state, UNKNOWN_STATE),
            country: pick(Address::country, UNKNOWN_COUNTRY),
        }
    }

    /// `first_name + " " + last_name`, trimmed. Either part may be empty.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!(
            "{} {}",
            self.customer_first_name.as_deref().unwrap_or_default(),
            self.customer_last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// Contact email, then account email, then `"N/A"`.
    #[must_use]
    pub fn display_email(&self) -> &str {
        self.contact_email
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("N/A")
    }

    /// `true` when the order has a refund record or any refunded line item.
    #[must_use]
    pub fn has_refund(&self) -> bool {
        !self.refunds.is_empty() || self.line_items.iter().any(|item| item.is_refunded)
    }

    #[must_use]
    pub fn refund_total(&self) -> f64 {
        self.refunds.iter().map(|r| r.total_amount).sum()
    }
}
