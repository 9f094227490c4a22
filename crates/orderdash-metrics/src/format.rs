//! Rounding and display formatting for metric values.
//!
//! Rounding goes through `Decimal` so that exact midpoints such as
//! `14.375` round up; `f64` arithmetic would often land just below them.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half away from zero to two decimal places. Non-finite values are
/// returned unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .and_then(|exact| to_cents(exact).to_f64())
        .unwrap_or(value)
}

/// `numerator / denominator` computed exactly and rounded half up to two
/// decimals; `0` when `denominator` is zero.
#[must_use]
pub fn rounded_ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let exact = Decimal::from(numerator) / Decimal::from(denominator);
    to_cents(exact).to_f64().unwrap_or(0.0)
}

/// Percentage of `part` in `whole`, rounded to two decimals; `0` when
/// `whole` is zero.
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    rounded_ratio(part.saturating_mul(100), whole)
}

/// `"$ 1,234.56"`
#[must_use]
pub fn usd(value: f64) -> String {
    format!("$ {}", group_thousands(value))
}

/// `"R$ 1,234.56"`
#[must_use]
pub fn brl(value: f64) -> String {
    format!("R$ {}", group_thousands(value))
}

/// Two decimals with `,` between thousands groups.
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", round2(value).abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if round2(value) < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
