//! Conversions from loose [`Scalar`] values to canonical field types.
//!
//! None of these functions fail: unusable input maps to `0`, `None` or
//! `false`.

use crate::types::Scalar;

/// Parses a currency string such as `"2,274.47"` into `2274.47`.
///
/// Thousands separators (`,`) are stripped before parsing. Empty input,
/// non-numeric residue and non-finite results (`"NaN"`, `"inf"`) all yield
/// `0.0`.
#[must_use]
pub fn parse_currency(value: &str) -> f64 {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl Scalar {
    /// Monetary value of the scalar. Strings go through [`parse_currency`].
    #[must_use]
    pub fn amount(&self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Scalar::Int(v) => *v as f64,
            Scalar::Float(v) if v.is_finite() => *v,
            Scalar::Text(s) => parse_currency(s),
            Scalar::Float(_) | Scalar::Bool(_) => 0.0,
        }
    }

    /// Integer value, accepting integral floats and numeric strings.
    #[must_use]
    pub fn integer(&self) -> Option<i64> {
        match self {
            Scalar::Int(v) => Some(*v),
            Scalar::Float(v) => float_to_integer(*v),
            Scalar::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_integer))
            }
            Scalar::Bool(_) => None,
        }
    }

    /// String form of the scalar; empty or whitespace-only text is `None`.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Float(v) => Some(v.to_string()),
            Scalar::Text(s) => non_blank(s.clone()),
            Scalar::Bool(_) => None,
        }
    }

    /// Loose equality with `1`: accepts `1`, `1.0`, `"1"` and `true`.
    #[must_use]
    pub fn is_one(&self) -> bool {
        match self {
            Scalar::Bool(b) => *b,
            Scalar::Int(v) => *v == 1,
            Scalar::Float(v) => (*v - 1.0).abs() < f64::EPSILON,
            Scalar::Text(s) => s.trim() == "1",
        }
    }
}

fn float_to_integer(v: f64) -> Option<i64> {
    #[allow(clippy::cast_possible_truncation)]
    let truncated = v as i64;
    #[allow(clippy::cast_precision_loss)]
    let exact = v.is_finite() && v.fract() == 0.0 && truncated as f64 == v;
    exact.then_some(truncated)
}

/// Returns `None` for empty or whitespace-only strings.
pub(crate) fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
