//! Lenient parsing for nutrition numbers.
//!
//! Nutrition values reach the client in mixed shapes: plain JSON numbers,
//! locale-formatted strings with a comma decimal separator, empty strings,
//! or nothing at all. Everything is funneled through [`num_or_zero`] so the
//! view layer never sees NaN.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parses a decimal that may use a comma as the decimal separator.
///
/// Unparsable, empty, or non-finite input collapses to `0.0`.
pub fn num_or_zero(raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// A nutrition number as it appears on the wire.
///
/// Deserializes from a JSON number, a numeric string (comma or period
/// decimals), or null; anything else collapses to zero. Serializes back
/// as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LooseNumber(pub f64);

impl LooseNumber {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<LooseNumber> for f64 {
    fn from(n: LooseNumber) -> f64 {
        n.0
    }
}

impl From<f64> for LooseNumber {
    fn from(value: f64) -> LooseNumber {
        LooseNumber(if value.is_finite() { value } else { 0.0 })
    }
}

impl<'de> Deserialize<'de> for LooseNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let value = match &raw {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
            serde_json::Value::String(s) => num_or_zero(s),
            _ => 0.0,
        };
        Ok(LooseNumber(value))
    }
}

impl Serialize for LooseNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}
