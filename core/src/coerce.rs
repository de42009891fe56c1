//! Field coercions for the provider's loosely typed JSON.
//!
//! The provider sends numbers as strings, booleans as `0`/`1`, and `null`
//! or `""` where a value is simply absent. Each rule is a pure function over
//! a `serde_json::Value` returning `None` when the value cannot be coerced;
//! the [`de`] adapters plug those rules into `#[serde(deserialize_with)]` on
//! the wire structs.

use serde_json::Value;

/// Number or numeric string, as `f64`.
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Integral number or numeric string. `"2"`, `2` and `2.0` all give `2`;
/// fractional values are rejected.
pub fn integer(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    if let Value::String(s) = value {
        if let Ok(i) = s.trim().parse::<i64>() {
            return Some(i);
        }
    }
    number(value)
        .filter(|v| v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64)
        .map(|v| v as i64)
}

/// Remaining stock of a menu course: `null` means none left, strings are
/// parsed as floats and floored.
pub fn count_left(value: &Value) -> Option<i64> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|v| v.floor() as i64)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.floor() as i64),
        _ => None,
    }
}

/// Boolean, `0`/`1`, or the strings `"true"`/`"false"`/`"0"`/`"1"`.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Required identifier or text. Numbers are rendered as their JSON text so
/// numeric ids survive.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Optional text: `null` and blank strings are absent. The outer `None`
/// means the value had the wrong shape.
pub fn optional_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) if s.trim().is_empty() => Some(None),
        other => text(other).map(Some),
    }
}

/// Comma-joined phone list. Blank entries are dropped so `""` yields an
/// empty list rather than a list holding one empty string.
pub fn phone_numbers(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Applies `rule` to `value`, treating `null` as absent.
fn nullable<T>(value: &Value, rule: fn(&Value) -> Option<T>) -> Option<Option<T>> {
    match value {
        Value::Null => Some(None),
        other => rule(other).map(Some),
    }
}

/// `deserialize_with` adapters over the rules above.
///
/// Pair the `*_or_default` and `optional_*` adapters with `#[serde(default)]`
/// so an absent key behaves like `null`.
pub mod de {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn apply<'de, D, T>(
        deserializer: D,
        expected: &str,
        rule: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        rule(&value).ok_or_else(|| D::Error::custom(format!("expected {expected}, got {value}")))
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        apply(d, "a number", super::number)
    }

    pub fn number_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        apply(d, "a number", |v| super::nullable(v, super::number)).map(Option::unwrap_or_default)
    }

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        apply(d, "an integer", super::integer)
    }

    pub fn optional_integer<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        apply(d, "an integer", |v| super::nullable(v, super::integer))
    }

    pub fn count_left<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        apply(d, "a stock count", super::count_left)
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        apply(d, "a boolean", super::flag)
    }

    pub fn flag_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        apply(d, "a boolean", |v| super::nullable(v, super::flag)).map(Option::unwrap_or_default)
    }

    pub fn optional_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        apply(d, "a boolean", |v| super::nullable(v, super::flag))
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        apply(d, "a string", super::text)
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        apply(d, "a string", super::optional_text)
    }

    pub fn phone_numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        apply(d, "a comma-separated string", super::phone_numbers)
    }
}
