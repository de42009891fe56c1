//! Response mappers: provider JSON in, validated domain values out.
//!
//! # Design
//! Each mapper is a pure function over a borrowed `serde_json::Value`.
//! Wire shapes are private serde structs that apply the coercions from
//! [`crate::coerce`]; the mapper then renames fields, decodes enum codes
//! and checks the domain invariants before building the public type.
//! Mapping the same input twice always yields equal values.

mod hall;
mod menu;
mod order;
mod restaurant;

pub use hall::{halls, tables};
pub use menu::menu;
pub use order::order;
pub use restaurant::restaurants;

use serde::Deserialize;
use serde_json::Value;

use crate::error::MappingError;

/// Borrow the payload under `key`. When it is missing and the body carries
/// a provider `message`, the request was rejected upstream.
pub(crate) fn envelope<'a>(
    entity: &'static str,
    raw: &'a Value,
    key: &'static str,
) -> Result<&'a Value, MappingError> {
    match raw.get(key) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(rejection(entity, raw).unwrap_or(MappingError::MissingField { entity, field: key })),
    }
}

pub(crate) fn rejection(entity: &'static str, raw: &Value) -> Option<MappingError> {
    raw.get("message")
        .and_then(Value::as_str)
        .map(|message| MappingError::Rejected {
            entity,
            message: message.to_string(),
        })
}

pub(crate) fn decode<'a, T: Deserialize<'a>>(
    entity: &'static str,
    value: &'a Value,
) -> Result<T, MappingError> {
    T::deserialize(value).map_err(|source| MappingError::Shape { entity, source })
}

/// Shape error for a value that serde never saw.
pub(crate) fn malformed(entity: &'static str, message: impl std::fmt::Display) -> MappingError {
    MappingError::Shape {
        entity,
        source: <serde_json::Error as serde::de::Error>::custom(message),
    }
}

/// Decode an integer enum code, failing closed on unknown values.
pub(crate) fn code<T>(
    field: &'static str,
    kind: &'static str,
    value: i64,
    from_code: fn(i64) -> Option<T>,
) -> Result<T, MappingError> {
    from_code(value).ok_or(MappingError::UnknownCode { field, kind, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use serde_json::json;

    #[test]
    fn envelope_reports_missing_key() {
        let err = envelope("halls", &json!({}), "halls").unwrap_err();
        assert!(matches!(err, MappingError::MissingField { field: "halls", .. }));

        let err = envelope("halls", &json!({"halls": null}), "halls").unwrap_err();
        assert!(matches!(err, MappingError::MissingField { .. }));
    }

    #[test]
    fn envelope_surfaces_provider_message() {
        let raw = json!({"status": 0, "message": "Invalid signature"});
        let err = envelope("order", &raw, "order").unwrap_err();
        match err {
            MappingError::Rejected { message, .. } => assert_eq!(message, "Invalid signature"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn code_fails_closed() {
        assert_eq!(
            code("status", OrderStatus::KIND, 3, OrderStatus::from_code).unwrap(),
            OrderStatus::Sent
        );
        let err = code("status", OrderStatus::KIND, 99, OrderStatus::from_code).unwrap_err();
        assert!(matches!(err, MappingError::UnknownCode { value: 99, .. }));
    }
}
