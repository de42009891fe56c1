//! Domain model for the Jowi API.
//!
//! # Design
//! These types are independent of the provider's wire format. Response
//! entities are `#[non_exhaustive]` so they can only be produced by the
//! mappers in [`crate::mapper`], which run every coercion and invariant check
//! before handing a value out. Request types (`CreateOrderDto`,
//! `CancelOrderDto`) are plain caller-built values turned into wire JSON by
//! [`crate::builder`].
//!
//! Domain types serialize with `serde` for callers that want to persist or
//! forward them; that form is the domain shape, not the provider's.

mod enums;
mod hall;
mod menu;
mod order;
mod restaurant;

pub use enums::{CancellationType, OrderStatus, OrderType, PaymentMethod, PaymentType};
pub use hall::{Hall, Table};
pub use menu::{Menu, MenuCategory, MenuCategoryCourse};
pub use order::{CancelOrderDto, CreateOrderCourse, CreateOrderDto, Order, OrderCourse};
pub use restaurant::{Restaurant, WorkingHours};

use url::Url;

use crate::error::ValidationError;

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn at_least(field: &'static str, min: i64, value: i64) -> Result<i64, ValidationError> {
    if value < min {
        return Err(ValidationError::BelowMinimum { field, min, value });
    }
    Ok(value)
}

/// Non-negative count that fits the domain's `u32` counters.
pub(crate) fn count(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(at_least(field, 0, value)?).map_err(|_| ValidationError::OutOfRange {
        field,
        value: value as f64,
    })
}

pub(crate) fn within(field: &'static str, limit: f64, value: f64) -> Result<f64, ValidationError> {
    if !(-limit..=limit).contains(&value) {
        return Err(ValidationError::OutOfRange { field, value });
    }
    Ok(value)
}

pub(crate) fn not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

/// Absolute `http`/`https` URL.
pub(crate) fn web_url(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
    };
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(invalid()),
    }
}
