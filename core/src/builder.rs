//! Request builders: domain request values in, provider JSON out.
//!
//! Builders borrow the caller's value and never modify it. Credentials are
//! passed in explicitly so the same DTO can be sent by different clients.

use serde_json::{json, Value};

use crate::error::{ApiError, ValidationError};
use crate::signature::Credentials;
use crate::types::{self, CancelOrderDto, CreateOrderCourse, CreateOrderDto};

/// `{course_id, count, description}`.
pub fn create_order_course(course: &CreateOrderCourse) -> Result<Value, ApiError> {
    types::not_blank("course_id", &course.course_id)?;
    if course.count == 0 {
        return Err(ValidationError::BelowMinimum {
            field: "count",
            min: 1,
            value: 0,
        }
        .into());
    }
    Ok(json!({
        "course_id": course.course_id,
        "count": course.count,
        "description": course.description,
    }))
}

/// Body of `POST /v3/orders`.
pub fn create_order(order: &CreateOrderDto, credentials: &Credentials) -> Result<Value, ApiError> {
    types::not_blank("restaurant_id", &order.restaurant_id)?;
    types::not_blank("contact_name", &order.contact_name)?;
    types::non_negative("total_price", order.total_price)?;
    if order.courses.is_empty() {
        return Err(ValidationError::Empty { field: "courses" }.into());
    }
    let courses = order
        .courses
        .iter()
        .map(create_order_course)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "api_key": credentials.api_key(),
        "sig": credentials.signature(),
        "restaurant_id": order.restaurant_id,
        "order": {
            "address": order.address,
            "amount_order": order.total_price,
            "description": order.description,
            "order_type": order.order_type.code(),
            "payment_method": order.payment_method.code(),
            "payment_type": order.payment_type.code(),
            "people_count": order.people_count,
            "contact": order.contact_name,
            "phone": order.contact_phone,
            "courses": courses,
        },
    }))
}

/// Body of `POST /v3/orders/{order_id}/cancel`. The order id travels in the
/// path, not here.
pub fn cancel_order(cancellation: &CancelOrderDto, credentials: &Credentials) -> Result<Value, ApiError> {
    types::not_blank("order_id", &cancellation.order_id)?;
    Ok(json!({
        "api_key": credentials.api_key(),
        "sig": credentials.signature(),
        "cancellation_reason": cancellation.cancellation_reason,
    }))
}
