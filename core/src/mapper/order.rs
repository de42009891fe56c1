use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use super::{code, decode, envelope};
use crate::coerce::de;
use crate::error::{ApiError, MappingError};
use crate::types::{
    self, CancellationType, Order, OrderCourse, OrderStatus, OrderType, PaymentMethod, PaymentType,
};

const ENTITY: &str = "order";

#[derive(Deserialize)]
struct WireOrder {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    address: Option<String>,
    #[serde(deserialize_with = "de::number")]
    amount_order: f64,
    #[serde(default, deserialize_with = "de::optional_text")]
    cancellation_reason: Option<String>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    cancellation_type: Option<i64>,
    #[serde(deserialize_with = "de::text")]
    contact: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    phone: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    courier_name: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    courier_phone: Option<String>,
    #[serde(deserialize_with = "de::text")]
    date_time: String,
    #[serde(deserialize_with = "de::number")]
    delivery_price: f64,
    #[serde(default, deserialize_with = "de::optional_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "de::number_or_default")]
    discount: f64,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_cancellation_confirmed: bool,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_delivery_in_cash: bool,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_payed: bool,
    #[serde(default, deserialize_with = "de::optional_integer")]
    number: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    order_type: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    payment_method: Option<i64>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    payment_type: Option<i64>,
    #[serde(deserialize_with = "de::integer")]
    people_count: i64,
    #[serde(deserialize_with = "de::text")]
    restaurant_id: String,
    #[serde(deserialize_with = "de::integer")]
    status: i64,
    #[serde(deserialize_with = "de::text")]
    work_date: String,
    courses: Vec<WireOrderCourse>,
}

#[derive(Deserialize)]
struct WireOrderCourse {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(deserialize_with = "de::number")]
    count: f64,
    #[serde(deserialize_with = "de::number")]
    course_amount: f64,
    #[serde(deserialize_with = "de::text")]
    course_id: String,
    #[serde(deserialize_with = "de::number")]
    course_price: f64,
    #[serde(default, deserialize_with = "de::optional_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_exception: bool,
}

/// Map a `/v3/orders` body (create, get and cancel all answer with one).
pub fn order(raw: &Value) -> Result<Order, ApiError> {
    let wire: WireOrder = decode(ENTITY, envelope(ENTITY, raw, "order")?)?;

    let courses = wire
        .courses
        .into_iter()
        .map(course)
        .collect::<Result<_, _>>()?;

    Ok(Order {
        id: wire.id,
        address: wire.address,
        total_price: types::non_negative("order.amount_order", wire.amount_order)?,
        cancellation_reason: wire.cancellation_reason,
        cancellation_type: optional_code(
            "cancellation_type",
            CancellationType::KIND,
            wire.cancellation_type,
            CancellationType::from_code,
        )?,
        contact_name: wire.contact,
        contact_phone: wire.phone,
        courier_name: wire.courier_name,
        courier_phone: wire.courier_phone,
        created_at: wire.date_time,
        delivery_price: types::non_negative("order.delivery_price", wire.delivery_price)?,
        description: wire.description,
        discount: types::non_negative("order.discount", wire.discount)?,
        is_cancellation_confirmed: wire.is_cancellation_confirmed,
        is_delivery_in_cash: wire.is_delivery_in_cash,
        is_paid: wire.is_payed,
        number: wire.number,
        order_type: optional_code("order_type", OrderType::KIND, wire.order_type, OrderType::from_code)?,
        payment_method: optional_code(
            "payment_method",
            PaymentMethod::KIND,
            wire.payment_method,
            PaymentMethod::from_code,
        )?,
        payment_type: optional_code(
            "payment_type",
            PaymentType::KIND,
            wire.payment_type,
            PaymentType::from_code,
        )?,
        people_count: types::count("order.people_count", wire.people_count)?,
        restaurant_id: wire.restaurant_id,
        status: code("status", OrderStatus::KIND, wire.status, OrderStatus::from_code)?,
        work_date: work_date(&wire.work_date)?,
        courses,
    })
}

fn course(wire: WireOrderCourse) -> Result<OrderCourse, ApiError> {
    Ok(OrderCourse {
        id: wire.id,
        count: types::non_negative("order_course.count", wire.count)?,
        price: types::non_negative("order_course.course_amount", wire.course_amount)?,
        course_id: wire.course_id,
        course_price: types::non_negative("order_course.course_price", wire.course_price)?,
        description: wire.description,
        is_exception: wire.is_exception,
    })
}

/// Absent codes take the enum's default; present ones must be known.
fn optional_code<T: Default>(
    field: &'static str,
    kind: &'static str,
    value: Option<i64>,
    from_code: fn(i64) -> Option<T>,
) -> Result<T, MappingError> {
    value.map_or_else(|| Ok(T::default()), |v| code(field, kind, v, from_code))
}

fn work_date(value: &str) -> Result<NaiveDate, MappingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| MappingError::InvalidDate {
        field: "work_date",
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_json() -> Value {
        json!({"order": {
            "id": "o-1",
            "address": "Navoi 12",
            "amount_order": "45000",
            "cancellation_reason": null,
            "cancellation_type": null,
            "contact": "Aziz",
            "phone": "+998901234567",
            "courier_name": "",
            "courier_phone": null,
            "date_time": "2024-03-01 12:30:00",
            "delivery_price": 5000,
            "description": "",
            "discount": null,
            "is_cancellation_confirmed": false,
            "is_delivery_in_cash": true,
            "is_payed": 0,
            "number": "17",
            "order_type": 0,
            "payment_method": 1,
            "payment_type": "1",
            "people_count": "2",
            "restaurant_id": "r-1",
            "status": 1,
            "work_date": "2024-03-01",
            "courses": [
                {"id": "oc-1", "count": "2", "course_amount": "40000", "course_id": "c-1",
                 "course_price": 20000, "description": null, "is_exception": false},
                {"id": "oc-2", "count": 1.5, "course_amount": 3000.0, "course_id": "c-2",
                 "course_price": "2000"}
            ]
        }})
    }

    #[test]
    fn maps_renamed_and_coerced_fields() {
        let order = order(&order_json()).unwrap();
        assert_eq!(order.id, "o-1");
        assert_eq!(order.total_price, 45000.0);
        assert_eq!(order.contact_name, "Aziz");
        assert_eq!(order.contact_phone.as_deref(), Some("+998901234567"));
        assert_eq!(order.courier_name, None);
        assert_eq!(order.created_at, "2024-03-01 12:30:00");
        assert_eq!(order.discount, 0.0);
        assert!(order.is_delivery_in_cash);
        assert!(!order.is_paid);
        assert_eq!(order.number, Some(17));
        assert_eq!(order.cancellation_type, CancellationType::Restaurant);
        assert_eq!(order.payment_method, PaymentMethod::Online);
        assert_eq!(order.payment_type, PaymentType::Card);
        assert_eq!(order.people_count, 2);
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.work_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn maps_courses_in_order() {
        let order = order(&order_json()).unwrap();
        assert_eq!(order.courses.len(), 2);
        assert_eq!(order.courses[0].count, 2.0);
        assert_eq!(order.courses[0].price, 40000.0);
        assert_eq!(order.courses[1].count, 1.5);
        assert_eq!(order.courses[1].course_price, 2000.0);
        assert!(!order.courses[1].is_exception);
    }

    #[test]
    fn unknown_status_fails_closed() {
        let mut raw = order_json();
        raw["order"]["status"] = json!(99);
        let err = order(&raw).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Mapping(MappingError::UnknownCode { field: "status", value: 99, .. })
        ));
    }

    #[test]
    fn unknown_optional_code_fails_closed() {
        let mut raw = order_json();
        raw["order"]["payment_type"] = json!(7);
        let err = order(&raw).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Mapping(MappingError::UnknownCode { field: "payment_type", .. })
        ));
    }

    #[test]
    fn missing_status_is_an_error() {
        let mut raw = order_json();
        raw["order"].as_object_mut().unwrap().remove("status");
        assert!(matches!(
            order(&raw).unwrap_err(),
            ApiError::Mapping(MappingError::Shape { .. })
        ));
    }

    #[test]
    fn bad_work_date_is_an_error() {
        let mut raw = order_json();
        raw["order"]["work_date"] = json!("01.03.2024");
        assert!(matches!(
            order(&raw).unwrap_err(),
            ApiError::Mapping(MappingError::InvalidDate { .. })
        ));
    }

    #[test]
    fn negative_course_count_is_a_validation_error() {
        let mut raw = order_json();
        raw["order"]["courses"][0]["count"] = json!("-1");
        assert!(matches!(order(&raw).unwrap_err(), ApiError::Validation(_)));
    }

    #[test]
    fn missing_order_envelope_is_an_error() {
        assert!(matches!(
            order(&json!({"orders": []})).unwrap_err(),
            ApiError::Mapping(MappingError::MissingField { field: "order", .. })
        ));
    }

    #[test]
    fn mapping_is_idempotent() {
        let raw = order_json();
        assert_eq!(order(&raw).unwrap(), order(&raw).unwrap());
    }
}
