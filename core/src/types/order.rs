use chrono::NaiveDate;
use serde::Serialize;

use super::{CancellationType, OrderStatus, OrderType, PaymentMethod, PaymentType};

/// An order as reported back by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Order {
    pub id: String,
    pub address: Option<String>,
    pub total_price: f64,
    pub cancellation_reason: Option<String>,
    pub cancellation_type: CancellationType,
    pub contact_name: String,
    pub contact_phone: Option<String>,
    pub courier_name: Option<String>,
    pub courier_phone: Option<String>,
    /// Provider timestamp, passed through verbatim.
    pub created_at: String,
    pub delivery_price: f64,
    pub description: Option<String>,
    pub discount: f64,
    pub is_cancellation_confirmed: bool,
    pub is_delivery_in_cash: bool,
    pub is_paid: bool,
    pub number: Option<i64>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub people_count: u32,
    pub restaurant_id: String,
    pub status: OrderStatus,
    pub work_date: NaiveDate,
    pub courses: Vec<OrderCourse>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct OrderCourse {
    pub id: String,
    pub count: f64,
    pub price: f64,
    pub course_id: String,
    pub course_price: f64,
    pub description: Option<String>,
    pub is_exception: bool,
}

/// Request payload for placing a new order.
///
/// Credentials are not part of the payload; the client supplies them when
/// the request is built.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderDto {
    pub restaurant_id: String,
    pub address: Option<String>,
    pub total_price: f64,
    pub description: Option<String>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub people_count: u32,
    pub contact_name: String,
    pub contact_phone: String,
    pub courses: Vec<CreateOrderCourse>,
}

/// One line of a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderCourse {
    pub course_id: String,
    pub count: u32,
    pub description: Option<String>,
}

/// Request payload for cancelling an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrderDto {
    pub order_id: String,
    pub cancellation_reason: String,
}

impl CreateOrderDto {
    /// A delivery order paid in cash on delivery, with no courses yet.
    pub fn new(
        restaurant_id: impl Into<String>,
        contact_name: impl Into<String>,
        contact_phone: impl Into<String>,
        people_count: u32,
        total_price: f64,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            address: None,
            total_price,
            description: None,
            order_type: OrderType::default(),
            payment_method: PaymentMethod::default(),
            payment_type: PaymentType::default(),
            people_count,
            contact_name: contact_name.into(),
            contact_phone: contact_phone.into(),
            courses: Vec::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = order_type;
        self
    }

    pub fn with_payment(mut self, method: PaymentMethod, kind: PaymentType) -> Self {
        self.payment_method = method;
        self.payment_type = kind;
        self
    }

    pub fn with_course(mut self, course: CreateOrderCourse) -> Self {
        self.courses.push(course);
        self
    }
}

impl CreateOrderCourse {
    pub fn new(course_id: impl Into<String>, count: u32) -> Self {
        Self {
            course_id: course_id.into(),
            count,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl CancelOrderDto {
    pub fn new(order_id: impl Into<String>, cancellation_reason: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            cancellation_reason: cancellation_reason.into(),
        }
    }
}

impl Order {
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}
