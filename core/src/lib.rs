//! Typed client for the Jowi restaurant-management API.
//!
//! # Overview
//! Lists restaurants, menus, halls and tables, and creates, fetches and
//! cancels orders. The provider's JSON is loosely typed (numbers as strings,
//! nullable everything, tables flattened into seat runs), so the heart of
//! the crate is the mapping layer that turns it into validated domain
//! values and back.
//!
//! # Design
//! - [`mapper`] and [`builder`] are pure functions over `serde_json::Value`;
//!   they can be used without the client.
//! - [`JowiClient`] signs once, plans each call as an [`HttpRequest`], and
//!   sends it through a [`Transport`] (by default [`UreqTransport`]).
//! - Errors are layered: [`MappingError`], [`ValidationError`] and
//!   [`TransportError`], all wrapped by [`ApiError`].
//!
//! ```no_run
//! use jowi_core::{ClientConfig, JowiClient};
//!
//! let config = ClientConfig::new("api-key", "api-secret");
//! let restaurants = JowiClient::scoped(&config, |client| client.list_restaurants())?;
//! # Ok::<(), jowi_core::ApiError>(())
//! ```

pub mod builder;
pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod http;
pub mod mapper;
pub mod signature;
pub mod transport;
pub mod types;

pub use client::JowiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, MappingError, TransportError, ValidationError};
pub use http::{HttpMethod, HttpRequest, Transport};
pub use signature::{signature, Credentials};
pub use transport::UreqTransport;
pub use types::{
    CancelOrderDto, CancellationType, CreateOrderCourse, CreateOrderDto, Hall, Menu, MenuCategory,
    MenuCategoryCourse, Order, OrderCourse, OrderStatus, OrderType, PaymentMethod, PaymentType,
    Restaurant, Table, WorkingHours,
};
