//! Jowi API client.
//!
//! # Design
//! `JowiClient` holds the base URL, the signed credentials and one
//! transport, and nothing else. Every operation is split in two: a
//! `build_*` method that produces an `HttpRequest` plan, and the operation
//! itself, which sends that plan through the transport and hands the JSON to
//! the matching mapper. The signature is computed once in `new` and reused
//! for the lifetime of the client.

use serde_json::Value;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::builder;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::mapper;
use crate::signature::Credentials;
use crate::transport::UreqTransport;
use crate::types::{CancelOrderDto, CreateOrderDto, Hall, Menu, Order, Restaurant, Table};

const CATALOG: &str = "v010";
const ORDERS: &str = "v3";

/// Typed client for the Jowi restaurant API.
#[derive(Debug, Clone)]
pub struct JowiClient<T = UreqTransport> {
    base_url: String,
    credentials: Credentials,
    transport: T,
}

impl JowiClient<UreqTransport> {
    /// Client over the bundled `ureq` transport.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(config, UreqTransport::with_timeout(config.timeout))
    }

    /// Run `f` against a client whose connection pool lives exactly as long
    /// as the call, including when `f` returns early with an error.
    pub fn scoped<R>(config: &ClientConfig, f: impl FnOnce(&Self) -> R) -> R {
        let client = Self::connect(config);
        debug!(base_url = %client.base_url, "session opened");
        let result = f(&client);
        drop(client);
        debug!("session closed");
        result
    }
}

impl<T> JowiClient<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::new(config.api_key.clone(), &config.api_secret),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_list_restaurants(&self) -> HttpRequest {
        self.get(format!("/{CATALOG}/restaurants"), &[])
    }

    pub fn build_list_restaurant_menu(&self, restaurant_id: &str) -> HttpRequest {
        self.get(format!("/{CATALOG}/restaurants/{}", segment(restaurant_id)), &[])
    }

    pub fn build_list_restaurant_halls(&self, restaurant_id: &str) -> HttpRequest {
        self.get(
            format!("/{CATALOG}/halls"),
            &[("restaurant_id", restaurant_id)],
        )
    }

    pub fn build_list_hall_tables(&self, hall_id: &str, restaurant_id: &str) -> HttpRequest {
        self.get(
            format!("/{CATALOG}/halls/{}", segment(hall_id)),
            &[("restaurant_id", restaurant_id)],
        )
    }

    pub fn build_create_order(&self, order: &CreateOrderDto) -> Result<HttpRequest, ApiError> {
        let body = builder::create_order(order, &self.credentials)?;
        Ok(self.post(format!("/{ORDERS}/orders"), body))
    }

    pub fn build_get_order(&self, order_id: &str, restaurant_id: &str) -> HttpRequest {
        self.get(
            format!("/{ORDERS}/orders/{}", segment(order_id)),
            &[("restaurant_id", restaurant_id)],
        )
    }

    pub fn build_cancel_order(&self, cancellation: &CancelOrderDto) -> Result<HttpRequest, ApiError> {
        let body = builder::cancel_order(cancellation, &self.credentials)?;
        Ok(self.post(
            format!("/{ORDERS}/orders/{}/cancel", segment(&cancellation.order_id)),
            body,
        ))
    }

    fn get(&self, path: String, extra: &[(&str, &str)]) -> HttpRequest {
        let mut query = self.credentials.query();
        query.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{path}", self.base_url),
            query,
            headers: Vec::new(),
            body: None,
        }
    }

    fn post(&self, path: String, body: Value) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{path}", self.base_url),
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

impl<T: Transport> JowiClient<T> {
    /// Send a request plan and return the raw provider JSON.
    #[instrument(skip_all, fields(method = ?request.method, url = %request.url))]
    pub fn execute(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        debug!("sending request");
        Ok(request.send(&self.transport)?)
    }

    pub fn list_restaurants(&self) -> Result<Vec<Restaurant>, ApiError> {
        let raw = self.execute(&self.build_list_restaurants())?;
        let restaurants = mapper::restaurants(&raw)?;
        debug!(count = restaurants.len(), "mapped restaurants");
        Ok(restaurants)
    }

    pub fn list_restaurant_menu(&self, restaurant_id: &str) -> Result<Menu, ApiError> {
        let raw = self.execute(&self.build_list_restaurant_menu(restaurant_id))?;
        let menu = mapper::menu(&raw)?;
        debug!(categories = menu.categories.len(), "mapped menu");
        Ok(menu)
    }

    pub fn list_restaurant_halls(&self, restaurant_id: &str) -> Result<Vec<Hall>, ApiError> {
        let raw = self.execute(&self.build_list_restaurant_halls(restaurant_id))?;
        let halls = mapper::halls(&raw)?;
        debug!(count = halls.len(), "mapped halls");
        Ok(halls)
    }

    pub fn list_hall_tables(&self, hall_id: &str, restaurant_id: &str) -> Result<Vec<Table>, ApiError> {
        let raw = self.execute(&self.build_list_hall_tables(hall_id, restaurant_id))?;
        let tables = mapper::tables(&raw)?;
        debug!(count = tables.len(), "mapped tables");
        Ok(tables)
    }

    pub fn create_order(&self, order: &CreateOrderDto) -> Result<Order, ApiError> {
        let raw = self.execute(&self.build_create_order(order)?)?;
        mapper::order(&raw)
    }

    pub fn get_order(&self, order_id: &str, restaurant_id: &str) -> Result<Order, ApiError> {
        let raw = self.execute(&self.build_get_order(order_id, restaurant_id))?;
        mapper::order(&raw)
    }

    pub fn cancel_order(&self, cancellation: &CancelOrderDto) -> Result<Order, ApiError> {
        let raw = self.execute(&self.build_cancel_order(cancellation)?)?;
        mapper::order(&raw)
    }
}

/// Escape an id for use as a single path segment. Form encoding turns
/// spaces into `+`, which a path does not decode, so those become `%20`.
fn segment(id: &str) -> String {
    form_urlencoded::byte_serialize(id.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}
