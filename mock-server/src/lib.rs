//! In-memory stand-in for the Jowi provider API.
//!
//! Serves the catalog endpoints from fixtures and keeps orders in a map.
//! Every endpoint checks `api_key`/`sig` the way the provider does and
//! answers failures with the provider's `{"status": 0, "message": ...}` body.

pub mod fixtures;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";

const ORDER_NEW: i64 = 0;
const ORDER_CANCELLED: i64 = 2;
const CANCELLED_BY_CLIENT: i64 = 1;

pub type Db = Arc<RwLock<HashMap<String, Value>>>;

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    sig: Arc<str>,
    orders: Db,
}

#[derive(Deserialize)]
pub struct Auth {
    pub api_key: Option<String>,
    pub sig: Option<String>,
    pub restaurant_id: Option<String>,
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Provider signature: first 10 and last 5 hex chars of
/// `sha256(api_key + api_secret)`.
pub fn sign(api_key: &str, api_secret: &str) -> String {
    let digest = hex::encode(Sha256::digest(format!("{api_key}{api_secret}").as_bytes()));
    format!("{}{}", &digest[..10], &digest[digest.len() - 5..])
}

pub fn app() -> Router {
    app_with_credentials(API_KEY, API_SECRET)
}

pub fn app_with_credentials(api_key: &str, api_secret: &str) -> Router {
    let state = AppState {
        api_key: api_key.into(),
        sig: sign(api_key, api_secret).into(),
        orders: Arc::new(RwLock::new(HashMap::new())),
    };
    Router::new()
        .route("/v010/restaurants", get(list_restaurants))
        .route("/v010/restaurants/{restaurant_id}", get(restaurant_menu))
        .route("/v010/halls", get(list_halls))
        .route("/v010/halls/{hall_id}", get(hall_floor_plan))
        .route("/v3/orders", post(create_order))
        .route("/v3/orders/{order_id}", get(get_order))
        .route("/v3/orders/{order_id}/cancel", post(cancel_order))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"status": 0, "message": message})))
}

fn authorize(state: &AppState, api_key: Option<&str>, sig: Option<&str>) -> Result<(), (StatusCode, Json<Value>)> {
    if api_key != Some(&*state.api_key) || sig != Some(&*state.sig) {
        return Err(failure(StatusCode::FORBIDDEN, "Invalid api_key or sig"));
    }
    Ok(())
}

fn require_restaurant(restaurant_id: Option<&str>) -> Result<(), (StatusCode, Json<Value>)> {
    match restaurant_id {
        Some(fixtures::RESTAURANT_ID) => Ok(()),
        Some(_) => Err(failure(StatusCode::NOT_FOUND, "Restaurant not found")),
        None => Err(failure(StatusCode::BAD_REQUEST, "restaurant_id is required")),
    }
}

async fn list_restaurants(State(state): State<AppState>, Query(auth): Query<Auth>) -> Reply {
    authorize(&state, auth.api_key.as_deref(), auth.sig.as_deref())?;
    Ok(Json(json!({"status": 1, "restaurants": fixtures::restaurants()})))
}

async fn restaurant_menu(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
    Query(auth): Query<Auth>,
) -> Reply {
    authorize(&state, auth.api_key.as_deref(), auth.sig.as_deref())?;
    let categories = fixtures::menu(&restaurant_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Restaurant not found"))?;
    Ok(Json(json!({"status": 1, "id": restaurant_id, "categories": categories})))
}

async fn list_halls(State(state): State<AppState>, Query(auth): Query<Auth>) -> Reply {
    authorize(&state, auth.api_key.as_deref(), auth.sig.as_deref())?;
    let restaurant_id = auth.restaurant_id.unwrap_or_default();
    Ok(Json(json!({"status": 1, "halls": fixtures::halls(&restaurant_id)})))
}

async fn hall_floor_plan(
    State(state): State<AppState>,
    Path(hall_id): Path<String>,
    Query(auth): Query<Auth>,
) -> Reply {
    authorize(&state, auth.api_key.as_deref(), auth.sig.as_deref())?;
    require_restaurant(auth.restaurant_id.as_deref())?;
    let plain = fixtures::floor_plan(&hall_id).ok_or_else(|| failure(StatusCode::NOT_FOUND, "Hall not found"))?;
    Ok(Json(json!({"status": 1, "hall_id": hall_id, "plain": plain})))
}

async fn create_order(State(state): State<AppState>, Json(body): Json<Value>) -> Reply {
    authorize(&state, body["api_key"].as_str(), body["sig"].as_str())?;
    require_restaurant(body["restaurant_id"].as_str())?;

    let request = &body["order"];
    let mut courses = Vec::new();
    for line in request["courses"].as_array().into_iter().flatten() {
        let course_id = line["course_id"].as_str().unwrap_or_default();
        let count = line["count"].as_u64().unwrap_or(0);
        let price = fixtures::course_price(course_id)
            .ok_or_else(|| failure(StatusCode::UNPROCESSABLE_ENTITY, "Unknown course"))?;
        if count == 0 {
            return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "Course count must be positive"));
        }
        // The provider echoes counts and amounts back as strings.
        courses.push(json!({
            "id": Uuid::new_v4().to_string(),
            "count": count.to_string(),
            "course_amount": (price * count as f64).to_string(),
            "course_id": course_id,
            "course_price": price,
            "description": line["description"],
            "is_exception": false
        }));
    }
    if courses.is_empty() {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "Order has no courses"));
    }

    let now = chrono::Local::now();
    let mut orders = state.orders.write().await;
    let order = json!({
        "id": Uuid::new_v4().to_string(),
        "address": request["address"],
        "amount_order": request["amount_order"].to_string(),
        "cancellation_reason": null,
        "cancellation_type": null,
        "contact": request["contact"],
        "phone": request["phone"],
        "courier_name": "",
        "courier_phone": null,
        "date_time": now.format("%Y-%m-%d %H:%M:%S").to_string(),
        "delivery_price": "0",
        "description": request["description"],
        "discount": null,
        "is_cancellation_confirmed": false,
        "is_delivery_in_cash": request["payment_method"] == 0,
        "is_payed": 0,
        "number": (orders.len() + 1).to_string(),
        "order_type": request["order_type"],
        "payment_method": request["payment_method"],
        "payment_type": request["payment_type"],
        "people_count": request["people_count"],
        "restaurant_id": body["restaurant_id"],
        "status": ORDER_NEW,
        "work_date": now.format("%Y-%m-%d").to_string(),
        "courses": courses
    });
    let id = order["id"].as_str().unwrap_or_default().to_string();
    orders.insert(id, order.clone());
    Ok(Json(json!({"status": 1, "order": order})))
}

async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Query(auth): Query<Auth>,
) -> Reply {
    authorize(&state, auth.api_key.as_deref(), auth.sig.as_deref())?;
    require_restaurant(auth.restaurant_id.as_deref())?;
    let orders = state.orders.read().await;
    let order = orders
        .get(&order_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Order not found"))?;
    Ok(Json(json!({"status": 1, "order": order})))
}

async fn cancel_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    authorize(&state, body["api_key"].as_str(), body["sig"].as_str())?;
    let mut orders = state.orders.write().await;
    let order = orders
        .get_mut(&order_id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "Order not found"))?;
    if order["status"] == ORDER_CANCELLED {
        return Err(failure(StatusCode::CONFLICT, "Order is already cancelled"));
    }
    order["status"] = json!(ORDER_CANCELLED);
    order["cancellation_type"] = json!(CANCELLED_BY_CLIENT);
    order["cancellation_reason"] = body["cancellation_reason"].clone();
    Ok(Json(json!({"status": 1, "order": order})))
}
