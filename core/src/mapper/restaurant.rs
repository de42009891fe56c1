use serde::Deserialize;
use serde_json::Value;

use super::{decode, envelope, malformed};
use crate::coerce::de;
use crate::error::{ApiError, ValidationError};
use crate::types::{self, Restaurant, WorkingHours};

const ENTITY: &str = "restaurant";

#[derive(Deserialize)]
struct WireRestaurant {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(deserialize_with = "de::text")]
    title: String,
    #[serde(default, deserialize_with = "de::phone_numbers")]
    phone_numbers: Vec<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    website: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    restaurant_type: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    address: Option<String>,
    #[serde(deserialize_with = "de::number")]
    latitude: f64,
    #[serde(deserialize_with = "de::number")]
    longitude: f64,
    #[serde(deserialize_with = "de::text")]
    country: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    city: Option<String>,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_online_order_enabled: bool,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    is_online_reserve_enabled: bool,
    /// A single object or a list of them.
    #[serde(default)]
    work_timetable: Value,
    #[serde(default)]
    images: Option<Vec<WireImage>>,
}

#[derive(Deserialize)]
struct WireImage {
    #[serde(deserialize_with = "de::text")]
    url: String,
}

#[derive(Deserialize)]
struct WireWorkingHours {
    #[serde(deserialize_with = "de::integer")]
    day_code: i64,
    #[serde(deserialize_with = "de::text")]
    open_time: String,
    #[serde(deserialize_with = "de::text")]
    close_time: String,
    #[serde(deserialize_with = "de::flag")]
    day_off: bool,
}

/// Map a `GET /v010/restaurants` body.
pub fn restaurants(raw: &Value) -> Result<Vec<Restaurant>, ApiError> {
    let list: Vec<WireRestaurant> = decode(ENTITY, envelope(ENTITY, raw, "restaurants")?)?;
    list.into_iter().map(restaurant).collect()
}

fn restaurant(wire: WireRestaurant) -> Result<Restaurant, ApiError> {
    types::not_blank("restaurant.id", &wire.id)?;
    let work_timetable = timetable(&wire.work_timetable)?;
    let images = wire
        .images
        .unwrap_or_default()
        .iter()
        .map(|image| types::web_url("restaurant.images", &image.url))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Restaurant {
        id: wire.id,
        title: wire.title,
        phone_numbers: wire.phone_numbers,
        website: wire.website,
        restaurant_type: wire.restaurant_type,
        address: wire.address,
        latitude: types::within("restaurant.latitude", 90.0, wire.latitude)?,
        longitude: types::within("restaurant.longitude", 180.0, wire.longitude)?,
        country: wire.country,
        city: wire.city,
        is_online_order_enabled: wire.is_online_order_enabled,
        is_online_reserve_enabled: wire.is_online_reserve_enabled,
        work_timetable,
        images,
    })
}

/// Normalize `work_timetable` to a list.
fn timetable(raw: &Value) -> Result<Vec<WorkingHours>, ApiError> {
    const ENTITY: &str = "working hours";

    let wire: Vec<WireWorkingHours> = match raw {
        Value::Null => Vec::new(),
        Value::Array(_) => decode(ENTITY, raw)?,
        Value::Object(_) => vec![decode(ENTITY, raw)?],
        other => return Err(malformed(ENTITY, format!("expected an object or a list, got {other}")).into()),
    };

    wire.into_iter()
        .map(|hours| -> Result<WorkingHours, ApiError> {
            let day = u8::try_from(hours.day_code).map_err(|_| ValidationError::OutOfRange {
                field: "working_hours.day",
                value: hours.day_code as f64,
            })?;
            Ok(WorkingHours {
                day,
                start: hours.open_time,
                end: hours.close_time,
                is_day_off: hours.day_off,
            })
        })
        .collect()
}
