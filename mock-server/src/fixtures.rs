//! Canned provider data in the provider's own wire shapes: numbers as
//! strings, `0`/`1` booleans, blank strings for missing values, and floor
//! plans flattened into table-then-seats runs.

use serde_json::{json, Value};

pub const RESTAURANT_ID: &str = "r-1";

pub fn restaurants() -> Value {
    json!([
        {
            "id": RESTAURANT_ID,
            "title": "Plov Center",
            "phone_numbers": "+998711234567,+998901112233",
            "website": "https://plov.uz",
            "restaurant_type": "restaurant",
            "address": "Amir Temur 1",
            "latitude": "41.311081",
            "longitude": "69.240562",
            "country": "Uzbekistan",
            "city": "Tashkent",
            "is_online_order_enabled": 1,
            "is_online_reserve_enabled": false,
            "work_timetable": [
                {"day_code": 1, "open_time": "09:00", "close_time": "23:00", "day_off": false},
                {"day_code": 7, "open_time": "00:00", "close_time": "00:00", "day_off": true}
            ],
            "images": [{"url": "https://cdn.jowi.club/r-1/hall.jpg"}]
        },
        {
            "id": "r-2",
            "title": "Lagman House",
            "phone_numbers": "",
            "website": null,
            "restaurant_type": null,
            "address": "",
            "latitude": 41.29,
            "longitude": 69.21,
            "country": "Uzbekistan",
            "city": null,
            "work_timetable": {"day_code": "1", "open_time": "10:00", "close_time": "22:00", "day_off": 0},
            "images": []
        }
    ])
}

pub fn menu(restaurant_id: &str) -> Option<Value> {
    if restaurant_id != RESTAURANT_ID {
        return None;
    }
    Some(json!([
        {
            "title": "Main",
            "courses": [
                {
                    "id": "c-1", "title": "Plov", "price": "25000", "price_for_online_order": "26000",
                    "is_exception": false, "online_order": true, "is_vegetarian": false,
                    "description": "Tashkent style", "image_url": "https://cdn.jowi.club/c-1.png",
                    "count_left": null
                },
                {
                    "id": "c-2", "title": "Lagman", "price": 22000, "price_for_online_order": 22000,
                    "is_exception": false, "is_vegetarian": false,
                    "description": "", "image_url": null, "count_left": "12"
                }
            ]
        },
        {
            "title": "Drinks",
            "courses": [
                {
                    "id": "c-3", "title": "Green tea", "price": "5000", "price_for_online_order": "5000",
                    "is_exception": 0, "online_order": 1, "is_vegetarian": true, "count_left": 40
                }
            ]
        }
    ]))
}

/// Price of a course on the fixture menu.
pub fn course_price(course_id: &str) -> Option<f64> {
    let categories = menu(RESTAURANT_ID)?;
    categories
        .as_array()?
        .iter()
        .filter_map(|category| category["courses"].as_array())
        .flatten()
        .find(|course| course["id"] == course_id)
        .and_then(|course| match &course["price"] {
            Value::String(s) => s.parse().ok(),
            other => other.as_f64(),
        })
}

pub fn halls(restaurant_id: &str) -> Value {
    if restaurant_id != RESTAURANT_ID {
        return json!([]);
    }
    json!([
        {"id": "h-1", "title": "Main hall", "restaurant_id": RESTAURANT_ID},
        {"id": "h-2", "title": "Terrace", "restaurant_id": RESTAURANT_ID}
    ])
}

/// Floor plan of a hall: each table element is followed by one empty
/// element per seat.
pub fn floor_plan(hall_id: &str) -> Option<Value> {
    match hall_id {
        "h-1" => Some(json!({
            "0": {"item": [
                table("t-1", "1", "round"), {}, {}, {}, {},
                table("t-2", "2", "square"), {}, {}
            ]},
            "1": {"item": [
                table("t-3", "3", "rectangle"), {}, {}, {}, {}, {}, {}
            ]}
        })),
        "h-2" => Some(json!([])),
        _ => None,
    }
}

fn table(id: &str, number: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "type": kind,
        "is_time_discount": 0,
        "is_time_service": false,
        "deposit": "0",
        "x": 10,
        "y": 20
    })
}
