use serde::Deserialize;
use serde_json::Value;

use super::{decode, rejection};
use crate::coerce::de;
use crate::error::ApiError;
use crate::types::{self, Menu, MenuCategory, MenuCategoryCourse};

const ENTITY: &str = "menu";

#[derive(Deserialize)]
struct WireMenu {
    #[serde(default)]
    categories: Option<Vec<WireCategory>>,
}

#[derive(Deserialize)]
struct WireCategory {
    #[serde(deserialize_with = "de::text")]
    title: String,
    #[serde(default)]
    courses: Option<Vec<WireCourse>>,
}

#[derive(Deserialize)]
struct WireCourse {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(deserialize_with = "de::text")]
    title: String,
    #[serde(deserialize_with = "de::number")]
    price: f64,
    #[serde(deserialize_with = "de::number")]
    price_for_online_order: f64,
    #[serde(deserialize_with = "de::flag")]
    is_exception: bool,
    #[serde(default, deserialize_with = "de::flag_or_default")]
    online_order: bool,
    #[serde(default, deserialize_with = "de::optional_flag")]
    is_vegetarian: Option<bool>,
    #[serde(default, deserialize_with = "de::optional_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "de::optional_text")]
    image_url: Option<String>,
    #[serde(default, deserialize_with = "de::count_left")]
    count_left: i64,
}

/// Map a `GET /v010/restaurants/{id}` body.
pub fn menu(raw: &Value) -> Result<Menu, ApiError> {
    if raw.get("categories").is_none() {
        if let Some(err) = rejection(ENTITY, raw) {
            return Err(err.into());
        }
    }
    let wire: WireMenu = decode(ENTITY, raw)?;
    let categories = wire
        .categories
        .unwrap_or_default()
        .into_iter()
        .map(category)
        .collect::<Result<_, _>>()?;
    Ok(Menu { categories })
}

fn category(wire: WireCategory) -> Result<MenuCategory, ApiError> {
    let courses = wire
        .courses
        .unwrap_or_default()
        .into_iter()
        .map(course)
        .collect::<Result<_, _>>()?;
    Ok(MenuCategory {
        title: wire.title,
        courses,
    })
}

fn course(wire: WireCourse) -> Result<MenuCategoryCourse, ApiError> {
    let image_url = wire
        .image_url
        .as_deref()
        .map(|url| types::web_url("course.image_url", url))
        .transpose()?;

    Ok(MenuCategoryCourse {
        id: wire.id,
        title: wire.title,
        price: types::non_negative("course.price", wire.price)?,
        price_for_online_order: types::non_negative(
            "course.price_for_online_order",
            wire.price_for_online_order,
        )?,
        is_exception: wire.is_exception,
        is_online_order: wire.online_order,
        is_vegetarian: wire.is_vegetarian,
        description: wire.description,
        image_url,
        count_left: types::count("course.count_left", wire.count_left)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MappingError, ValidationError};
    use serde_json::json;

    fn course_json() -> Value {
        json!({
            "id": "c-1",
            "title": "Plov",
            "price": "25000",
            "price_for_online_order": 26000.0,
            "is_exception": false,
            "online_order": true,
            "is_vegetarian": false,
            "description": "Tashkent style",
            "image_url": "https://cdn.jowi.club/c-1.png",
            "count_left": null
        })
    }

    fn menu_with(course: Value) -> Value {
        json!({"categories": [{"title": "Main", "courses": [course]}]})
    }

    #[test]
    fn maps_nested_categories() {
        let menu = menu(&menu_with(course_json())).unwrap();
        assert_eq!(menu.categories.len(), 1);
        assert_eq!(menu.categories[0].title, "Main");
        let c = &menu.categories[0].courses[0];
        assert_eq!(c.price, 25000.0);
        assert!(c.is_online_order);
        assert_eq!(c.is_vegetarian, Some(false));
        assert_eq!(c.count_left, 0);
        assert_eq!(menu.course("c-1"), Some(c));
    }

    #[test]
    fn count_left_coercions() {
        for (wire, expected) in [(json!(null), 0), (json!("7"), 7), (json!(7), 7), (json!("3.6"), 3)] {
            let mut raw = course_json();
            raw["count_left"] = wire;
            let menu = menu(&menu_with(raw)).unwrap();
            assert_eq!(menu.categories[0].courses[0].count_left, expected);
        }
    }

    #[test]
    fn missing_online_order_defaults_to_false() {
        let mut raw = course_json();
        raw.as_object_mut().unwrap().remove("online_order");
        let menu = menu(&menu_with(raw)).unwrap();
        assert!(!menu.categories[0].courses[0].is_online_order);
    }

    #[test]
    fn blank_optionals_are_absent() {
        let mut raw = course_json();
        raw["image_url"] = json!("");
        raw["description"] = json!(null);
        raw.as_object_mut().unwrap().remove("is_vegetarian");
        let menu = menu(&menu_with(raw)).unwrap();
        let c = &menu.categories[0].courses[0];
        assert_eq!(c.image_url, None);
        assert_eq!(c.description, None);
        assert_eq!(c.is_vegetarian, None);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut raw = course_json();
        raw["count_left"] = json!(-2);
        let err = menu(&menu_with(raw)).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::BelowMinimum { field: "course.count_left", .. })
        ));
    }

    #[test]
    fn absent_categories_give_empty_menu() {
        assert!(menu(&json!({})).unwrap().categories.is_empty());
        let menu = menu(&json!({"categories": [{"title": "Drinks"}]})).unwrap();
        assert!(menu.categories[0].courses.is_empty());
    }

    #[test]
    fn error_body_is_not_an_empty_menu() {
        let err = menu(&json!({"status": 0, "message": "Restaurant not found"})).unwrap_err();
        assert!(matches!(err, ApiError::Mapping(MappingError::Rejected { .. })));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut raw = course_json();
        raw["price"] = json!("free");
        let err = menu(&menu_with(raw)).unwrap_err();
        assert!(matches!(err, ApiError::Mapping(MappingError::Shape { .. })));
    }
}
