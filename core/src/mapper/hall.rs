use serde::Deserialize;
use serde_json::Value;

use super::{decode, envelope, malformed, rejection};
use crate::coerce::{self, de};
use crate::error::ApiError;
use crate::types::{self, Hall, Table};

const HALL: &str = "hall";
const TABLE: &str = "table";

#[derive(Deserialize)]
struct WireHall {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(deserialize_with = "de::text")]
    title: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    restaurant_id: Option<String>,
    #[serde(default)]
    tables: Option<Vec<WireHallTable>>,
}

/// Table as embedded in a hall listing, already carrying its seat count.
#[derive(Deserialize)]
struct WireHallTable {
    #[serde(flatten)]
    table: WireTable,
    #[serde(default, deserialize_with = "de::optional_text")]
    hall_id: Option<String>,
    #[serde(default, deserialize_with = "de::optional_integer")]
    num_seats: Option<i64>,
}

/// The element that opens a table in a floor-plan section.
#[derive(Deserialize)]
struct WireTable {
    #[serde(deserialize_with = "de::text")]
    id: String,
    #[serde(deserialize_with = "de::integer")]
    number: i64,
    #[serde(rename = "type", deserialize_with = "de::text")]
    kind: String,
    #[serde(deserialize_with = "de::flag")]
    is_time_discount: bool,
    #[serde(deserialize_with = "de::flag")]
    is_time_service: bool,
    #[serde(deserialize_with = "de::number")]
    deposit: f64,
}

#[derive(Deserialize)]
struct WireFloorPlan {
    #[serde(deserialize_with = "de::text")]
    hall_id: String,
    #[serde(default)]
    plain: Value,
}

/// Map a `GET /v010/halls` body.
pub fn halls(raw: &Value) -> Result<Vec<Hall>, ApiError> {
    let list: Vec<WireHall> = decode(HALL, envelope(HALL, raw, "halls")?)?;
    list.into_iter().map(hall).collect()
}

fn hall(wire: WireHall) -> Result<Hall, ApiError> {
    let tables = match wire.tables {
        None => None,
        Some(tables) => Some(
            tables
                .into_iter()
                .map(|t| -> Result<Table, ApiError> {
                    let hall_id = t.hall_id.unwrap_or_else(|| wire.id.clone());
                    let mut table = table(hall_id, t.table)?;
                    table.num_seats = types::count("table.num_seats", t.num_seats.unwrap_or(0))?;
                    Ok(table)
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
    };

    Ok(Hall {
        id: wire.id,
        title: wire.title,
        restaurant_id: wire.restaurant_id,
        tables,
    })
}

/// Map a `GET /v010/halls/{hall_id}` floor plan into its tables.
///
/// Each section of `plain` holds a flat `item` list in which an element
/// with an `id` opens a table and every following element without one is a
/// seat at that table. Seats seen before the first table of a section
/// belong to nothing and are skipped. Tables come out in the order they
/// were opened, section by section.
pub fn tables(raw: &Value) -> Result<Vec<Table>, ApiError> {
    if raw.get("plain").is_none() {
        if let Some(err) = rejection(TABLE, raw) {
            return Err(err.into());
        }
    }
    let plan: WireFloorPlan = decode(TABLE, raw)?;

    let mut tables = Vec::new();
    for section in sections(&plan.plain)? {
        let mut current: Option<Table> = None;
        for item in items(section)? {
            if opens_table(item)? {
                if let Some(done) = current.take() {
                    tables.push(done);
                }
                current = Some(table(plan.hall_id.clone(), decode(TABLE, item)?)?);
            } else if let Some(open) = current.as_mut() {
                open.num_seats += 1;
            }
        }
        // The last table of a section is never closed by a successor.
        if let Some(done) = current.take() {
            tables.push(done);
        }
    }
    Ok(tables)
}

/// `plain` is an object keyed by section, or a bare list when the provider
/// serializes an index-keyed map. Absent means no tables.
fn sections(plain: &Value) -> Result<Vec<&Value>, ApiError> {
    match plain {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map.values().collect()),
        Value::Array(list) => Ok(list.iter().collect()),
        other => Err(malformed(TABLE, format!("`plain` must be an object, got {other}")).into()),
    }
}

fn items(section: &Value) -> Result<&[Value], ApiError> {
    match section.get("item") {
        None | Some(Value::Null) => Ok(&[][..]),
        Some(Value::Array(list)) => Ok(list.as_slice()),
        Some(other) => Err(malformed(TABLE, format!("`item` must be a list, got {other}")).into()),
    }
}

fn opens_table(item: &Value) -> Result<bool, ApiError> {
    let Value::Object(fields) = item else {
        return Err(malformed(TABLE, format!("floor plan item must be an object, got {item}")).into());
    };
    Ok(fields
        .get("id")
        .and_then(coerce::optional_text)
        .flatten()
        .is_some())
}

fn table(hall_id: String, wire: WireTable) -> Result<Table, ApiError> {
    Ok(Table {
        id: wire.id,
        hall_id,
        is_time_discount: wire.is_time_discount,
        is_time_service: wire.is_time_service,
        deposit: types::non_negative("table.deposit", wire.deposit)?,
        number: wire.number,
        kind: wire.kind,
        num_seats: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use serde_json::json;

    fn start(id: &str, number: i64) -> Value {
        json!({
            "id": id,
            "number": number,
            "type": "round",
            "is_time_discount": false,
            "is_time_service": false,
            "deposit": 0.0
        })
    }

    fn seats(tables: &[Table]) -> Vec<(&str, u32)> {
        tables.iter().map(|t| (t.id.as_str(), t.num_seats)).collect()
    }

    #[test]
    fn counts_seats_and_flushes_trailing_table() {
        let raw = json!({
            "hall_id": "h-1",
            "plain": {"0": {"item": [
                {"id": "t1", "number": 1, "type": "round", "is_time_discount": false, "is_time_service": false, "deposit": 0.0},
                {}, {},
                {"id": "t2", "number": 2, "type": "square", "is_time_discount": false, "is_time_service": false, "deposit": 0.0},
                {}
            ]}}
        });
        let tables = tables(&raw).unwrap();
        assert_eq!(seats(&tables), vec![("t1", 2), ("t2", 1)]);
        assert_eq!(tables[1].kind, "square");
        assert!(tables.iter().all(|t| t.hall_id == "h-1"));
    }

    #[test]
    fn sections_are_concatenated_in_wire_order() {
        let raw = json!({
            "hall_id": "h-1",
            "plain": {
                "9": {"item": [start("a", 1), {}]},
                "1": {"item": [start("b", 2), {}, {}, {}]}
            }
        });
        let tables = tables(&raw).unwrap();
        assert_eq!(seats(&tables), vec![("a", 1), ("b", 3)]);
    }

    #[test]
    fn table_without_seats_is_kept() {
        let raw = json!({"hall_id": "h-1", "plain": {"0": {"item": [start("a", 1), start("b", 2)]}}});
        assert_eq!(seats(&tables(&raw).unwrap()), vec![("a", 0), ("b", 0)]);
    }

    #[test]
    fn leading_seats_are_skipped() {
        let raw = json!({"hall_id": "h-1", "plain": {"0": {"item": [{}, {}, start("a", 1), {}]}}});
        assert_eq!(seats(&tables(&raw).unwrap()), vec![("a", 1)]);
    }

    #[test]
    fn empty_id_counts_as_seat() {
        let raw = json!({"hall_id": "h-1", "plain": {"0": {"item": [start("a", 1), {"id": ""}, {"id": null}]}}});
        assert_eq!(seats(&tables(&raw).unwrap()), vec![("a", 2)]);
    }

    #[test]
    fn empty_plan_gives_no_tables() {
        assert!(tables(&json!({"hall_id": "h-1", "plain": []})).unwrap().is_empty());
        assert!(tables(&json!({"hall_id": "h-1"})).unwrap().is_empty());
    }

    #[test]
    fn coerces_string_numbers() {
        let raw = json!({"hall_id": 7, "plain": {"0": {"item": [
            {"id": 15, "number": "4", "type": "round", "is_time_discount": 0, "is_time_service": "1", "deposit": "50000"}
        ]}}});
        let tables = tables(&raw).unwrap();
        assert_eq!(tables[0].id, "15");
        assert_eq!(tables[0].hall_id, "7");
        assert_eq!(tables[0].number, 4);
        assert!(tables[0].is_time_service);
        assert_eq!(tables[0].deposit, 50000.0);
    }

    #[test]
    fn incomplete_table_is_a_mapping_error() {
        let raw = json!({"hall_id": "h-1", "plain": {"0": {"item": [{"id": "t1", "number": 1}]}}});
        let err = tables(&raw).unwrap_err();
        assert!(matches!(err, ApiError::Mapping(MappingError::Shape { entity: "table", .. })));
    }

    #[test]
    fn maps_hall_listing() {
        let raw = json!({"halls": [
            {"id": "h-1", "title": "Main", "restaurant_id": "r-1"},
            {"id": "h-2", "title": "Terrace", "restaurant_id": null, "tables": [
                {"id": "t9", "number": 9, "type": "round", "is_time_discount": false,
                 "is_time_service": false, "deposit": 0, "num_seats": "6"}
            ]}
        ]});
        let halls = halls(&raw).unwrap();
        assert_eq!(halls.len(), 2);
        assert_eq!(halls[0].restaurant_id.as_deref(), Some("r-1"));
        assert!(halls[0].tables.is_none());
        let tables = halls[1].tables.as_ref().unwrap();
        assert_eq!(tables[0].hall_id, "h-2");
        assert_eq!(tables[0].num_seats, 6);
    }

    #[test]
    fn mapping_is_idempotent() {
        let raw = json!({"hall_id": "h-1", "plain": {"0": {"item": [start("a", 1), {}, start("b", 2)]}}});
        assert_eq!(tables(&raw).unwrap(), tables(&raw).unwrap());
    }
}
