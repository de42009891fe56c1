use serde::Serialize;

/// A dining hall within a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Hall {
    pub id: String,
    pub title: String,
    pub restaurant_id: Option<String>,
    pub tables: Option<Vec<Table>>,
}

/// A table in a hall. `num_seats` is not sent by the provider; it is
/// counted from the seat entries that follow the table on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Table {
    pub id: String,
    pub hall_id: String,
    pub is_time_discount: bool,
    pub is_time_service: bool,
    pub deposit: f64,
    pub number: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub num_seats: u32,
}
