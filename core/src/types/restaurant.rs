use serde::Serialize;
use url::Url;

/// A restaurant registered with the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Restaurant {
    pub id: String,
    pub title: String,
    pub phone_numbers: Vec<String>,
    pub website: Option<String>,
    pub restaurant_type: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub city: Option<String>,
    pub is_online_order_enabled: bool,
    pub is_online_reserve_enabled: bool,
    pub work_timetable: Vec<WorkingHours>,
    pub images: Vec<Url>,
}

/// Opening hours for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct WorkingHours {
    /// Provider day code.
    pub day: u8,
    pub start: String,
    pub end: String,
    pub is_day_off: bool,
}
