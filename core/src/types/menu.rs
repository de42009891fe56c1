use serde::Serialize;
use url::Url;

/// A restaurant's menu, grouped by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct Menu {
    pub categories: Vec<MenuCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct MenuCategory {
    pub title: String,
    pub courses: Vec<MenuCategoryCourse>,
}

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[non_exhaustive]
pub struct MenuCategoryCourse {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub price_for_online_order: f64,
    pub is_exception: bool,
    pub is_online_order: bool,
    pub is_vegetarian: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<Url>,
    /// Portions left in stock; zero when the provider does not track it.
    pub count_left: u32,
}

impl Menu {
    /// Iterate over every course of every category, in menu order.
    pub fn courses(&self) -> impl Iterator<Item = &MenuCategoryCourse> {
        self.categories.iter().flat_map(|c| c.courses.iter())
    }

    /// Look up a course by id.
    pub fn course(&self, id: &str) -> Option<&MenuCategoryCourse> {
        self.courses().find(|c| c.id == id)
    }
}
