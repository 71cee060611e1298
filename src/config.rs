//! Page Configuration
//!
//! Timing constants and the bootstrap values the server renders into the page.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{CookedItem, Ingredient};

/// Nutrition auto-refresh period
pub const NUTRITION_REFRESH_MS: u32 = 30_000;
/// Delay before the first scheduled nutrition refresh
pub const NUTRITION_INITIAL_DELAY_MS: u32 = 4_000;
pub const TOAST_LIFETIME_MS: u32 = 2_500;
/// Cook panel stays visible this long after a successful cook
pub const COOK_CLOSE_DELAY_MS: u32 = 900;
/// Pantry rows within this many days get highlighted
pub const EXPIRING_SOON_DAYS: i64 = 10;

/// First and last day offered by the week dropdown
pub fn week_range() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default(),
    )
}

/// Which page the server rendered us into (`<body data-page>`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppView {
    #[default]
    Planner,
    Pantry,
    PantryEdit,
}

impl AppView {
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "pantry" => AppView::Pantry,
            "pantry-edit" | "pantry_edit" => AppView::PantryEdit,
            _ => AppView::Planner,
        }
    }
}

/// One recipe from `#recipes-json`
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary {
    pub name: String,
    pub calories_per_serving: f64,
    pub image: Option<String>,
}

/// Recipe name -> calories per serving, plus the ordered list for the picker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCatalog {
    pub recipes: Vec<RecipeSummary>,
    kcal: HashMap<String, f64>,
}

fn number_of(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl RecipeCatalog {
    /// Parse the `data-recipes` JSON array. Entries without a name are skipped.
    pub fn parse(raw: &str) -> Self {
        let entries = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => Vec::new(),
            Err(e) => {
                log::warn!("[config] recipes-json is not valid JSON: {e}");
                Vec::new()
            }
        };

        let recipes: Vec<RecipeSummary> = entries
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|obj| {
                let name = obj.get("name")?.as_str()?.trim();
                if name.is_empty() {
                    return None;
                }
                let calories = number_of(obj.get("calories_per_serving"))
                    .or_else(|| number_of(obj.get("kalories_per_serving")))
                    .filter(|c| c.is_finite())
                    .unwrap_or(0.0);
                let image = obj
                    .get("image")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Some(RecipeSummary {
                    name: name.to_string(),
                    calories_per_serving: calories,
                    image,
                })
            })
            .collect();

        let kcal = recipes
            .iter()
            .map(|r| (r.name.clone(), r.calories_per_serving))
            .collect();
        Self { recipes, kcal }
    }

    /// Calories per serving; unknown recipes count as 0.
    pub fn calories(&self, name: &str) -> f64 {
        self.kcal.get(name).copied().unwrap_or(0.0)
    }
}

/// Decode a JSON array, dropping entries that do not fit `T`.
pub fn parse_rows<T: DeserializeOwned>(raw: &str) -> Vec<T> {
    match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(values) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        Err(e) => {
            log::warn!("[config] pantry seed is not a JSON array: {e}");
            Vec::new()
        }
    }
}

/// Values read once from the document at start-up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageConfig {
    pub view: AppView,
    pub week: Option<u32>,
    pub year: Option<i32>,
    pub catalog: RecipeCatalog,
    pub ingredients: Vec<Ingredient>,
    pub cooked: Vec<CookedItem>,
}

impl PageConfig {
    pub fn from_attrs(page: Option<&str>, week: Option<&str>, year: Option<&str>, recipes: Option<&str>) -> Self {
        Self {
            view: page.map(AppView::from_attr).unwrap_or_default(),
            week: week.and_then(|w| w.trim().parse().ok()).filter(|w| (1..=53).contains(w)),
            year: year.and_then(|y| y.trim().parse().ok()),
            catalog: recipes.map(RecipeCatalog::parse).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn with_pantry(mut self, ingredients: Option<&str>, cooked: Option<&str>) -> Self {
        self.ingredients = ingredients.map(parse_rows).unwrap_or_default();
        self.cooked = cooked.map(parse_rows).unwrap_or_default();
        self
    }

    pub fn from_document() -> Self {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("[config] no document available");
            return Self::default();
        };
        let body = document.body();
        let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));
        let data = |id: &str, name: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.get_attribute(name))
        };

        let config = Self::from_attrs(
            attr("data-page").as_deref(),
            attr("data-week").as_deref(),
            attr("data-year").as_deref(),
            data("recipes-json", "data-recipes").as_deref(),
        )
        .with_pantry(
            data("pantry-json", "data-ingredients").as_deref(),
            data("pantry-json", "data-cooked").as_deref(),
        );
        log::debug!(
            "[config] view={:?} week={:?} year={:?} recipes={} ingredients={} cooked={}",
            config.view,
            config.week,
            config.year,
            config.catalog.recipes.len(),
            config.ingredients.len(),
            config.cooked.len()
        );
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_tolerant() {
        let catalog = RecipeCatalog::parse(
            r#"[
                {"name":"Pasta","calories_per_serving":450},
                {"name":"Soup","kalories_per_serving":"120.5"},
                {"name":"Salad","calories_per_serving":"lots"},
                {"calories_per_serving":99},
                "junk",
                {"name":"  "}
            ]"#,
        );
        assert_eq!(catalog.recipes.len(), 3);
        assert_eq!(catalog.calories("Pasta"), 450.0);
        assert_eq!(catalog.calories("Soup"), 120.5);
        assert_eq!(catalog.calories("Salad"), 0.0);
        assert_eq!(catalog.calories("Unknown"), 0.0);
    }

    #[test]
    fn catalog_survives_bad_json() {
        assert!(RecipeCatalog::parse("{not json").recipes.is_empty());
        assert!(RecipeCatalog::parse(r#"{"name":"x"}"#).recipes.is_empty());
    }

    #[test]
    fn page_attrs() {
        let cfg = PageConfig::from_attrs(Some("pantry-edit"), Some("42"), Some("2026"), None);
        assert_eq!(cfg.view, AppView::PantryEdit);
        assert_eq!((cfg.week, cfg.year), (Some(42), Some(2026)));

        let cfg = PageConfig::from_attrs(None, Some("x"), Some(""), None);
        assert_eq!(cfg.view, AppView::Planner);
        assert_eq!((cfg.week, cfg.year), (None, None));
    }

    #[test]
    fn pantry_seed_skips_bad_rows() {
        let cfg = PageConfig::default().with_pantry(
            Some(r#"[{"name":"Milk","default_quantity":1,"unit":"l","tags":["dairy"],"data_expirare":"01-01-2026"},{"unit":"g"}]"#),
            Some("oops"),
        );
        assert_eq!(cfg.ingredients.len(), 1);
        assert!(cfg.cooked.is_empty());
    }
}
