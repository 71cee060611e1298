//! Frontend Models
//!
//! Data structures matching the server's JSON payloads.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accept `3`, `3.5`, `"3"` or `""` (-> 0) where the server is loose about
/// numeric fields.
fn lenient_number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(de)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Render a quantity without a trailing `.0`.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// ========================
// Pantry
// ========================

/// Pantry ingredient (body of `/api/pantry/ingredient`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub default_quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub data_expirare: String,
}

impl Ingredient {
    pub fn tag(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("")
    }
}

/// Cooked dish log entry (body of `/api/pantry/cooked`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookedItem {
    pub name: String,
    #[serde(default)]
    pub date_cooked: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub servings: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteRequest<'a> {
    pub names: &'a [String],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub deleted: Vec<String>,
    #[serde(default)]
    pub not_found: Vec<String>,
}

/// One entry of `/api/pantry/alerts`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PantryAlert {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, alias = "default_quantity", deserialize_with = "lenient_number")]
    pub quantity: f64,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub days_left: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsSnapshot {
    #[serde(default)]
    pub events: Vec<PantryAlert>,
    #[serde(default)]
    pub next_cursor: u64,
}

// ========================
// Week plan
// ========================

/// Meal slots within a day, in grid order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Dinner => "dinner",
        }
    }
}

pub const DAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSlot {
    Text(String),
    Entry {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        cooked: bool,
    },
    Other(Value),
}

/// Content of one slot: `"-"`, a recipe name, or a cooked record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<RawSlot>")]
pub enum SlotValue {
    #[default]
    Empty,
    Planned(String),
    Cooked(String),
}

impl From<Option<RawSlot>> for SlotValue {
    fn from(raw: Option<RawSlot>) -> Self {
        match raw {
            Some(RawSlot::Text(s)) if s.is_empty() || s == "-" => SlotValue::Empty,
            Some(RawSlot::Text(s)) => SlotValue::Planned(s),
            Some(RawSlot::Entry { name, cooked: true }) => SlotValue::Cooked(name.unwrap_or_default()),
            Some(RawSlot::Entry { name: Some(name), .. }) if !name.is_empty() => SlotValue::Planned(name),
            _ => SlotValue::Empty,
        }
    }
}

impl SlotValue {
    pub fn recipe_name(&self) -> Option<&str> {
        match self {
            SlotValue::Planned(n) | SlotValue::Cooked(n) if !n.is_empty() => Some(n),
            _ => None,
        }
    }
}

/// One row of the week grid
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DayPlan {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub breakfast: SlotValue,
    #[serde(default)]
    pub lunch: SlotValue,
    #[serde(default)]
    pub dinner: SlotValue,
}

impl DayPlan {
    pub fn slot(&self, meal: Meal) -> &SlotValue {
        match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Dinner => &self.dinner,
        }
    }

    pub fn slot_mut(&mut self, meal: Meal) -> &mut SlotValue {
        match meal {
            Meal::Breakfast => &mut self.breakfast,
            Meal::Lunch => &mut self.lunch,
            Meal::Dinner => &mut self.dinner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WeekRef {
    pub week: u32,
    pub year: i32,
}

/// Payload of `/get_week`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WeekPlan {
    #[serde(default)]
    pub meta: Option<WeekRef>,
    #[serde(default)]
    pub days: HashMap<String, DayPlan>,
}

impl WeekPlan {
    pub fn day(&self, name: &str) -> Option<&DayPlan> {
        self.days.get(name)
    }
}

// ========================
// Cooking
// ========================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub default_quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Payload of `/api/plan/slot-recipe`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotRecipe {
    #[serde(default)]
    pub already_cooked: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookOverride {
    pub name: String,
    pub used_quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CookRequest {
    pub day: String,
    pub meal: String,
    pub week: u32,
    pub year: i32,
    pub overrides: Vec<CookOverride>,
}

// ========================
// Reports
// ========================

/// Calories and macros; accepts the long field spellings some recipes use
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct NutritionTotals {
    #[serde(default, deserialize_with = "lenient_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub protein: f64,
    #[serde(default, alias = "carbohydrates", deserialize_with = "lenient_number")]
    pub carbs: f64,
    #[serde(default, alias = "fat", deserialize_with = "lenient_number")]
    pub fats: f64,
}

/// Payload of `/api/nutrition`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NutritionReport {
    #[serde(default)]
    pub week_totals: NutritionTotals,
    #[serde(default)]
    pub days: HashMap<String, NutritionTotals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListSummary {
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AvailableRecipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub servings: Option<Value>,
    #[serde(default)]
    pub calories: Option<Value>,
    #[serde(default)]
    pub times_possible: u32,
}

/// Payload of `/api/recipes/available`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableRecipes {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub total: Option<usize>,
    #[serde(default)]
    pub recipes: Vec<AvailableRecipe>,
}

impl AvailableRecipes {
    pub fn summary(&self) -> String {
        format!(
            "{} / {} available recipes",
            self.count,
            self.total.unwrap_or(self.recipes.len())
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomizeRequest {
    pub week: u32,
    pub year: i32,
    pub days: Option<Vec<String>>,
    pub replace_existing: bool,
    pub only_available: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RandomizeResponse {
    #[serde(default)]
    pub modified: u32,
}

/// Render a loosely typed JSON cell (`servings`, `calories`) as text.
pub fn value_text(value: &Option<Value>) -> String {
    match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_value_shapes() {
        let day: DayPlan = serde_json::from_str(
            r#"{"date":"16.10.2026","breakfast":"-","lunch":"Pasta","dinner":{"name":"X","cooked":true}}"#,
        )
        .unwrap();
        assert_eq!(day.breakfast, SlotValue::Empty);
        assert_eq!(day.lunch, SlotValue::Planned("Pasta".into()));
        assert_eq!(day.dinner, SlotValue::Cooked("X".into()));
    }

    #[test]
    fn slot_value_tolerates_null_and_missing() {
        let day: DayPlan = serde_json::from_str(r#"{"date":"x","breakfast":null}"#).unwrap();
        assert_eq!(day.breakfast, SlotValue::Empty);
        assert_eq!(day.dinner, SlotValue::Empty);
        let day: DayPlan = serde_json::from_str(r#"{"lunch":{"name":"Soup"}}"#).unwrap();
        assert_eq!(day.lunch, SlotValue::Planned("Soup".into()));
    }

    #[test]
    fn nameless_cooked_slot_stays_cooked() {
        let day: DayPlan = serde_json::from_str(r#"{"dinner":{"cooked":true}}"#).unwrap();
        assert_eq!(day.dinner, SlotValue::Cooked(String::new()));
        assert_eq!(day.dinner.recipe_name(), None);
    }

    #[test]
    fn ingredient_quantity_is_lenient() {
        let ing: Ingredient =
            serde_json::from_str(r#"{"name":"Milk","default_quantity":"","unit":"ml"}"#).unwrap();
        assert_eq!(ing.default_quantity, 0.0);
        assert_eq!(ing.tag(), "");
        let ing: Ingredient = serde_json::from_str(r#"{"name":"Egg","default_quantity":"6"}"#).unwrap();
        assert_eq!(ing.default_quantity, 6.0);
    }

    #[test]
    fn nutrition_accepts_long_macro_names() {
        let t: NutritionTotals =
            serde_json::from_str(r#"{"calories":500,"protein":20,"carbohydrates":60,"fat":10}"#).unwrap();
        assert_eq!((t.carbs, t.fats), (60.0, 10.0));
    }

    #[test]
    fn amounts_drop_trailing_zero() {
        assert_eq!(format_amount(3.0), "3");
        assert_eq!(format_amount(2.5), "2.5");
    }

    #[test]
    fn available_summary_falls_back_to_list_len() {
        let data: AvailableRecipes =
            serde_json::from_str(r#"{"count":1,"recipes":[{"name":"A","times_possible":2}]}"#).unwrap();
        assert_eq!(data.summary(), "1 / 1 available recipes");
    }
}
