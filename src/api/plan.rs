//! Plan Endpoints
//!
//! Week plan fetches, slot updates, cooking, randomize and reset.

use chrono::NaiveDate;
use gloo_net::http::Method;

use super::{encode, get_empty, get_json, post_form, query, send_json, send_json_unit};
use crate::dates::to_ymd;
use crate::error::ApiError;
use crate::models::{CookRequest, Meal, RandomizeRequest, RandomizeResponse, SlotRecipe, WeekPlan};

/// Recipe value that clears a slot
pub const EMPTY_RECIPE: &str = "-";

pub fn week_url(monday: NaiveDate) -> String {
    format!("/get_week?start={}", to_ymd(monday))
}

pub fn recipe_href(name: &str) -> String {
    format!("/recipe/{}", encode(name))
}

pub fn slot_recipe_url(day: &str, meal: Meal, week: u32, year: i32) -> String {
    format!(
        "/api/plan/slot-recipe?{}",
        query(&[
            ("day", day.to_string()),
            ("meal", meal.as_str().to_string()),
            ("week", week.to_string()),
            ("year", year.to_string()),
        ])
    )
}

pub fn reset_week_url(week: u32, year: i32) -> String {
    format!("/reset_week?week={week}&year={year}")
}

pub fn export_pdf_url(week: u32, year: i32) -> String {
    format!("/export_pdf?week={week}&year={year}")
}

/// Form body of `/update_meal`
pub fn update_meal_fields(day: &str, meal: Meal, recipe: &str, week: u32, year: i32) -> Vec<(&'static str, String)> {
    vec![
        ("day", day.to_string()),
        ("meal", meal.as_str().to_string()),
        ("recipe", recipe.to_string()),
        ("week", week.to_string()),
        ("year", year.to_string()),
    ]
}

pub async fn fetch_week(monday: NaiveDate) -> Result<WeekPlan, ApiError> {
    get_json(&week_url(monday)).await
}

pub async fn update_meal(day: &str, meal: Meal, recipe: &str, week: u32, year: i32) -> Result<(), ApiError> {
    post_form("/update_meal", &update_meal_fields(day, meal, recipe, week, year)).await
}

pub async fn fetch_slot_recipe(day: &str, meal: Meal, week: u32, year: i32) -> Result<SlotRecipe, ApiError> {
    get_json(&slot_recipe_url(day, meal, week, year)).await
}

pub async fn cook_slot(request: &CookRequest) -> Result<(), ApiError> {
    send_json_unit(Method::POST, "/api/cook", request).await
}

pub async fn randomize_custom(request: &RandomizeRequest) -> Result<RandomizeResponse, ApiError> {
    send_json(Method::POST, "/randomize_custom", request).await
}

pub async fn reset_week(week: u32, year: i32) -> Result<(), ApiError> {
    get_empty(&reset_week_url(week, year)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_urls() {
        let monday = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
        assert_eq!(week_url(monday), "/get_week?start=2026-10-12");
        assert_eq!(recipe_href("Pui cu orez"), "/recipe/Pui%20cu%20orez");
        assert_eq!(
            slot_recipe_url("Monday", Meal::Lunch, 42, 2026),
            "/api/plan/slot-recipe?day=Monday&meal=lunch&week=42&year=2026"
        );
        assert_eq!(export_pdf_url(42, 2026), "/export_pdf?week=42&year=2026");
    }

    #[test]
    fn clearing_a_slot_sends_dash() {
        let fields = update_meal_fields("Friday", Meal::Dinner, EMPTY_RECIPE, 42, 2026);
        assert_eq!(query(&fields), "day=Friday&meal=dinner&recipe=-&week=42&year=2026");
    }
}
