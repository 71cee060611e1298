//! Report Endpoints
//!
//! Nutrition totals, shopping-list size and recipe availability.

use super::get_json;
use crate::error::ApiError;
use crate::models::{AvailableRecipes, NutritionReport, ShoppingListSummary};

pub fn nutrition_url(week: u32, year: i32) -> String {
    format!("/api/nutrition?week={week}&year={year}")
}

/// `skip_past=1` only matters for the current ISO week.
pub fn shopping_list_url(week: Option<u32>, current_week: u32) -> String {
    match week {
        Some(w) if w == current_week => format!("/api/shopping-list?week={w}&skip_past=1"),
        Some(w) => format!("/api/shopping-list?week={w}"),
        None => "/api/shopping-list?skip_past=1".to_string(),
    }
}

pub async fn fetch_nutrition(week: u32, year: i32) -> Result<NutritionReport, ApiError> {
    get_json(&nutrition_url(week, year)).await
}

pub async fn fetch_shopping_list(week: Option<u32>, current_week: u32) -> Result<ShoppingListSummary, ApiError> {
    get_json(&shopping_list_url(week, current_week)).await
}

pub async fn fetch_available_recipes() -> Result<AvailableRecipes, ApiError> {
    get_json("/api/recipes/available").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopping_list_skips_past_only_for_current_week() {
        assert_eq!(shopping_list_url(Some(42), 42), "/api/shopping-list?week=42&skip_past=1");
        assert_eq!(shopping_list_url(Some(43), 42), "/api/shopping-list?week=43");
        assert_eq!(shopping_list_url(None, 42), "/api/shopping-list?skip_past=1");
    }

    #[test]
    fn nutrition_query() {
        assert_eq!(nutrition_url(1, 2026), "/api/nutrition?week=1&year=2026");
    }
}
