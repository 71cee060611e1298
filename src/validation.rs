//! Form Validation
//!
//! Client-side checks run before a pantry row is submitted. Each kind checks
//! its fields in a fixed order and stops at the first failure.

use crate::dates::is_display_date;
use crate::error::ValidationError;
use crate::models::{CookedItem, Ingredient};
use crate::tags::normalize_tag;

/// Parse a finite number; blank or non-numeric text is rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Raw ingredient form fields (expiration already in `DD-MM-YYYY`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientInput<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    pub unit: &'a str,
    pub expiration: &'a str,
    pub tag: &'a str,
}

/// Raw cooked form fields (date already in `DD-MM-YYYY`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookedInput<'a> {
    pub name: &'a str,
    pub date: &'a str,
    pub servings: &'a str,
    pub unit: &'a str,
}

pub fn validate_ingredient(input: &IngredientInput<'_>) -> Result<Ingredient, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let quantity = parse_number(input.quantity).ok_or(ValidationError::QuantityNotNumber)?;
    let unit = input.unit.trim();
    if unit.is_empty() {
        return Err(ValidationError::UnitRequired);
    }
    let expiration = input.expiration.trim();
    if !is_display_date(expiration) {
        return Err(ValidationError::ExpirationFormat);
    }
    if input.tag.trim().is_empty() {
        return Err(ValidationError::TagRequired);
    }

    Ok(Ingredient {
        name: name.to_string(),
        default_quantity: quantity,
        unit: unit.to_string(),
        tags: vec![normalize_tag(input.tag)],
        data_expirare: expiration.to_string(),
    })
}

pub fn validate_cooked(input: &CookedInput<'_>) -> Result<CookedItem, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let date = input.date.trim();
    if !is_display_date(date) {
        return Err(ValidationError::CookedDateFormat);
    }
    let servings = parse_number(input.servings).ok_or(ValidationError::ServingsNotNumber)?;
    let unit = input.unit.trim();
    if unit.is_empty() {
        return Err(ValidationError::UnitRequired);
    }

    Ok(CookedItem {
        name: name.to_string(),
        date_cooked: date.to_string(),
        servings,
        unit: unit.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk<'a>() -> IngredientInput<'a> {
        IngredientInput {
            name: "Milk",
            quantity: "2",
            unit: "l",
            expiration: "05-03-2025",
            tag: "Dairy",
        }
    }

    #[test]
    fn valid_ingredient_normalizes_tag() {
        let ing = validate_ingredient(&milk()).unwrap();
        assert_eq!(ing.tags, vec!["dairy".to_string()]);
        assert_eq!(ing.default_quantity, 2.0);
    }

    #[test]
    fn unknown_tag_becomes_other() {
        let ing = validate_ingredient(&IngredientInput { tag: "snacks", ..milk() }).unwrap();
        assert_eq!(ing.tags, vec!["other".to_string()]);
    }

    #[test]
    fn ingredient_checks_in_order() {
        let bad = IngredientInput { name: " ", quantity: "x", unit: "", expiration: "", tag: "" };
        assert_eq!(validate_ingredient(&bad), Err(ValidationError::NameRequired));
        let bad = IngredientInput { quantity: "abc", unit: "", ..milk() };
        assert_eq!(validate_ingredient(&bad), Err(ValidationError::QuantityNotNumber));
        let bad = IngredientInput { unit: " ", expiration: "bad", ..milk() };
        assert_eq!(validate_ingredient(&bad), Err(ValidationError::UnitRequired));
        let bad = IngredientInput { expiration: "01-13-2025", tag: "", ..milk() };
        assert_eq!(validate_ingredient(&bad), Err(ValidationError::ExpirationFormat));
        let bad = IngredientInput { tag: "  ", ..milk() };
        assert_eq!(validate_ingredient(&bad), Err(ValidationError::TagRequired));
    }

    #[test]
    fn blank_and_infinite_quantities_rejected() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(" 1.5 "), Some(1.5));
    }

    #[test]
    fn cooked_checks_date_before_servings() {
        let bad = CookedInput { name: "Soup", date: "1-1-2025", servings: "x", unit: "" };
        assert_eq!(validate_cooked(&bad), Err(ValidationError::CookedDateFormat));
        let bad = CookedInput { name: "Soup", date: "05-03-2025", servings: "x", unit: "" };
        assert_eq!(validate_cooked(&bad), Err(ValidationError::ServingsNotNumber));
        let bad = CookedInput { name: "Soup", date: "05-03-2025", servings: "2", unit: "" };
        assert_eq!(validate_cooked(&bad), Err(ValidationError::UnitRequired));
        let ok = CookedInput { name: "Soup", date: "05-03-2025", servings: "2", unit: "portion" };
        assert_eq!(validate_cooked(&ok).map(|c| c.servings), Ok(2.0));
    }
}
