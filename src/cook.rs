//! Cook Panel
//!
//! Load the slot's recipe, let the user adjust used quantities, and turn the
//! inputs into the `/api/cook` overrides.

use crate::models::{format_amount, CookOverride, Meal, SlotRecipe};

/// Integer prefix of `text` the way `parseInt(text, 10)` reads it. Blank,
/// non-numeric and negative input all count as 0.
pub fn parse_used_quantity(text: &str) -> u32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end].parse::<u64>().map_or(u32::MAX, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// One editable ingredient row
#[derive(Debug, Clone, PartialEq)]
pub struct CookLine {
    pub name: String,
    pub unit: String,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CookStatus {
    Loading,
    LoadFailed(String),
    AlreadyCooked(String),
    Ready,
    Cooking,
    Success,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CookPanelState {
    pub day: String,
    pub meal: Meal,
    pub lines: Vec<CookLine>,
    pub status: CookStatus,
}

impl CookPanelState {
    pub fn loading(day: &str, meal: Meal) -> Self {
        Self {
            day: day.to_string(),
            meal,
            lines: Vec::new(),
            status: CookStatus::Loading,
        }
    }

    pub fn title(&self) -> String {
        format!("Cook recipe for {} - {}", self.day, self.meal.as_str())
    }

    pub fn loaded(&mut self, recipe: SlotRecipe) {
        if recipe.already_cooked {
            self.status = CookStatus::AlreadyCooked(recipe.name);
            return;
        }
        self.lines = recipe
            .ingredients
            .into_iter()
            .map(|ing| CookLine {
                input: format_amount(ing.default_quantity),
                unit: ing.unit.unwrap_or_default(),
                name: ing.name,
            })
            .collect();
        self.status = CookStatus::Ready;
    }

    pub fn load_failed(&mut self, message: String) {
        self.status = CookStatus::LoadFailed(message);
    }

    /// Apply the answer of a load started for `day`/`meal`. Answers for
    /// another slot, or arriving once loading is over, are dropped.
    pub fn apply_load(&mut self, day: &str, meal: Meal, result: Result<SlotRecipe, String>) -> bool {
        if self.day != day || self.meal != meal || self.status != CookStatus::Loading {
            return false;
        }
        match result {
            Ok(recipe) => self.loaded(recipe),
            Err(message) => self.load_failed(message),
        }
        true
    }

    pub fn set_input(&mut self, index: usize, value: String) {
        if let Some(line) = self.lines.get_mut(index) {
            line.input = value;
        }
    }

    pub fn finish_enabled(&self) -> bool {
        matches!(self.status, CookStatus::Ready | CookStatus::Failed(_))
    }

    /// Placeholder shown in the table body instead of ingredient rows.
    pub fn body_message(&self) -> Option<String> {
        match &self.status {
            CookStatus::Loading => Some("Loading...".to_string()),
            CookStatus::LoadFailed(m) => Some(format!("Error loading: {m}")),
            CookStatus::AlreadyCooked(name) => Some(format!("Already cooked: {name}")),
            _ if self.lines.is_empty() => Some("No ingredients listed.".to_string()),
            _ => None,
        }
    }

    /// Status line under the table.
    pub fn status_message(&self) -> Option<String> {
        match &self.status {
            CookStatus::Cooking => Some("Cooking...".to_string()),
            CookStatus::Success => Some("Success! Updating plan...".to_string()),
            CookStatus::Failed(m) => Some(format!("Error: {m}")),
            _ => None,
        }
    }

    pub fn overrides(&self) -> Vec<CookOverride> {
        self.lines
            .iter()
            .map(|line| CookOverride {
                name: line.name.clone(),
                used_quantity: parse_used_quantity(&line.input),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeIngredient;

    #[test]
    fn parse_int_semantics() {
        assert_eq!(parse_used_quantity("3"), 3);
        assert_eq!(parse_used_quantity(" 3.7"), 3);
        assert_eq!(parse_used_quantity("12abc"), 12);
        assert_eq!(parse_used_quantity("abc"), 0);
        assert_eq!(parse_used_quantity(""), 0);
        assert_eq!(parse_used_quantity("-4"), 0);
        assert_eq!(parse_used_quantity("+5"), 5);
    }

    #[test]
    fn already_cooked_blocks_finish() {
        let mut state = CookPanelState::loading("Friday", Meal::Lunch);
        assert!(!state.finish_enabled());
        state.loaded(SlotRecipe {
            already_cooked: true,
            name: "Pasta".into(),
            ingredients: vec![],
        });
        assert!(!state.finish_enabled());
        assert_eq!(state.body_message().as_deref(), Some("Already cooked: Pasta"));
    }

    #[test]
    fn overrides_from_inputs() {
        let mut state = CookPanelState::loading("Friday", Meal::Dinner);
        state.loaded(SlotRecipe {
            already_cooked: false,
            name: "Pasta".into(),
            ingredients: vec![
                RecipeIngredient { name: "Pasta".into(), default_quantity: 200.0, unit: Some("g".into()) },
                RecipeIngredient { name: "Salt".into(), default_quantity: 1.5, unit: None },
            ],
        });
        assert_eq!(state.title(), "Cook recipe for Friday - dinner");
        assert!(state.finish_enabled());
        assert_eq!(state.lines[1].input, "1.5");
        state.set_input(0, "-3".into());
        let overrides = state.overrides();
        assert_eq!(overrides[0], CookOverride { name: "Pasta".into(), used_quantity: 0 });
        assert_eq!(overrides[1].used_quantity, 1);
    }

    #[test]
    fn stale_loads_are_dropped() {
        let recipe = |name: &str| SlotRecipe {
            already_cooked: false,
            name: name.into(),
            ingredients: vec![RecipeIngredient { name: "Egg".into(), default_quantity: 2.0, unit: None }],
        };
        // Panel moved on to Saturday breakfast before Friday's answer came back
        let mut state = CookPanelState::loading("Saturday", Meal::Breakfast);
        assert!(!state.apply_load("Friday", Meal::Dinner, Ok(recipe("Pasta"))));
        assert_eq!(state.status, CookStatus::Loading);

        assert!(state.apply_load("Saturday", Meal::Breakfast, Ok(recipe("Omelette"))));
        assert_eq!(state.status, CookStatus::Ready);

        // A late duplicate answer does not overwrite edited inputs
        state.set_input(0, "5".into());
        assert!(!state.apply_load("Saturday", Meal::Breakfast, Err("late".into())));
        assert_eq!(state.lines[0].input, "5");
    }

    #[test]
    fn failed_cook_reenables_finish() {
        let mut state = CookPanelState::loading("Friday", Meal::Dinner);
        state.status = CookStatus::Failed("boom".into());
        assert!(state.finish_enabled());
        assert_eq!(state.status_message().as_deref(), Some("Error: boom"));
    }
}
