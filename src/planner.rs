//! Week Grid Logic
//!
//! How a slot is shown, which buttons it gets, and the optimistic patches the
//! grid applies before the server's answer arrives.

use chrono::NaiveDate;

use crate::api::recipe_href;
use crate::config::RecipeCatalog;
use crate::dates::parse_slot_date;
use crate::models::{DayPlan, Meal, SlotValue, WeekPlan};

pub const PAST_TITLE: &str = "Past date — editing disabled";

/// Where a day sits relative to today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStatus {
    pub is_past: bool,
    pub is_today: bool,
}

/// Unparseable dates are treated as editable and not today.
pub fn day_status(date: &str, today: NaiveDate) -> DayStatus {
    match parse_slot_date(date) {
        Some(d) => DayStatus {
            is_past: d < today,
            is_today: d == today,
        },
        None => DayStatus::default(),
    }
}

/// `Monday (12.10.2026)`
pub fn day_label(day: &str, date: &str) -> String {
    format!("{day} ({date})")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotDisplay {
    Dash,
    Link { name: String, href: String },
    Cooked(String),
}

pub fn slot_display(slot: &SlotValue) -> SlotDisplay {
    match slot {
        SlotValue::Empty => SlotDisplay::Dash,
        SlotValue::Planned(name) => SlotDisplay::Link {
            name: name.clone(),
            href: recipe_href(name),
        },
        SlotValue::Cooked(name) if name.is_empty() => SlotDisplay::Cooked("(Cooked)".to_string()),
        SlotValue::Cooked(name) => SlotDisplay::Cooked(format!("{name} (Cooked)")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotButton {
    /// Cooked slots are frozen
    None,
    Add { disabled: bool },
    Actions,
}

pub fn slot_button(slot: &SlotValue, status: DayStatus) -> SlotButton {
    match slot {
        SlotValue::Cooked(_) => SlotButton::None,
        SlotValue::Empty => SlotButton::Add { disabled: status.is_past },
        SlotValue::Planned(_) => SlotButton::Actions,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Edit,
    Cook,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub action: MenuAction,
    pub label: &'static str,
    pub danger: bool,
    pub disabled: bool,
}

/// Entries of the `Actions ▾` menu. Cooking is only possible on the day itself.
pub fn menu_items(status: DayStatus) -> [MenuItem; 3] {
    [
        MenuItem {
            action: MenuAction::Edit,
            label: "Edit",
            danger: false,
            disabled: status.is_past,
        },
        MenuItem {
            action: MenuAction::Cook,
            label: "Cook",
            danger: false,
            disabled: !status.is_today || status.is_past,
        },
        MenuItem {
            action: MenuAction::Delete,
            label: "Delete",
            danger: true,
            disabled: status.is_past,
        },
    ]
}

/// Sum of calories per serving over the day's filled slots, cooked included.
pub fn day_calories(day: &DayPlan, catalog: &RecipeCatalog) -> f64 {
    Meal::ALL
        .iter()
        .filter_map(|meal| day.slot(*meal).recipe_name())
        .map(|name| catalog.calories(name))
        .sum()
}

/// Optimistically set one slot. Returns false when the day is not loaded.
pub fn patch_slot(plan: &mut WeekPlan, day: &str, meal: Meal, value: SlotValue) -> bool {
    match plan.days.get_mut(day) {
        Some(d) => {
            *d.slot_mut(meal) = value;
            true
        }
        None => false,
    }
}

/// Slot value for a recipe picked in the modal (`-` clears).
pub fn picked_value(recipe: &str) -> SlotValue {
    let recipe = recipe.trim();
    if recipe.is_empty() || recipe == "-" {
        SlotValue::Empty
    } else {
        SlotValue::Planned(recipe.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn plan() -> WeekPlan {
        serde_json::from_str(
            r#"{"meta":{"week":42,"year":2026},"days":{
                "Friday":{"date":"16.10.2026","breakfast":"-","lunch":"Pasta","dinner":{"name":"Soup","cooked":true}}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn cooked_slot_has_label_and_no_buttons() {
        let slot = SlotValue::Cooked("X".into());
        assert_eq!(slot_display(&slot), SlotDisplay::Cooked("X (Cooked)".into()));
        assert_eq!(slot_button(&slot, DayStatus::default()), SlotButton::None);

        let nameless = SlotValue::Cooked(String::new());
        assert_eq!(slot_display(&nameless), SlotDisplay::Cooked("(Cooked)".into()));
        assert_eq!(slot_button(&nameless, DayStatus::default()), SlotButton::None);
    }

    #[test]
    fn empty_slot_gets_single_add() {
        let past = day_status("01.10.2026", today());
        assert!(past.is_past);
        assert_eq!(slot_button(&SlotValue::Empty, past), SlotButton::Add { disabled: true });
        let now = day_status("16.10.2026", today());
        assert_eq!(slot_button(&SlotValue::Empty, now), SlotButton::Add { disabled: false });
    }

    #[test]
    fn planned_slot_gets_actions_menu() {
        let slot = SlotValue::Planned("Pasta".into());
        let future = day_status("20.10.2026", today());
        assert_eq!(slot_button(&slot, future), SlotButton::Actions);
        assert_eq!(
            slot_display(&slot),
            SlotDisplay::Link { name: "Pasta".into(), href: "/recipe/Pasta".into() }
        );
        let items = menu_items(future);
        assert!(!items[0].disabled);
        assert!(items[1].disabled, "cook only today");
        assert!(items[2].danger && !items[2].disabled);
    }

    #[test]
    fn cook_enabled_today_and_past_locks_everything() {
        let items = menu_items(day_status("16.10.2026", today()));
        assert!(!items[1].disabled);
        let items = menu_items(day_status("15.10.2026", today()));
        assert!(items.iter().all(|i| i.disabled));
    }

    #[test]
    fn calories_follow_optimistic_delete() {
        let catalog = RecipeCatalog::parse(
            r#"[{"name":"Pasta","calories_per_serving":500},{"name":"Soup","calories_per_serving":150}]"#,
        );
        let mut plan = plan();
        assert_eq!(day_calories(plan.day("Friday").unwrap(), &catalog), 650.0);
        assert!(patch_slot(&mut plan, "Friday", Meal::Lunch, SlotValue::Empty));
        assert_eq!(day_calories(plan.day("Friday").unwrap(), &catalog), 150.0);
        assert!(!patch_slot(&mut plan, "Sunday", Meal::Lunch, SlotValue::Empty));
    }

    #[test]
    fn picker_dash_clears() {
        assert_eq!(picked_value("-"), SlotValue::Empty);
        assert_eq!(picked_value(" Pasta "), SlotValue::Planned("Pasta".into()));
        assert_eq!(day_label("Friday", "16.10.2026"), "Friday (16.10.2026)");
    }
}
