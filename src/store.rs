//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::alerts::AlertLists;
use crate::edit_session::{EditController, PantryRow, RowKind};
use crate::models::{CookedItem, Ingredient, Meal, SlotValue, WeekPlan};
use crate::planner::patch_slot;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Plan of the selected week, as last fetched (plus optimistic patches)
    pub week_plan: WeekPlan,
    /// Ingredient table rows
    pub ingredients: Vec<PantryRow>,
    /// Cooked dishes table rows
    pub cooked: Vec<PantryRow>,
    /// Next key handed to a pantry row
    pub next_row_key: u32,
    /// The single inline edit session
    pub edit: EditController,
    /// Alert feed split by tab
    pub alerts: AlertLists,
}

impl AppState {
    pub fn new(ingredients: &[Ingredient], cooked: &[CookedItem]) -> Self {
        let mut key = 0;
        let mut next = || {
            key += 1;
            key
        };
        let ingredients = ingredients
            .iter()
            .map(|i| PantryRow::from_ingredient(next(), i))
            .collect();
        let cooked = cooked
            .iter()
            .map(|c| PantryRow::from_cooked(next(), c))
            .collect();
        Self {
            ingredients,
            cooked,
            next_row_key: key + 1,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

fn with_rows_mut(store: &AppStore, kind: RowKind, f: impl FnOnce(&mut Vec<PantryRow>)) {
    match kind {
        RowKind::Ingredient => f(&mut store.ingredients().write()),
        RowKind::Cooked => f(&mut store.cooked().write()),
    }
}

/// Find a row by key in either table
pub fn store_find_row(store: &AppStore, key: u32) -> Option<PantryRow> {
    store
        .ingredients()
        .with_untracked(|rows| rows.iter().find(|r| r.key == key).cloned())
        .or_else(|| {
            store
                .cooked()
                .with_untracked(|rows| rows.iter().find(|r| r.key == key).cloned())
        })
}

/// Append a blank row and return it
pub fn store_push_placeholder(store: &AppStore, kind: RowKind) -> PantryRow {
    let key = store.next_row_key().get_untracked();
    store.next_row_key().set(key + 1);
    let row = PantryRow::placeholder(key, kind);
    with_rows_mut(store, kind, |rows| rows.push(row.clone()));
    row
}

/// Replace a row by key
pub fn store_update_row(store: &AppStore, updated: PantryRow) {
    with_rows_mut(store, updated.kind, |rows| {
        if let Some(row) = rows.iter_mut().find(|r| r.key == updated.key) {
            *row = updated;
        }
    });
}

/// Remove a row by key from either table
pub fn store_remove_row(store: &AppStore, key: u32) {
    store.ingredients().write().retain(|r| r.key != key);
    store.cooked().write().retain(|r| r.key != key);
}

/// Optimistically set a slot of the loaded week
pub fn store_patch_slot(store: &AppStore, day: &str, meal: Meal, value: SlotValue) {
    let patched = patch_slot(&mut store.week_plan().write(), day, meal, value);
    if !patched {
        log::warn!("[planner] {day} is not in the loaded week");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rows_get_unique_keys() {
        let ing = Ingredient {
            name: "Milk".into(),
            default_quantity: 1.0,
            unit: "l".into(),
            tags: vec!["dairy".into()],
            data_expirare: "01-01-2026".into(),
        };
        let cooked = CookedItem {
            name: "Soup".into(),
            date_cooked: "01-01-2026".into(),
            servings: 2.0,
            unit: "portion".into(),
        };
        let state = AppState::new(&[ing.clone(), ing], &[cooked]);
        let keys: Vec<u32> = state
            .ingredients
            .iter()
            .chain(state.cooked.iter())
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(state.next_row_key, 4);
        assert_eq!(state.cooked[0].kind, RowKind::Cooked);
    }
}
