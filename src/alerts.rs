//! Pantry Alerts
//!
//! Splits the alert feed into the expiring and low-stock tabs and tracks the
//! bulk-delete selection on the expiring tab.

use std::collections::{BTreeSet, HashMap};

use crate::models::PantryAlert;
use crate::panels::ALERTS_TAB_LOWSTOCK;

pub const NEAR_EXPIRY: &str = "pantry.near_expiry";
pub const LOW_STOCK: &str = "pantry.low_stock";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertLists {
    pub expiring: Vec<PantryAlert>,
    pub low_stock: Vec<PantryAlert>,
}

/// Latest event per ingredient name, ordered by name.
fn latest_by_name<'a>(events: impl Iterator<Item = &'a PantryAlert>) -> Vec<PantryAlert> {
    let mut latest: HashMap<&str, &PantryAlert> = HashMap::new();
    for event in events.filter(|e| !e.name.is_empty()) {
        match latest.get(event.name.as_str()) {
            Some(seen) if seen.id > event.id => {}
            _ => {
                latest.insert(event.name.as_str(), event);
            }
        }
    }
    let mut list: Vec<PantryAlert> = latest.into_values().cloned().collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

impl AlertLists {
    pub fn from_events(events: &[PantryAlert]) -> Self {
        let mut expiring = latest_by_name(events.iter().filter(|e| e.kind == NEAR_EXPIRY));
        // soonest first
        expiring.sort_by_key(|e| e.days_left.unwrap_or(i64::MAX));
        Self {
            expiring,
            low_stock: latest_by_name(events.iter().filter(|e| e.kind == LOW_STOCK)),
        }
    }

    pub fn total(&self) -> usize {
        self.expiring.len() + self.low_stock.len()
    }

    /// Drop ingredients the server reported as deleted from both tabs.
    pub fn remove_deleted(&mut self, deleted: &[String]) {
        self.expiring.retain(|e| !deleted.contains(&e.name));
        self.low_stock.retain(|e| !deleted.contains(&e.name));
    }

    /// Apply a bulk-delete result and prune the selection. Returns the tab to
    /// switch to once nothing expiring is left.
    pub fn apply_bulk_delete(&mut self, deleted: &[String], selection: &mut BulkSelection) -> Option<&'static str> {
        self.remove_deleted(deleted);
        selection.retain_listed(&self.expiring);
        self.expiring.is_empty().then_some(ALERTS_TAB_LOWSTOCK)
    }
}

pub fn expiring_text(days_left: Option<i64>) -> String {
    match days_left {
        Some(d) if d < 0 => "expired".to_string(),
        Some(0) => "today".to_string(),
        Some(1) => "1 day".to_string(),
        Some(d) => format!("{d} days"),
        None => String::new(),
    }
}

/// Look of the select-all checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Names ticked on the expiring tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSelection {
    selected: BTreeSet<String>,
}

impl BulkSelection {
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn set(&mut self, name: &str, on: bool) {
        if on {
            self.selected.insert(name.to_string());
        } else {
            self.selected.remove(name);
        }
    }

    pub fn set_all<'a>(&mut self, names: impl IntoIterator<Item = &'a str>, on: bool) {
        if on {
            self.selected.extend(names.into_iter().map(str::to_string));
        } else {
            self.selected.clear();
        }
    }

    /// Forget names no longer listed.
    pub fn retain_listed(&mut self, listed: &[PantryAlert]) {
        self.selected.retain(|n| listed.iter().any(|a| &a.name == n));
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn state(&self, listed: usize) -> CheckState {
        match self.selected.len() {
            0 => CheckState::Unchecked,
            n if n >= listed => CheckState::Checked,
            _ => CheckState::Indeterminate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: u64, kind: &str, name: &str, days_left: Option<i64>) -> PantryAlert {
        PantryAlert {
            id,
            kind: kind.into(),
            name: name.into(),
            unit: "g".into(),
            quantity: 1.0,
            threshold: None,
            days_left,
        }
    }

    #[test]
    fn split_and_dedupe_keep_latest() {
        let events = vec![
            event(1, NEAR_EXPIRY, "Milk", Some(5)),
            event(2, LOW_STOCK, "Rice", None),
            event(3, NEAR_EXPIRY, "Milk", Some(2)),
            event(4, NEAR_EXPIRY, "Eggs", Some(4)),
            event(5, "other.kind", "Salt", None),
        ];
        let lists = AlertLists::from_events(&events);
        assert_eq!(lists.expiring.len(), 2);
        assert_eq!(lists.expiring[0].name, "Milk");
        assert_eq!(lists.expiring[0].days_left, Some(2));
        assert_eq!(lists.low_stock.len(), 1);
        assert_eq!(lists.total(), 3);
    }

    #[test]
    fn deleted_rows_disappear() {
        let mut lists = AlertLists::from_events(&[
            event(1, NEAR_EXPIRY, "Milk", Some(1)),
            event(2, LOW_STOCK, "Milk", None),
            event(3, LOW_STOCK, "Rice", None),
        ]);
        lists.remove_deleted(&["Milk".to_string()]);
        assert!(lists.expiring.is_empty());
        assert_eq!(lists.total(), 1);
    }

    #[test]
    fn bulk_delete_moves_to_lowstock_when_expiring_empties() {
        let mut lists = AlertLists::from_events(&[
            event(1, NEAR_EXPIRY, "Milk", Some(1)),
            event(2, NEAR_EXPIRY, "Eggs", Some(2)),
            event(3, LOW_STOCK, "Rice", None),
        ]);
        let mut sel = BulkSelection::default();
        sel.set_all(["Milk", "Eggs"], true);

        assert_eq!(lists.apply_bulk_delete(&["Milk".to_string()], &mut sel), None);
        assert_eq!(sel.names(), vec!["Eggs".to_string()]);

        assert_eq!(lists.apply_bulk_delete(&["Eggs".to_string()], &mut sel), Some("lowstock"));
        assert!(sel.is_empty());
        assert_eq!(lists.total(), 1);
    }

    #[test]
    fn select_all_is_tri_state() {
        let mut sel = BulkSelection::default();
        assert_eq!(sel.state(3), CheckState::Unchecked);
        sel.set("Milk", true);
        assert_eq!(sel.state(3), CheckState::Indeterminate);
        sel.set_all(["Milk", "Eggs", "Ham"], true);
        assert_eq!(sel.state(3), CheckState::Checked);
        sel.set("Ham", false);
        assert_eq!(sel.names(), vec!["Eggs".to_string(), "Milk".to_string()]);
        sel.set_all([], false);
        assert!(sel.is_empty());
    }

    #[test]
    fn expiring_wording() {
        assert_eq!(expiring_text(Some(-1)), "expired");
        assert_eq!(expiring_text(Some(0)), "today");
        assert_eq!(expiring_text(Some(3)), "3 days");
    }
}
