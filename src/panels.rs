//! Side Panels
//!
//! Open/closed and active-tab state of the alerts and stats panels, persisted
//! in `localStorage` across page loads.

/// Key/value preferences. `localStorage` in the browser, a map in tests.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `window.localStorage`; silently does nothing when storage is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl PrefStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("[panels] could not persist {key}");
            }
        }
    }
}

/// Storage keys and tabs of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSpec {
    pub hidden_key: &'static str,
    pub tab_key: &'static str,
    pub tabs: &'static [&'static str],
    pub default_tab: &'static str,
}

pub const ALERTS_PANEL: PanelSpec = PanelSpec {
    hidden_key: "alertsPanelHidden",
    tab_key: "alertsActiveTab",
    tabs: &[ALERTS_TAB_EXPIRING, ALERTS_TAB_LOWSTOCK],
    default_tab: ALERTS_TAB_EXPIRING,
};

pub const STATS_PANEL: PanelSpec = PanelSpec {
    hidden_key: "statsPanelHidden",
    tab_key: "statsPanelTab",
    tabs: &["week", "days"],
    default_tab: "week",
};

pub const ALERTS_TAB_EXPIRING: &str = "expiring";
pub const ALERTS_TAB_LOWSTOCK: &str = "lowstock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub open: bool,
    pub tab: &'static str,
}

impl PanelState {
    /// Missing visibility means shown; a stored tab is honored only when it
    /// still exists.
    pub fn load(panel: &PanelSpec, store: &dyn PrefStore) -> Self {
        let open = store.get(panel.hidden_key).as_deref() != Some("1");
        let tab = store
            .get(panel.tab_key)
            .and_then(|saved| panel.tabs.iter().copied().find(|t| *t == saved))
            .unwrap_or(panel.default_tab);
        Self { open, tab }
    }

    pub fn set_open(&mut self, open: bool, panel: &PanelSpec, store: &dyn PrefStore) {
        self.open = open;
        store.set(panel.hidden_key, if open { "0" } else { "1" });
    }

    pub fn toggle(&mut self, panel: &PanelSpec, store: &dyn PrefStore) {
        self.set_open(!self.open, panel, store);
    }

    /// Switch tab; unknown names are ignored.
    pub fn activate(&mut self, tab: &str, panel: &PanelSpec, store: &dyn PrefStore) {
        if let Some(tab) = panel.tabs.iter().copied().find(|t| *t == tab) {
            self.tab = tab;
            store.set(panel.tab_key, tab);
        }
    }
}

pub fn alerts_button_label(open: bool, total: usize) -> String {
    if open {
        format!("Alerts ({total})")
    } else {
        "Show alerts".to_string()
    }
}

pub fn stats_button_label(open: bool) -> &'static str {
    if open {
        "Stats"
    } else {
        "Show stats"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct MemoryStore {
        values: RefCell<HashMap<String, String>>,
    }

    impl PrefStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.values.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn defaults_when_storage_is_empty() {
        let store = MemoryStore::default();
        assert_eq!(PanelState::load(&ALERTS_PANEL, &store), PanelState { open: true, tab: "expiring" });
        assert_eq!(PanelState::load(&STATS_PANEL, &store), PanelState { open: true, tab: "week" });
    }

    #[test]
    fn persisted_state_is_restored() {
        let store = MemoryStore::default();
        let mut state = PanelState::load(&STATS_PANEL, &store);
        state.toggle(&STATS_PANEL, &store);
        state.activate("days", &STATS_PANEL, &store);
        assert_eq!(store.get("statsPanelHidden").as_deref(), Some("1"));
        assert_eq!(PanelState::load(&STATS_PANEL, &store), PanelState { open: false, tab: "days" });
    }

    #[test]
    fn unknown_saved_tab_falls_back() {
        let store = MemoryStore::default();
        store.set("alertsActiveTab", "bogus");
        store.set("alertsPanelHidden", "0");
        let mut state = PanelState::load(&ALERTS_PANEL, &store);
        assert_eq!(state, PanelState { open: true, tab: "expiring" });
        state.activate("nope", &ALERTS_PANEL, &store);
        assert_eq!(state.tab, "expiring");
    }

    #[test]
    fn labels() {
        assert_eq!(alerts_button_label(true, 3), "Alerts (3)");
        assert_eq!(alerts_button_label(false, 3), "Show alerts");
        assert_eq!(stats_button_label(false), "Show stats");
    }
}
