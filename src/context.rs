//! Application Context
//!
//! Shared state provided via Leptos Context API.

use chrono::NaiveDate;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::{AppView, PageConfig, RecipeCatalog, TOAST_LIFETIME_MS};
use crate::models::Meal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast success",
            ToastKind::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Page the server rendered us into
    pub view: AppView,
    /// Recipe catalog from `#recipes-json`
    pub catalog: StoredValue<RecipeCatalog>,
    /// Week/year of the loaded plan - read
    pub week: ReadSignal<Option<(u32, i32)>>,
    /// Week/year of the loaded plan - write
    set_week: WriteSignal<Option<(u32, i32)>>,
    /// Monday of the selected week - read
    pub monday: ReadSignal<Option<NaiveDate>>,
    /// Monday of the selected week - write
    set_monday: WriteSignal<Option<NaiveDate>>,
    /// Bumped to ask the stats panel for fresh numbers
    pub nutrition_trigger: ReadSignal<u32>,
    set_nutrition_trigger: WriteSignal<u32>,
    /// Bumped to ask the shopping-list badge to reload
    pub badge_trigger: ReadSignal<u32>,
    set_badge_trigger: WriteSignal<u32>,
    /// Visible toasts
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast: StoredValue<u32>,
}

impl AppContext {
    pub fn new(config: &PageConfig) -> Self {
        let (week, set_week) = signal(config.week.zip(config.year));
        let (monday, set_monday) = signal(None);
        let (nutrition_trigger, set_nutrition_trigger) = signal(0u32);
        let (badge_trigger, set_badge_trigger) = signal(0u32);
        let (toasts, set_toasts) = signal(Vec::new());
        Self {
            view: config.view,
            catalog: StoredValue::new(config.catalog.clone()),
            week,
            set_week,
            monday,
            set_monday,
            nutrition_trigger,
            set_nutrition_trigger,
            badge_trigger,
            set_badge_trigger,
            toasts,
            set_toasts,
            next_toast: StoredValue::new(0),
        }
    }

    /// Week/year without subscribing
    pub fn week_ref(&self) -> Option<(u32, i32)> {
        self.week.get_untracked()
    }

    pub fn set_week(&self, week: u32, year: i32) {
        self.set_week.set(Some((week, year)));
    }

    pub fn monday_untracked(&self) -> Option<NaiveDate> {
        self.monday.get_untracked()
    }

    pub fn set_monday(&self, monday: NaiveDate) {
        self.set_monday.set(Some(monday));
    }

    /// Ask the stats panel to fetch now
    pub fn refresh_nutrition(&self) {
        self.set_nutrition_trigger.update(|v| *v += 1);
    }

    /// Ask the shopping-list badge to reload
    pub fn refresh_badge(&self) {
        self.set_badge_trigger.update(|v| *v += 1);
    }

    pub fn toast(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Success, message.into());
    }

    pub fn toast_error(&self, message: impl Into<String>) {
        self.push_toast(ToastKind::Error, message.into());
    }

    fn push_toast(&self, kind: ToastKind, message: String) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        self.set_toasts.update(|list| list.push(Toast { id, kind, message }));

        let set_toasts = self.set_toasts;
        Timeout::new(TOAST_LIFETIME_MS, move || {
            set_toasts.update(|list| list.retain(|t| t.id != id));
        })
        .forget();
    }

    pub fn dismiss_toast(&self, id: u32) {
        self.set_toasts.update(|list| list.retain(|t| t.id != id));
    }
}

/// Day/meal pair a grid popup is open for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    pub day: String,
    pub meal: Meal,
}

/// Popups of the planner page. Each holds the slot it was opened for.
#[derive(Clone, Copy)]
pub struct PlannerUi {
    pub picker: RwSignal<Option<SlotRef>>,
    pub cook: RwSignal<Option<SlotRef>>,
    pub open_menu: RwSignal<Option<SlotRef>>,
}

impl PlannerUi {
    pub fn new() -> Self {
        Self {
            picker: RwSignal::new(None),
            cook: RwSignal::new(None),
            open_menu: RwSignal::new(None),
        }
    }

    /// Is the actions menu of `day`/`meal` open? Tracked.
    pub fn menu_open_for(&self, day: &str, meal: Meal) -> bool {
        self.open_menu
            .with(|m| m.as_ref().is_some_and(|s| s.day == day && s.meal == meal))
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

pub fn use_planner_ui() -> PlannerUi {
    use_context::<PlannerUi>().expect("PlannerUi should be provided")
}

/// Blocking `window.confirm`; false when no window is available.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Blocking `window.alert`
pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Navigate the page to `url`
pub fn navigate(url: &str) {
    if let Some(w) = web_sys::window() {
        if w.location().set_href(url).is_err() {
            log::error!("[app] navigation to {url} failed");
        }
    }
}
