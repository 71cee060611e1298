//! Week Picker Component
//!
//! Dropdown of the selectable Monday-Sunday weeks. Selects the current week
//! on mount.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::config::week_range;
use crate::context::use_app_context;
use crate::dates::{short_label, today, week_options, WeekOption};
use crate::store::use_app_store;

#[component]
pub fn WeekPicker() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (start, end) = week_range();
    let options = week_options(start, end, today());
    let open = RwSignal::new(false);

    let choose = move |monday| {
        open.set(false);
        spawn_local(actions::select_week(ctx, store, monday));
    };

    // Start on the current week, or the first selectable one
    if let Some(initial) = options.iter().find(|o| o.is_current).or(options.first()) {
        choose(initial.monday);
    } else {
        log::warn!("[planner] no selectable weeks");
    }

    let display = move || match ctx.monday.get() {
        Some(monday) => format!(
            "{} - {}",
            short_label(monday),
            short_label(monday + chrono::Duration::days(6))
        ),
        None => "Select week".to_string(),
    };

    view! {
        <div class="week-picker">
            <button id="weekDisplay" class="main-btn week-display" on:click=move |_| open.update(|o| *o = !*o)>
                {display}
                " ▾"
            </button>
            <Show when=move || open.get()>
                <div id="weekDropdown" class="week-dropdown">
                    {options
                        .iter()
                        .map(|opt: &WeekOption| {
                            let monday = opt.monday;
                            let selected = move || ctx.monday.get() == Some(monday);
                            view! {
                                <div
                                    class="week-option"
                                    class:current-week=opt.is_current
                                    class:selected=selected
                                    on:click=move |_| choose(monday)
                                >
                                    {opt.label()}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}
