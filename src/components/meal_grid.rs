//! Meal Grid Component
//!
//! Seven day rows by three meal slots, with per-day calorie sums and the
//! per-slot Add / Actions buttons.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::actions;
use crate::context::{use_app_context, use_planner_ui, SlotRef};
use crate::dates::today;
use crate::models::{format_amount, Meal, DAY_NAMES};
use crate::planner::{
    day_calories, day_label, day_status, menu_items, slot_button, slot_display, MenuAction, SlotButton, SlotDisplay,
    PAST_TITLE,
};
use crate::store::{use_app_store, AppStateStoreFields};

/// Does the click land inside an actions menu or its button?
fn inside_menu(ev: &web_sys::MouseEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(".slot-actions").ok().flatten())
        .is_some()
}

// ========================
// Slot Cell
// ========================

#[component]
fn SlotCell(day: &'static str, meal: Meal) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let ui = use_planner_ui();
    let today = today();

    let slot = move || {
        store
            .week_plan()
            .with(|p| p.day(day).map(|d| d.slot(meal).clone()))
            .unwrap_or_default()
    };
    let status = move || {
        store
            .week_plan()
            .with(|p| p.day(day).map(|d| day_status(&d.date, today)))
            .unwrap_or_default()
    };
    let slot_ref = move || SlotRef {
        day: day.to_string(),
        meal,
    };

    let content = move || match slot_display(&slot()) {
        SlotDisplay::Dash => view! { <span class="slot-empty">"-"</span> }.into_any(),
        SlotDisplay::Link { name, href } => view! { <a class="slot-recipe" href=href>{name}</a> }.into_any(),
        SlotDisplay::Cooked(label) => view! { <span class="slot-cooked">{label}</span> }.into_any(),
    };

    let on_menu = move |action: MenuAction| {
        ui.open_menu.set(None);
        match action {
            MenuAction::Edit => ui.picker.set(Some(slot_ref())),
            MenuAction::Cook => ui.cook.set(Some(slot_ref())),
            MenuAction::Delete => {
                spawn_local(actions::delete_meal(ctx, store, day.to_string(), meal));
            }
        }
    };

    let menu = move || {
        let status = status();
        menu_items(status)
            .into_iter()
            .map(|item| {
                view! {
                    <button
                        type="button"
                        class="slot-menu-item"
                        class:danger=item.danger
                        disabled=item.disabled
                        title={(item.disabled && status.is_past).then_some(PAST_TITLE)}
                        on:click=move |_| on_menu(item.action)
                    >
                        {item.label}
                    </button>
                }
            })
            .collect_view()
    };

    let buttons = move || match slot_button(&slot(), status()) {
        SlotButton::None => ().into_any(),
        SlotButton::Add { disabled } => view! {
            <button
                type="button"
                class="add-btn"
                disabled=disabled
                title=disabled.then_some(PAST_TITLE)
                on:click=move |_| ui.picker.set(Some(slot_ref()))
            >
                "Add"
            </button>
        }
        .into_any(),
        SlotButton::Actions => view! {
            <div class="slot-actions">
                <button
                    type="button"
                    class="slot-actions-btn"
                    on:click=move |_| {
                        let open = ui.open_menu.get_untracked() == Some(slot_ref());
                        ui.open_menu.set(if open { None } else { Some(slot_ref()) });
                    }
                >
                    "Actions ▾"
                </button>
                <Show when=move || ui.menu_open_for(day, meal)>
                    <div class="slot-menu">{menu}</div>
                </Show>
            </div>
        }
        .into_any(),
    };

    view! {
        <td class="meal-cell" data-day=day data-meal=meal.as_str()>
            <div class="slot-content">{content}</div>
            {buttons}
        </td>
    }
}

// ========================
// Meal Grid
// ========================

#[component]
pub fn MealGrid() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let ui = use_planner_ui();
    let today = today();

    // Outside click and Escape close the open actions menu
    let click = window_event_listener(ev::click, move |ev| {
        if ui.open_menu.get_untracked().is_some() && !inside_menu(&ev) {
            ui.open_menu.set(None);
        }
    });
    let keydown = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            ui.open_menu.set(None);
        }
    });
    on_cleanup(move || {
        click.remove();
        keydown.remove();
    });

    let rows = DAY_NAMES
        .iter()
        .map(|&day| {
            let date = move || {
                store
                    .week_plan()
                    .with(|p| p.day(day).map(|d| d.date.clone()))
                    .unwrap_or_default()
            };
            let status = move || day_status(&date(), today);
            let kcal = move || {
                let sum = store.week_plan().with(|p| {
                    ctx.catalog
                        .with_value(|c| p.day(day).map(|d| day_calories(d, c)).unwrap_or(0.0))
                });
                format_amount(sum)
            };

            view! {
                <tr class="day-row" class:past-day=move || status().is_past class:today=move || status().is_today>
                    <th class="day-label">{move || day_label(day, &date())}</th>
                    {Meal::ALL.into_iter().map(|meal| view! { <SlotCell day=day meal=meal /> }).collect_view()}
                    <td class="day-kcal">{kcal}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="meal-grid">
            <thead>
                <tr>
                    <th>"Day"</th>
                    <th>"Breakfast"</th>
                    <th>"Lunch"</th>
                    <th>"Dinner"</th>
                    <th>"Calories"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}

