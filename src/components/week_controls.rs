//! Week Controls Component
//!
//! Toolbar above the grid: reset, export, today, randomize, available
//! recipes and the shopping-list link with its badge.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api;
use crate::context::{alert, confirm, navigate, use_app_context};
use crate::dates::{iso_week, monday_of, today};
use crate::models::{value_text, AvailableRecipes, RandomizeRequest, DAY_NAMES};
use crate::store::use_app_store;

// ========================
// Randomize modal
// ========================

#[component]
fn RandomizeModal(open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let days = RwSignal::new(Vec::<&'static str>::new());
    let replace_existing = RwSignal::new(false);
    let only_available = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some((week, year)) = ctx.week_ref() else {
            log::warn!("[planner] cannot randomize: missing week/year");
            return;
        };
        let picked: Vec<String> = days.get_untracked().iter().map(|d| d.to_string()).collect();
        let request = RandomizeRequest {
            week,
            year,
            days: (!picked.is_empty()).then_some(picked),
            replace_existing: replace_existing.get_untracked(),
            only_available: only_available.get_untracked(),
        };
        spawn_local(async move {
            match api::randomize_custom(&request).await {
                Ok(resp) => {
                    open.set(false);
                    ctx.toast(format!("Randomized {} meal(s)", resp.modified));
                    actions::refresh_week(ctx, store).await;
                }
                Err(e) => {
                    log::error!("[planner] randomize failed: {e}");
                    alert("Randomize failed");
                }
            }
        });
    };

    let day_boxes = move || {
        DAY_NAMES
            .iter()
            .map(|&day| {
                view! {
                    <label class="ar-day-label">
                        <input
                            type="checkbox"
                            class="ar-day"
                            value=day
                            prop:checked=move || days.with(|d| d.contains(&day))
                            on:change=move |ev| {
                                let on = event_target_checked(&ev);
                                days.update(|d| {
                                    d.retain(|x| *x != day);
                                    if on {
                                        d.push(day);
                                    }
                                });
                            }
                        />
                        {day}
                    </label>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || open.get()>
            <div id="advRandModal" class="popup" on:click=move |_| open.set(false)>
                <form id="advRandForm" class="popup-content" on:click=|ev| ev.stop_propagation() on:submit=submit>
                    <div class="popup-header">
                        <h3>"Randomize week"</h3>
                        <button type="button" class="close-btn" on:click=move |_| open.set(false)>
                            "×"
                        </button>
                    </div>
                    <p class="hint">"No day selected means the whole week."</p>
                    <div class="ar-days">{day_boxes}</div>
                    <label>
                        <input
                            type="checkbox"
                            id="arReplaceExisting"
                            prop:checked=move || replace_existing.get()
                            on:change=move |ev| replace_existing.set(event_target_checked(&ev))
                        />
                        " Replace existing meals"
                    </label>
                    <label>
                        <input
                            type="checkbox"
                            id="arOnlyAvailable"
                            prop:checked=move || only_available.get()
                            on:change=move |ev| only_available.set(event_target_checked(&ev))
                        />
                        " Only recipes I can cook now"
                    </label>
                    <div class="form-actions">
                        <button type="submit" class="main-btn">
                            "Randomize"
                        </button>
                        <button type="button" class="main-btn cancel-btn" on:click=move |_| open.set(false)>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}

// ========================
// Available recipes modal
// ========================

#[derive(Debug, Clone, Default)]
enum AvailableState {
    #[default]
    Loading,
    Loaded(AvailableRecipes),
    Failed,
}

#[component]
fn AvailableModal(open: RwSignal<bool>) -> impl IntoView {
    let state = RwSignal::new(AvailableState::Loading);

    // Reload every time the modal opens
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        state.set(AvailableState::Loading);
        spawn_local(async move {
            match api::fetch_available_recipes().await {
                Ok(data) => state.set(AvailableState::Loaded(data)),
                Err(e) => {
                    log::error!("[planner] available recipes: {e}");
                    state.set(AvailableState::Failed);
                }
            }
        });
    });

    let rows = move || match state.get() {
        AvailableState::Loaded(data) if data.recipes.is_empty() => view! {
            <tr>
                <td colspan="4" class="empty-row">"No available recipes."</td>
            </tr>
        }
        .into_any(),
        AvailableState::Loaded(data) => data
            .recipes
            .into_iter()
            .map(|r| {
                view! {
                    <tr>
                        <td>{r.name}</td>
                        <td class="num">{value_text(&r.servings)}</td>
                        <td class="num">{value_text(&r.calories)}</td>
                        <td class="num strong">{r.times_possible}</td>
                    </tr>
                }
            })
            .collect_view()
            .into_any(),
        _ => ().into_any(),
    };

    let summary = move || match state.get() {
        AvailableState::Loaded(data) => data.summary(),
        _ => String::new(),
    };

    view! {
        <Show when=move || open.get()>
            <div id="availableModal" class="popup" on:click=move |_| open.set(false)>
                <div class="popup-content" on:click=|ev| ev.stop_propagation()>
                    <div class="popup-header">
                        <h3>"Available recipes"</h3>
                        <button type="button" id="availableClose" class="close-btn" on:click=move |_| open.set(false)>
                            "×"
                        </button>
                    </div>
                    <Show when=move || matches!(state.get(), AvailableState::Loading)>
                        <div id="availableLoading">"Loading..."</div>
                    </Show>
                    <Show when=move || matches!(state.get(), AvailableState::Failed)>
                        <div id="availableError" class="error">"Failed to load available recipes."</div>
                    </Show>
                    <table class="available-table">
                        <thead>
                            <tr>
                                <th>"Recipe"</th>
                                <th>"Servings"</th>
                                <th>"Calories"</th>
                                <th>"Times possible"</th>
                            </tr>
                        </thead>
                        <tbody id="availableTbody">{rows}</tbody>
                    </table>
                    <div id="availableSummary">{summary}</div>
                    <div class="form-actions">
                        <button type="button" id="availableCloseFooter" class="main-btn" on:click=move |_| open.set(false)>
                            "Close"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

// ========================
// Shopping list link
// ========================

#[component]
fn ShoppingListLink() -> impl IntoView {
    let ctx = use_app_context();
    let count = RwSignal::new(0u32);

    Effect::new(move |_| {
        ctx.badge_trigger.track();
        let week = ctx.week_ref().map(|(w, _)| w);
        let (current_week, _) = iso_week(today());
        spawn_local(async move {
            match api::fetch_shopping_list(week, current_week).await {
                Ok(summary) => count.set(summary.count),
                Err(e) => log::debug!("[planner] shopping badge: {e}"),
            }
        });
    });

    let href = move || match ctx.week.get() {
        Some((week, _)) => format!("/shopping-list?week={week}"),
        None => "/shopping-list".to_string(),
    };

    view! {
        <a id="shoppingListLink" class="main-btn shopping-link" href=href>
            "Shopping list"
            <Show when=move || { count.get() > 0 }>
                <span id="shoppingListCount" class="badge">{move || count.get()}</span>
            </Show>
        </a>
    }
}

// ========================
// Toolbar
// ========================

#[component]
pub fn WeekControls() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let randomize_open = RwSignal::new(false);
    let available_open = RwSignal::new(false);

    let reset = move |_| {
        let Some((week, year)) = ctx.week_ref() else {
            return;
        };
        if !confirm("Are you sure you want to reset this week?") {
            return;
        }
        spawn_local(async move {
            match api::reset_week(week, year).await {
                Ok(()) => actions::refresh_week(ctx, store).await,
                Err(e) => {
                    log::error!("[planner] reset failed: {e}");
                    alert("Unexpected error");
                }
            }
        });
    };

    let export = move |_| {
        let Some((week, year)) = ctx.week_ref() else {
            return;
        };
        if confirm("Do you want to export this week to PDF?") {
            navigate(&api::export_pdf_url(week, year));
        }
    };

    let go_today = move |_| {
        spawn_local(actions::select_week(ctx, store, monday_of(today())));
    };

    view! {
        <div class="week-controls">
            <button id="resetWeek" class="main-btn danger" on:click=reset>
                "Reset week"
            </button>
            <button id="randomizeWeek" class="main-btn" on:click=move |_| randomize_open.set(true)>
                "Randomize"
            </button>
            <button id="exportPDF" class="main-btn" on:click=export>
                "Export PDF"
            </button>
            <button id="todayWeek" class="main-btn" on:click=go_today>
                "Today"
            </button>
            <button id="availableRecipes" class="main-btn" on:click=move |_| available_open.set(true)>
                "Available recipes"
            </button>
            <ShoppingListLink />
            <RandomizeModal open=randomize_open />
            <AvailableModal open=available_open />
        </div>
    }
}
