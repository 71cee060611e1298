//! Cook Panel Component
//!
//! Shows the slot's ingredients with editable used quantities and posts the
//! cook request.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api;
use crate::config::COOK_CLOSE_DELAY_MS;
use crate::context::{use_app_context, use_planner_ui};
use crate::cook::{CookPanelState, CookStatus};
use crate::models::CookRequest;
use crate::store::use_app_store;

#[component]
pub fn CookPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let ui = use_planner_ui();
    let state = RwSignal::new(None::<CookPanelState>);

    // Opening the panel loads the slot's recipe
    Effect::new(move |_| {
        let Some(slot) = ui.cook.get() else {
            state.set(None);
            return;
        };
        state.set(Some(CookPanelState::loading(&slot.day, slot.meal)));
        let Some((week, year)) = ctx.week_ref() else {
            state.update(|s| {
                if let Some(s) = s {
                    s.load_failed("missing week/year".to_string());
                }
            });
            return;
        };
        spawn_local(async move {
            let result = api::fetch_slot_recipe(&slot.day, slot.meal, week, year).await.map_err(|e| {
                log::warn!("[cook] load failed: {e}");
                e.user_message("load failed")
            });
            // Closed panels hold no state; retargeted ones drop the answer
            state.update(|s| {
                if let Some(s) = s {
                    if !s.apply_load(&slot.day, slot.meal, result) {
                        log::debug!("[cook] stale load for {} {} ignored", slot.day, slot.meal.as_str());
                    }
                }
            });
        });
    });

    let close = move || ui.cook.set(None);

    let finish = move |_| {
        let Some(current) = state.get_untracked() else {
            return;
        };
        let Some((week, year)) = ctx.week_ref() else {
            log::warn!("[cook] missing week/year");
            return;
        };
        let request = CookRequest {
            day: current.day.clone(),
            meal: current.meal.as_str().to_string(),
            week,
            year,
            overrides: current.overrides(),
        };
        state.update(|s| {
            if let Some(s) = s {
                s.status = CookStatus::Cooking;
            }
        });
        spawn_local(async move {
            match api::cook_slot(&request).await {
                Ok(()) => {
                    state.update(|s| {
                        if let Some(s) = s {
                            s.status = CookStatus::Success;
                        }
                    });
                    actions::refresh_week(ctx, store).await;
                    ctx.refresh_nutrition();
                    Timeout::new(COOK_CLOSE_DELAY_MS, move || ui.cook.set(None)).forget();
                }
                Err(e) => {
                    log::error!("[cook] cook failed: {e}");
                    state.update(|s| {
                        if let Some(s) = s {
                            s.status = CookStatus::Failed(e.user_message("cook failed"));
                        }
                    });
                }
            }
        });
    };

    let title = move || state.with(|s| s.as_ref().map(CookPanelState::title).unwrap_or_default());
    // Memos so typing into a quantity does not rebuild the rows
    let body_message = Memo::new(move |_| state.with(|s| s.as_ref().and_then(CookPanelState::body_message)));
    let status_message = move || state.with(|s| s.as_ref().and_then(CookPanelState::status_message));
    let finish_disabled = move || !state.with(|s| s.as_ref().is_some_and(CookPanelState::finish_enabled));
    let line_count = Memo::new(move |_| state.with(|s| s.as_ref().map_or(0, |s| s.lines.len())));

    let lines = move || {
        (0..line_count.get())
            .map(|index| {
                let line = move || state.with(|s| s.as_ref().and_then(|s| s.lines.get(index).cloned()));
                let name = move || line().map(|l| l.name).unwrap_or_default();
                let unit = move || line().map(|l| l.unit).unwrap_or_default();
                let input = move || line().map(|l| l.input).unwrap_or_default();
                view! {
                    <tr>
                        <td>{name}</td>
                        <td>
                            <input
                                type="number"
                                min="0"
                                class="cook-qty"
                                prop:value=input
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| {
                                        if let Some(s) = s {
                                            s.set_input(index, value);
                                        }
                                    });
                                }
                            />
                        </td>
                        <td>{unit}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || ui.cook.get().is_some()>
            <div id="cook-panel" class="cook-panel">
                <div class="cook-panel-header">
                    <h3>{title}</h3>
                    <button type="button" class="close-btn" on:click=move |_| close()>
                        "×"
                    </button>
                </div>
                <table class="cook-table">
                    <thead>
                        <tr>
                            <th>"Ingredient"</th>
                            <th>"Used"</th>
                            <th>"Unit"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || match body_message.get() {
                            Some(message) => view! {
                                <tr>
                                    <td colspan="3" class="cook-placeholder">{message}</td>
                                </tr>
                            }
                            .into_any(),
                            None => lines().into_any(),
                        }}
                    </tbody>
                </table>
                <div class="cook-status">{status_message}</div>
                <div class="form-actions">
                    <button type="button" class="main-btn" disabled=finish_disabled on:click=finish>
                        "Finish"
                    </button>
                    <button type="button" id="cook-cancel" class="main-btn cancel-btn" on:click=move |_| close()>
                        "Cancel"
                    </button>
                </div>
            </div>
        </Show>
    }
}
