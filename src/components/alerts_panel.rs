//! Alerts Panel Component
//!
//! Expiring and low-stock ingredients, with bulk delete on the expiring tab.

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::alerts::{expiring_text, AlertLists, BulkSelection, CheckState};
use crate::api;
use crate::context::{alert, confirm};
use crate::error::ApiError;
use crate::models::format_amount;
use crate::panels::{alerts_button_label, BrowserStorage, PanelState, ALERTS_PANEL, ALERTS_TAB_EXPIRING, ALERTS_TAB_LOWSTOCK};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AlertsPanel() -> impl IntoView {
    let store = use_app_store();
    let panel = RwSignal::new(PanelState::load(&ALERTS_PANEL, &BrowserStorage));
    let selection = RwSignal::new(BulkSelection::default());
    let select_all_ref = NodeRef::<Input>::new();

    // Load the feed once
    spawn_local(async move {
        match api::fetch_pantry_alerts().await {
            Ok(snapshot) => store.alerts().set(AlertLists::from_events(&snapshot.events)),
            Err(e) => log::warn!("[alerts] load failed: {e}"),
        }
    });

    let toggle = move |_| panel.update(|p| p.toggle(&ALERTS_PANEL, &BrowserStorage));
    let activate = move |tab: &'static str| panel.update(|p| p.activate(tab, &ALERTS_PANEL, &BrowserStorage));
    let tab_is = move |tab: &'static str| panel.with(|p| p.tab == tab);

    let total = move || store.alerts().with(AlertLists::total);
    let check_state = move || {
        let listed = store.alerts().with(|a| a.expiring.len());
        selection.with(|s| s.state(listed))
    };

    // `indeterminate` has no attribute form
    Effect::new(move |_| {
        let state = check_state();
        if let Some(input) = select_all_ref.get() {
            input.set_indeterminate(state == CheckState::Indeterminate);
        }
    });

    let select_all = move |ev: web_sys::Event| {
        let on = event_target_checked(&ev);
        store.alerts().with_untracked(|a| {
            selection.update(|s| s.set_all(a.expiring.iter().map(|e| e.name.as_str()), on));
        });
    };

    let bulk_delete = move |_| {
        let names = selection.with_untracked(BulkSelection::names);
        if names.is_empty() || !confirm("Delete selected expiring ingredients?") {
            return;
        }
        spawn_local(async move {
            match api::bulk_delete_ingredients(&names).await {
                Ok(resp) => {
                    if !resp.not_found.is_empty() {
                        log::info!("[alerts] already gone: {:?}", resp.not_found);
                    }
                    let mut next_tab = None;
                    store.alerts().update(|a| {
                        selection.update(|s| next_tab = a.apply_bulk_delete(&resp.deleted, s));
                    });
                    if let Some(tab) = next_tab {
                        activate(tab);
                    }
                }
                Err(e @ ApiError::Rejected { .. }) => {
                    log::error!("[alerts] bulk delete rejected: {e}");
                    alert("Delete failed");
                }
                Err(e) => {
                    log::error!("[alerts] bulk delete: {e}");
                    alert("Unexpected error");
                }
            }
        });
    };

    let expiring_rows = move || {
        store.alerts().with(|a| {
            a.expiring
                .iter()
                .map(|event| {
                    let name = event.name.clone();
                    let row_name = name.clone();
                    let checked = {
                        let name = name.clone();
                        move || selection.with(|s| s.is_selected(&name))
                    };
                    view! {
                        <tr data-name=row_name>
                            <td>
                                <input
                                    type="checkbox"
                                    class="alert-select"
                                    prop:checked=checked
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        selection.update(|s| s.set(&name, on));
                                    }
                                />
                            </td>
                            <td>{event.name.clone()}</td>
                            <td class="num">{format_amount(event.quantity)} " " {event.unit.clone()}</td>
                            <td>{expiring_text(event.days_left)}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    let lowstock_rows = move || {
        store.alerts().with(|a| {
            a.low_stock
                .iter()
                .map(|event| {
                    view! {
                        <tr>
                            <td>{event.name.clone()}</td>
                            <td class="num">{format_amount(event.quantity)} " " {event.unit.clone()}</td>
                            <td class="num">{event.threshold.map(format_amount).unwrap_or_default()}</td>
                        </tr>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <div id="alertsPanelWrap" class="side-panel-wrap">
            <button id="alertsMainBtn" class="main-btn panel-toggle" on:click=toggle>
                {move || alerts_button_label(panel.with(|p| p.open), total())}
            </button>
            <Show when=move || panel.with(|p| p.open)>
                <div id="alertsPanel" class="side-panel">
                    <div class="panel-tabs">
                        <button
                            class="tab-btn"
                            class:active=move || tab_is(ALERTS_TAB_EXPIRING)
                            on:click=move |_| activate(ALERTS_TAB_EXPIRING)
                        >
                            "Expiring (" {move || store.alerts().with(|a| a.expiring.len())} ")"
                        </button>
                        <button
                            class="tab-btn"
                            class:active=move || tab_is(ALERTS_TAB_LOWSTOCK)
                            on:click=move |_| activate(ALERTS_TAB_LOWSTOCK)
                        >
                            "Low stock (" {move || store.alerts().with(|a| a.low_stock.len())} ")"
                        </button>
                    </div>
                    <Show when=move || tab_is(ALERTS_TAB_EXPIRING)>
                        <table class="alerts-table">
                            <thead>
                                <tr>
                                    <th>
                                        <input
                                            type="checkbox"
                                            id="alertsSelectAll"
                                            node_ref=select_all_ref
                                            prop:checked=move || check_state() == CheckState::Checked
                                            on:change=select_all
                                        />
                                    </th>
                                    <th>"Ingredient"</th>
                                    <th>"Quantity"</th>
                                    <th>"Expires"</th>
                                </tr>
                            </thead>
                            <tbody>{expiring_rows}</tbody>
                        </table>
                        <button
                            id="alertsBulkDelete"
                            class="main-btn small danger"
                            disabled=move || selection.with(BulkSelection::is_empty)
                            on:click=bulk_delete
                        >
                            "Delete selected"
                        </button>
                    </Show>
                    <Show when=move || tab_is(ALERTS_TAB_LOWSTOCK)>
                        <table class="alerts-table">
                            <thead>
                                <tr>
                                    <th>"Ingredient"</th>
                                    <th>"Quantity"</th>
                                    <th>"Threshold"</th>
                                </tr>
                            </thead>
                            <tbody>{lowstock_rows}</tbody>
                        </table>
                    </Show>
                </div>
            </Show>
        </div>
    }
}
