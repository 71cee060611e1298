//! Stats Panel Component
//!
//! Weekly and per-day nutrition totals with manual and timed refresh.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::{NUTRITION_INITIAL_DELAY_MS, NUTRITION_REFRESH_MS};
use crate::context::{use_app_context, AppContext};
use crate::models::{format_amount, NutritionReport, NutritionTotals, DAY_NAMES};
use crate::panels::{stats_button_label, BrowserStorage, PanelState, STATS_PANEL};
use crate::refresh::RefreshGate;

/// Fetching and the auto-refresh timer
#[derive(Clone, Copy)]
struct Refresher {
    ctx: AppContext,
    report: RwSignal<NutritionReport>,
    refreshing: RwSignal<bool>,
    auto: RwSignal<bool>,
    gate: StoredValue<RefreshGate, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Refresher {
    fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            report: RwSignal::new(NutritionReport::default()),
            refreshing: RwSignal::new(false),
            auto: RwSignal::new(true),
            gate: StoredValue::new_local(RefreshGate::default()),
            timer: StoredValue::new_local(None),
        }
    }

    /// Skipped while another fetch is in flight or no week is loaded.
    async fn fetch(self) {
        let Some((week, year)) = self.ctx.week_ref() else {
            return;
        };
        let Some(_guard) = self.gate.with_value(RefreshGate::try_enter) else {
            log::debug!("[stats] fetch already in flight");
            return;
        };
        self.refreshing.set(true);
        match api::fetch_nutrition(week, year).await {
            Ok(report) => self.report.set(report),
            Err(e) => log::warn!("[stats] Nutrition fetch failed: {e}"),
        }
        self.refreshing.set(false);
    }

    /// Restart the timer; does nothing more when auto-refresh is off.
    fn schedule(self) {
        self.timer.set_value(None);
        if !self.auto.get_untracked() {
            return;
        }
        let timeout = Timeout::new(NUTRITION_REFRESH_MS, move || {
            spawn_local(async move {
                self.fetch().await;
                self.schedule();
            });
        });
        self.timer.set_value(Some(timeout));
    }

    fn refresh_now(self) {
        spawn_local(self.fetch());
        self.schedule();
    }

    fn stop(self) {
        self.timer.set_value(None);
    }
}

#[component]
fn TotalsRow(name: String, totals: NutritionTotals) -> impl IntoView {
    let day = name.clone();
    view! {
        <tr data-day=day>
            <td class="sd-name">{name}</td>
            <td class="sd-cal">{format_amount(totals.calories)}</td>
            <td class="sd-pro">{format_amount(totals.protein)}</td>
            <td class="sd-carbs">{format_amount(totals.carbs)}</td>
            <td class="sd-fats">{format_amount(totals.fats)}</td>
        </tr>
    }
}

#[component]
pub fn StatsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let refresher = Refresher::new(ctx);
    let panel = RwSignal::new(PanelState::load(&STATS_PANEL, &BrowserStorage));

    // Week changes ask for fresh numbers; the timer itself starts a bit after mount
    Effect::new(move |prev: Option<()>| {
        ctx.nutrition_trigger.track();
        if prev.is_some() {
            refresher.refresh_now();
        }
    });
    Timeout::new(NUTRITION_INITIAL_DELAY_MS, move || refresher.schedule()).forget();
    on_cleanup(move || refresher.stop());

    let toggle = move |_| panel.update(|p| p.toggle(&STATS_PANEL, &BrowserStorage));
    let activate = move |tab: &'static str| panel.update(|p| p.activate(tab, &STATS_PANEL, &BrowserStorage));
    let tab_is = move |tab: &'static str| panel.with(|p| p.tab == tab);

    let week_value = move |pick: fn(&NutritionTotals) -> f64| {
        move || refresher.report.with(|r| format_amount(pick(&r.week_totals)))
    };

    let day_rows = move || {
        refresher.report.with(|r| {
            DAY_NAMES
                .iter()
                .map(|day| {
                    let totals = r.days.get(*day).copied().unwrap_or_default();
                    view! { <TotalsRow name=day.to_string() totals=totals /> }
                })
                .collect_view()
        })
    };

    view! {
        <div id="statsPanelWrap" class="side-panel-wrap">
            <button id="statsMainBtn" class="main-btn panel-toggle" on:click=toggle>
                {move || stats_button_label(panel.with(|p| p.open))}
            </button>
            <Show when=move || panel.with(|p| p.open)>
                <div id="statsPanel" class="side-panel" class:refreshing=move || refresher.refreshing.get()>
                    <div class="panel-tabs">
                        <button class="tab-btn" class:active=move || tab_is("week") on:click=move |_| activate("week")>
                            "Week"
                        </button>
                        <button class="tab-btn" class:active=move || tab_is("days") on:click=move |_| activate("days")>
                            "Days"
                        </button>
                    </div>
                    <Show when=move || tab_is("week")>
                        <table class="stats-week">
                            <tr>
                                <th>"Calories"</th>
                                <td id="stats-week-cal">{week_value(|t| t.calories)}</td>
                            </tr>
                            <tr>
                                <th>"Protein"</th>
                                <td id="stats-week-pro">{week_value(|t| t.protein)}</td>
                            </tr>
                            <tr>
                                <th>"Carbs"</th>
                                <td id="stats-week-carbs">{week_value(|t| t.carbs)}</td>
                            </tr>
                            <tr>
                                <th>"Fats"</th>
                                <td id="stats-week-fats">{week_value(|t| t.fats)}</td>
                            </tr>
                        </table>
                    </Show>
                    <Show when=move || tab_is("days")>
                        <table class="stats-days">
                            <thead>
                                <tr>
                                    <th>"Day"</th>
                                    <th>"Calories"</th>
                                    <th>"Protein"</th>
                                    <th>"Carbs"</th>
                                    <th>"Fats"</th>
                                </tr>
                            </thead>
                            <tbody id="statsDaysBody">{day_rows}</tbody>
                        </table>
                    </Show>
                    <div class="stats-controls">
                        <button id="statsRefreshBtn" class="main-btn small" on:click=move |_| refresher.refresh_now()>
                            "Refresh"
                        </button>
                        <label>
                            <input
                                type="checkbox"
                                id="statsAutoRefresh"
                                prop:checked=move || refresher.auto.get()
                                on:change=move |ev| {
                                    refresher.auto.set(event_target_checked(&ev));
                                    refresher.schedule();
                                }
                            />
                            " Auto refresh"
                        </label>
                    </div>
                </div>
            </Show>
        </div>
    }
}
