//! Week Actions
//!
//! Fetch-and-render flow of the week grid shared by the grid, the recipe
//! picker, the cook panel and the week controls.

use chrono::NaiveDate;
use leptos::prelude::Set;

use crate::api;
use crate::context::AppContext;
use crate::models::{Meal, SlotValue, WeekPlan};
use crate::planner::picked_value;
use crate::store::{store_patch_slot, AppStore, AppStateStoreFields};

/// Install a freshly fetched plan and sync everything that depends on it.
fn update_table(ctx: AppContext, store: AppStore, plan: WeekPlan) {
    match plan.meta {
        Some(meta) => {
            ctx.set_week(meta.week, meta.year);
            ctx.refresh_nutrition();
        }
        None => log::warn!("[planner] week payload without meta"),
    }
    log::debug!("[planner] loaded {} days", plan.days.len());
    store.week_plan().set(plan);
    ctx.refresh_badge();
}

/// Switch to the week starting on `monday`.
pub async fn select_week(ctx: AppContext, store: AppStore, monday: NaiveDate) {
    ctx.set_monday(monday);
    refresh_week(ctx, store).await;
}

/// Re-fetch the selected week. Failures are logged; the grid keeps its data.
pub async fn refresh_week(ctx: AppContext, store: AppStore) {
    let Some(monday) = ctx.monday_untracked() else {
        log::warn!("[planner] no week selected yet");
        return;
    };
    match api::fetch_week(monday).await {
        Ok(plan) => update_table(ctx, store, plan),
        Err(e) => log::error!("[planner] Error loading week: {e}"),
    }
}

/// Put `recipe` into a slot (`-` clears it), then resync.
pub async fn save_meal(ctx: AppContext, store: AppStore, day: String, meal: Meal, recipe: String) {
    let Some((week, year)) = ctx.week_ref() else {
        log::warn!("[planner] cannot update meal: missing week/year");
        return;
    };
    store_patch_slot(&store, &day, meal, picked_value(&recipe));
    if let Err(e) = api::update_meal(&day, meal, &recipe, week, year).await {
        log::error!("[planner] update meal failed: {e}");
    }
    refresh_week(ctx, store).await;
}

/// Clear a slot optimistically, send `-`, then resync.
pub async fn delete_meal(ctx: AppContext, store: AppStore, day: String, meal: Meal) {
    let Some((week, year)) = ctx.week_ref() else {
        log::warn!("[planner] cannot delete meal: missing week/year");
        return;
    };
    store_patch_slot(&store, &day, meal, SlotValue::Empty);
    if let Err(e) = api::update_meal(&day, meal, api::EMPTY_RECIPE, week, year).await {
        log::error!("[planner] deleteMeal failed: {e}");
    }
    refresh_week(ctx, store).await;
    ctx.refresh_nutrition();
    ctx.refresh_badge();
}
