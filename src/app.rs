//! Meal Planner Frontend App
//!
//! Root component. The server picks the page through `<body data-page>`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{
    AlertsPanel, CookPanel, MealGrid, PantryEditor, PantryView, RecipePicker, StatsPanel, ToastStack, WeekControls,
    WeekPicker,
};
use crate::config::{AppView, PageConfig};
use crate::context::{AppContext, PlannerUi};
use crate::store::AppState;

/// Week grid with its toolbar, popups and side panels
#[component]
fn PlannerPage() -> impl IntoView {
    provide_context(PlannerUi::new());

    view! {
        <div class="planner-layout">
            <main class="planner-main">
                <div class="planner-toolbar">
                    <WeekPicker />
                    <WeekControls />
                </div>
                <MealGrid />
            </main>
            <aside class="planner-side">
                <StatsPanel />
                <AlertsPanel />
            </aside>
            <CookPanel />
            <RecipePicker />
        </div>
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = PageConfig::from_document();

    // Provide context to all children
    let ctx = AppContext::new(&config);
    provide_context(ctx);
    provide_context(Store::new(AppState::new(&config.ingredients, &config.cooked)));

    let page = match ctx.view {
        AppView::Planner => view! { <PlannerPage /> }.into_any(),
        AppView::Pantry => view! { <PantryView /> }.into_any(),
        AppView::PantryEdit => view! { <PantryEditor /> }.into_any(),
    };

    view! {
        <div class="app-layout">
            {page}
            <ToastStack />
        </div>
    }
}
