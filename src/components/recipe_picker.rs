//! Recipe Picker Component
//!
//! Modal opened by a slot's Add or Edit: choose a recipe from the catalog and
//! save it into the slot.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::api::EMPTY_RECIPE;
use crate::context::{use_app_context, use_planner_ui};
use crate::models::format_amount;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RecipePicker() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let ui = use_planner_ui();
    let selected = RwSignal::new(None::<String>);

    // Preselect what the slot already holds
    Effect::new(move |_| {
        let current = ui.picker.get().and_then(|slot| {
            store.week_plan().with_untracked(|p| {
                p.day(&slot.day)
                    .and_then(|d| d.slot(slot.meal).recipe_name().map(str::to_string))
            })
        });
        selected.set(current);
    });

    let close = move || ui.picker.set(None);

    let save = move |_| {
        let Some(slot) = ui.picker.get_untracked() else {
            return;
        };
        let recipe = selected.get_untracked().unwrap_or_else(|| EMPTY_RECIPE.to_string());
        close();
        spawn_local(actions::save_meal(ctx, store, slot.day, slot.meal, recipe));
    };

    let title = move || {
        ui.picker
            .get()
            .map(|s| format!("Choose recipe for {} - {}", s.day, s.meal.as_str()))
            .unwrap_or_default()
    };

    let preview = move || {
        let name = selected.get()?;
        let recipe = ctx
            .catalog
            .with_value(|c| c.recipes.iter().find(|r| r.name == name).cloned())?;
        Some(view! {
            <div class="recipe-preview">
                {match recipe.image.clone() {
                    Some(image) => view! {
                        <img src=format!("/static/pictures/{image}") alt=recipe.name.clone() class="recipe-preview-img" />
                    }
                    .into_any(),
                    None => view! { <div class="no-image-placeholder">"No image"</div> }.into_any(),
                }}
                <div class="recipe-kcal">
                    "Calories/serving: " <strong>{format_amount(recipe.calories_per_serving)}</strong>
                </div>
            </div>
        })
    };

    let recipe_list = move || {
        ctx.catalog.with_value(|c| {
            c.recipes
                .iter()
                .map(|r| {
                    let name = r.name.clone();
                    let is_selected = {
                        let name = name.clone();
                        move || selected.get().as_deref() == Some(name.as_str())
                    };
                    view! {
                        <li
                            class="recipe-option"
                            class:selected=is_selected
                            on:click=move |_| selected.set(Some(name.clone()))
                        >
                            {r.name.clone()}
                        </li>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <Show when=move || ui.picker.get().is_some()>
            <div class="popup" on:click=move |_| close()>
                <div class="popup-content recipe-modal" on:click=|ev| ev.stop_propagation()>
                    <h3>{title}</h3>
                    <div class="recipe-modal-body">
                        <div class="recipe-modal-left">{preview}</div>
                        <ul class="recipe-modal-list">{recipe_list}</ul>
                    </div>
                    <div class="form-actions">
                        <button type="button" class="main-btn" on:click=save>
                            "Save"
                        </button>
                        <button type="button" class="main-btn" on:click=move |_| selected.set(None)>
                            "Clear"
                        </button>
                        <button type="button" class="main-btn cancel-btn" on:click=move |_| close()>
                            "Cancel"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
