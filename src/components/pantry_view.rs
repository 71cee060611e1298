//! Pantry View Component
//!
//! Read-only ingredient and cooked tables with sorting, tag filter and
//! expiring-soon highlights.

use leptos::prelude::*;

use crate::dates::today;
use crate::edit_session::PantryRow;
use crate::pantry_sort::{cooked_badge, expiring_badge, sort_cooked, sort_ingredients, CookedSort, IngredientSort};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tags::{filter_options, TagFilter};

/// Name cell with the optional "soon" badge
#[component]
fn NameCell(name: String, badge: Option<String>) -> impl IntoView {
    let class = if badge.is_some() { "val name expiring-soon" } else { "val name" };
    let title = badge.clone();
    view! {
        <td class=class title=title>
            {name}
            {badge.map(|b| view! { <span class="soon-badge">{b}</span> })}
        </td>
    }
}

#[component]
pub fn PantryView() -> impl IntoView {
    let store = use_app_store();
    let today = today();

    let (ing_sort, set_ing_sort) = signal(IngredientSort::Name);
    let (cooked_sort, set_cooked_sort) = signal(CookedSort::Name);
    let (tag_filter, set_tag_filter) = signal(TagFilter::All);

    let tag_options = Memo::new(move |_| {
        store
            .ingredients()
            .with(|rows| filter_options(rows.iter().map(|r| r.tag.as_str())))
    });

    Effect::new(move |_| {
        let options = tag_options.get();
        let current = tag_filter.get_untracked();
        let kept = current.clone().retain_in(&options);
        if kept != current {
            set_tag_filter.set(kept);
        }
    });

    let ingredients = move || {
        let filter = tag_filter.get();
        let mut rows: Vec<PantryRow> = store
            .ingredients()
            .get()
            .into_iter()
            .filter(|r| filter.matches(&r.tag))
            .collect();
        sort_ingredients(&mut rows, ing_sort.get());
        rows
    };

    let cooked = move || {
        let mut rows = store.cooked().get();
        sort_cooked(&mut rows, cooked_sort.get());
        rows
    };

    // The select only offers name/expiration; tag order has its own button
    let ing_select_value = move || match ing_sort.get() {
        IngredientSort::Expiration => "expiration",
        _ => "name",
    };

    view! {
        <div class="pantry-view">
            <section class="pantry-section">
                <div class="table-toolbar">
                    <h2>"Ingredients"</h2>
                    <label class="filter-label">
                        "Sort "
                        <select
                            id="ing-sort"
                            prop:value=ing_select_value
                            on:change=move |ev| set_ing_sort.set(IngredientSort::from_value(&event_target_value(&ev)))
                        >
                            <option value="name">"Name"</option>
                            <option value="expiration">"Expiration"</option>
                        </select>
                    </label>
                    <button
                        id="ing-sort-tag"
                        class="main-btn small"
                        class:active=move || ing_sort.get() == IngredientSort::TagOrder
                        on:click=move |_| set_ing_sort.set(IngredientSort::TagOrder)
                    >
                        "Sort by tag order"
                    </button>
                    <label class="filter-label">
                        "Tag "
                        <select
                            id="ing-filter-tag"
                            prop:value=move || tag_filter.get().value().to_string()
                            on:change=move |ev| set_tag_filter.set(TagFilter::from_value(&event_target_value(&ev)))
                        >
                            <option value={TagFilter::ALL_VALUE}>"All tags"</option>
                            <For
                                each=move || tag_options.get()
                                key=|tag| tag.clone()
                                children=move |tag| view! { <option value=tag.clone()>{tag.clone()}</option> }
                            />
                        </select>
                    </label>
                </div>
                <table class="pantry-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Quantity"</th>
                            <th>"Unit"</th>
                            <th>"Tag"</th>
                            <th>"Expiration"</th>
                        </tr>
                    </thead>
                    <tbody id="ingredients-body">
                        <For
                            each=ingredients
                            key=|row| (row.key, row.name.clone(), row.amount_text(), row.tag.clone(), row.date.clone())
                            children=move |row| {
                                let badge = expiring_badge(&row.date, today);
                                view! {
                                    <tr data-tag=row.tag.clone()>
                                        <NameCell name=row.name.clone() badge=badge />
                                        <td class="val qty">{row.amount_text()}</td>
                                        <td class="val unit">{row.unit.clone()}</td>
                                        <td class="val tags">{row.tag.clone()}</td>
                                        <td class="val exp">{row.date.clone()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </section>

            <section class="pantry-section">
                <div class="table-toolbar">
                    <h2>"Cooked"</h2>
                    <label class="filter-label">
                        "Sort "
                        <select
                            id="cooked-sort"
                            on:change=move |ev| set_cooked_sort.set(CookedSort::from_value(&event_target_value(&ev)))
                        >
                            <option value="name">"Name"</option>
                            <option value="servings">"Servings"</option>
                            <option value="date">"Date"</option>
                        </select>
                    </label>
                </div>
                <table class="pantry-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Servings"</th>
                            <th>"Unit"</th>
                            <th>"Cooked on"</th>
                        </tr>
                    </thead>
                    <tbody id="cooked-body">
                        <For
                            each=cooked
                            key=|row| (row.key, row.name.clone(), row.amount_text(), row.date.clone())
                            children=move |row| {
                                let badge = cooked_badge(&row.date, today);
                                view! {
                                    <tr>
                                        <NameCell name=row.name.clone() badge=badge />
                                        <td class="val servings">{row.amount_text()}</td>
                                        <td class="val unit">{row.unit.clone()}</td>
                                        <td class="val date">{row.date.clone()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </section>
        </div>
    }
}
