//! Pantry Editor Component
//!
//! Ingredient and cooked-dish tables with inline editing. One row at a time
//! can be open; its form renders directly beneath it.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::EditFormRow;
use crate::context::{confirm, use_app_context};
use crate::edit_session::{delete_action, key_action, DeleteAction, EditMode, KeyAction, PantryRow, RowKind, StartOutcome};
use crate::store::{
    store_find_row, store_push_placeholder, store_remove_row, store_update_row, use_app_store, AppStateStoreFields,
};
use crate::tags::{filter_options, visible_rows, TagFilter};

/// Is keyboard focus inside the open edit form?
fn focus_in_form() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
        .and_then(|el| el.closest(".edit-form-row").ok().flatten())
        .is_some()
}

#[component]
pub fn PantryEditor() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // ========================
    // Session transitions
    // ========================

    let start_edit = Callback::new(move |(row, mode): (PantryRow, EditMode)| {
        let outcome = store.edit().write().start(&row, mode);
        if let StartOutcome::Opened { discard: Some(key) } = outcome {
            store_remove_row(&store, key);
        }
    });

    let close_current = Callback::new(move |_: ()| {
        if let Some(key) = store.edit().write().close() {
            store_remove_row(&store, key);
        }
    });

    let add_row = move |kind: RowKind| {
        let row = store_push_placeholder(&store, kind);
        start_edit.run((row, EditMode::Add));
    };

    let save_current = Callback::new(move |_: ()| {
        let Some(prepared) = store.edit().with_untracked(|e| e.prepare_save()) else {
            return;
        };
        let request = match prepared {
            Ok(request) => request,
            Err(e) => {
                ctx.toast_error(e.to_string());
                return;
            }
        };
        spawn_local(async move {
            log::debug!("[pantry] {} {}", request.http_method(), request.url());
            match api::save_row(&request).await {
                Ok(()) => {
                    if let Some(row) = store_find_row(&store, request.row) {
                        store_update_row(&store, request.applied_to(&row));
                    }
                    store.edit().write().complete_save(&request);
                    ctx.toast("Saved successfully");
                }
                Err(e) => {
                    log::warn!("[pantry] save failed: {e}");
                    ctx.toast_error(e.user_message("Save failed"));
                }
            }
        });
    });

    let delete_row = Callback::new(move |row: PantryRow| match delete_action(&row) {
        DeleteAction::DiscardLocal { row: key } => {
            if store.edit().with_untracked(|e| e.is_editing(key)) {
                store.edit().write().close();
            }
            store_remove_row(&store, key);
        }
        DeleteAction::Remote { row: key, confirm: message, url } => {
            if !confirm(&message) {
                return;
            }
            spawn_local(async move {
                match api::delete_row(&url).await {
                    Ok(()) => {
                        if store.edit().with_untracked(|e| e.is_editing(key)) {
                            store.edit().write().close();
                        }
                        store_remove_row(&store, key);
                        ctx.toast("Deleted");
                    }
                    Err(e) => {
                        log::warn!("[pantry] delete failed: {e}");
                        ctx.toast_error(e.user_message("Delete failed"));
                    }
                }
            });
        }
    });

    // Delete pressed inside the form acts on the row being edited
    let delete_current = Callback::new(move |_: ()| {
        let key = store.edit().with_untracked(|e| e.current().map(|s| s.row));
        if let Some(row) = key.and_then(|k| store_find_row(&store, k)) {
            delete_row.run(row);
        }
    });

    // ========================
    // Keyboard
    // ========================

    let keydown = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let open = store.edit().with_untracked(|e| e.current().is_some());
        match key_action(&ev.key(), focus_in_form(), open) {
            KeyAction::Cancel => close_current.run(()),
            KeyAction::Save => {
                ev.prevent_default();
                save_current.run(());
            }
            KeyAction::Ignore => {}
        }
    });
    on_cleanup(move || keydown.remove());

    // ========================
    // Tag filter
    // ========================

    let (tag_filter, set_tag_filter) = signal(TagFilter::All);
    let tag_options = Memo::new(move |_| {
        store
            .ingredients()
            .with(|rows| filter_options(rows.iter().map(|r| r.tag.as_str())))
    });

    // Keep the selection only while it is still offered
    Effect::new(move |_| {
        let options = tag_options.get();
        let current = tag_filter.get_untracked();
        let kept = current.clone().retain_in(&options);
        if kept != current {
            set_tag_filter.set(kept);
        }
    });

    let visible_ingredients = move || {
        let filter = tag_filter.get();
        let editing = store.edit().with(|e| e.current().map(|s| s.row));
        visible_rows(store.ingredients().get(), &filter, editing)
    };

    let row_view = move |row: PantryRow| {
        let key = row.key;
        let kind = row.kind;
        let is_editing = move || store.edit().with(|e| e.is_editing(key));
        let row_class = move || if is_editing() { "being-edited" } else { "" };
        let edit_row = row.clone();
        let del_row = row.clone();

        let cells = match kind {
            RowKind::Ingredient => view! {
                <td class="val name">{row.name.clone()}</td>
                <td class="val qty">{row.amount_text()}</td>
                <td class="val unit">{row.unit.clone()}</td>
                <td class="val tags">{row.tag.clone()}</td>
                <td class="val exp">{row.date.clone()}</td>
            }
            .into_any(),
            RowKind::Cooked => view! {
                <td class="val name">{row.name.clone()}</td>
                <td class="val servings">{row.amount_text()}</td>
                <td class="val unit">{row.unit.clone()}</td>
                <td class="val date">{row.date.clone()}</td>
            }
            .into_any(),
        };

        view! {
            <tr class=row_class data-kind=kind.label() data-name=row.name.clone()>
                {cells}
                <td class="actions">
                    <button
                        class="main-btn small edit-btn"
                        on:click=move |_| start_edit.run((edit_row.clone(), EditMode::Edit))
                    >
                        "Edit"
                    </button>
                    " "
                    <button class="main-btn small delete-btn danger" on:click=move |_| delete_row.run(del_row.clone())>
                        "Delete"
                    </button>
                </td>
            </tr>
            <Show when=is_editing>
                <EditFormRow kind=kind on_save=save_current on_cancel=close_current on_delete=delete_current />
            </Show>
        }
    };

    let row_key = |row: &PantryRow| {
        (
            row.key,
            row.name.clone(),
            row.amount_text(),
            row.unit.clone(),
            row.tag.clone(),
            row.date.clone(),
            row.persisted,
        )
    };

    view! {
        <div class="pantry-edit">
            <section class="pantry-section">
                <div class="table-toolbar">
                    <h2>"Ingredients"</h2>
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
                    <button id="add-ingredient" class="main-btn" on:click=move |_| add_row(RowKind::Ingredient)>
                        "Add ingredient"
                    </button>
                </div>
                <table class="pantry-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Quantity"</th>
                            <th>"Unit"</th>
                            <th>"Tag"</th>
                            <th>"Expiration"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody id="ingredients-body">
                        <For each=visible_ingredients key=row_key children=row_view />
                    </tbody>
                </table>
            </section>

            <section class="pantry-section">
                <div class="table-toolbar">
                    <h2>"Cooked"</h2>
                    <button id="add-cooked" class="main-btn" on:click=move |_| add_row(RowKind::Cooked)>
                        "Add cooked"
                    </button>
                </div>
                <table class="pantry-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Servings"</th>
                            <th>"Unit"</th>
                            <th>"Cooked on"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody id="cooked-body">
                        <For each=move || store.cooked().get() key=row_key children=row_view />
                    </tbody>
                </table>
            </section>
        </div>
    }
}

