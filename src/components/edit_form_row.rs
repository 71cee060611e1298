//! Edit Form Row Component
//!
//! Expanded form rendered beneath the pantry row being edited.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::edit_session::{EditMode, FormField, RowKind};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::tags::datalist_options;

/// One labelled input bound to a draft field
#[component]
fn DraftInput(
    field: FormField,
    #[prop(into)] label: String,
    #[prop(into)] input_type: String,
    #[prop(optional)] list: Option<String>,
    #[prop(optional)] input_ref: Option<NodeRef<leptos::html::Input>>,
) -> impl IntoView {
    let store = use_app_store();
    let input_ref = input_ref.unwrap_or_default();
    let value = move || {
        store
            .edit()
            .with(|e| e.current().map(|s| s.draft.get(field).to_string()))
            .unwrap_or_default()
    };
    let step = (input_type == "number").then_some("any");

    view! {
        <label class="form-field">
            <span class="form-label">{label}</span>
            <input
                node_ref=input_ref
                type=input_type
                step=step
                list=list
                prop:value=value
                on:input=move |ev| {
                    store.edit().write().update_field(field, event_target_value(&ev));
                }
            />
        </label>
    }
}

#[component]
pub fn EditFormRow(
    kind: RowKind,
    on_save: Callback<()>,
    on_cancel: Callback<()>,
    on_delete: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let first_input = NodeRef::<leptos::html::Input>::new();

    let mode = move || store.edit().with(|e| e.current().map(|s| s.mode));
    let row_key = store.edit().with_untracked(|e| e.current().map(|s| s.row)).unwrap_or_default();
    let list_id = format!("tag-options-{row_key}");
    let tag_options = datalist_options(
        &store
            .edit()
            .with_untracked(|e| e.current().map(|s| s.draft.tag.clone()))
            .unwrap_or_default(),
    );

    // Focus the first field once mounted
    Effect::new(move |_| {
        if let Some(input) = first_input.get() {
            Timeout::new(30, move || {
                let _ = input.focus();
            })
            .forget();
        }
    });

    let heading = move || match (kind, mode()) {
        (RowKind::Ingredient, Some(EditMode::Add)) => "New ingredient",
        (RowKind::Ingredient, _) => "Edit ingredient",
        (RowKind::Cooked, Some(EditMode::Add)) => "New cooked dish",
        (RowKind::Cooked, _) => "Edit cooked dish",
    };

    let fields = match kind {
        RowKind::Ingredient => view! {
            <DraftInput field=FormField::Name label="Name" input_type="text" input_ref=first_input />
            <DraftInput field=FormField::Amount label="Quantity" input_type="number" />
            <DraftInput field=FormField::Unit label="Unit" input_type="text" />
            <DraftInput field=FormField::Tag label="Tag" input_type="text" list=list_id.clone() />
            <datalist id=list_id>
                {tag_options
                    .into_iter()
                    .map(|t| {
                        let value = t.clone();
                        view! { <option value=value>{t}</option> }
                    })
                    .collect_view()}
            </datalist>
            <DraftInput field=FormField::Date label="Expiration" input_type="date" />
        }
        .into_any(),
        RowKind::Cooked => view! {
            <DraftInput field=FormField::Name label="Name" input_type="text" input_ref=first_input />
            <DraftInput field=FormField::Date label="Cooked on" input_type="date" />
            <DraftInput field=FormField::Amount label="Servings" input_type="number" />
            <DraftInput field=FormField::Unit label="Unit" input_type="text" />
        }
        .into_any(),
    };

    view! {
        <tr class="edit-form-row">
            <td colspan=kind.column_count()>
                <div class="edit-form">
                    <h4>{heading}</h4>
                    <div class="form-fields">{fields}</div>
                    <div class="form-actions">
                        <button type="button" class="main-btn small save-btn" on:click=move |_| on_save.run(())>
                            "Save"
                        </button>
                        <button type="button" class="main-btn small cancel-btn" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button type="button" class="main-btn small delete-btn danger" on:click=move |_| on_delete.run(())>
                            "Delete"
                        </button>
                    </div>
                </div>
            </td>
        </tr>
    }
}
