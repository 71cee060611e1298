//! Inline Row Editing
//!
//! State machine behind the pantry editor tables. At most one row is being
//! edited at a time across both tables; opening another closes the first and
//! throws its unsaved input away.

use crate::api::{cooked_url, ingredient_url};
use crate::dates::{to_display_date, to_iso_date};
use crate::error::ValidationError;
use crate::models::{format_amount, CookedItem, Ingredient};
use crate::tags::FALLBACK_TAG;
use crate::validation::{validate_cooked, validate_ingredient, CookedInput, IngredientInput};

/// Which pantry table a row lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Ingredient,
    Cooked,
}

impl RowKind {
    /// Word used in confirmations (`Delete ingredient 'Milk'?`)
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Ingredient => "ingredient",
            RowKind::Cooked => "cooked",
        }
    }

    /// Table width including the actions column
    pub fn column_count(self) -> u32 {
        match self {
            RowKind::Ingredient => 6,
            RowKind::Cooked => 5,
        }
    }

    pub fn item_url(self, name: &str) -> String {
        match self {
            RowKind::Ingredient => ingredient_url(name),
            RowKind::Cooked => cooked_url(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Add,
    Edit,
}

/// One visible row of a pantry table
#[derive(Debug, Clone, PartialEq)]
pub struct PantryRow {
    pub key: u32,
    pub kind: RowKind,
    pub name: String,
    /// Quantity for ingredients, servings for cooked dishes
    pub amount: Option<f64>,
    pub unit: String,
    pub tag: String,
    /// `DD-MM-YYYY`: expiration or cooked date
    pub date: String,
    /// False for a placeholder row that was never saved
    pub persisted: bool,
}

impl PantryRow {
    pub fn from_ingredient(key: u32, ing: &Ingredient) -> Self {
        Self {
            key,
            kind: RowKind::Ingredient,
            name: ing.name.clone(),
            amount: Some(ing.default_quantity),
            unit: ing.unit.clone(),
            tag: ing.tag().to_string(),
            date: ing.data_expirare.clone(),
            persisted: true,
        }
    }

    pub fn from_cooked(key: u32, item: &CookedItem) -> Self {
        Self {
            key,
            kind: RowKind::Cooked,
            name: item.name.clone(),
            amount: Some(item.servings),
            unit: item.unit.clone(),
            tag: String::new(),
            date: item.date_cooked.clone(),
            persisted: true,
        }
    }

    /// Blank row appended by the Add buttons
    pub fn placeholder(key: u32, kind: RowKind) -> Self {
        Self {
            key,
            kind,
            name: String::new(),
            amount: None,
            unit: String::new(),
            tag: String::new(),
            date: String::new(),
            persisted: false,
        }
    }

    pub fn amount_text(&self) -> String {
        self.amount.map(format_amount).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Amount,
    Unit,
    Tag,
    /// ISO value of the date input
    Date,
}

/// Unsaved form input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    pub name: String,
    pub amount: String,
    pub unit: String,
    pub tag: String,
    pub date_iso: String,
}

impl FormDraft {
    /// Untagged ingredients (new rows included) open tagged `other`.
    pub fn from_row(row: &PantryRow) -> Self {
        let tag = match row.kind {
            RowKind::Ingredient if row.tag.trim().is_empty() => FALLBACK_TAG.to_string(),
            _ => row.tag.clone(),
        };
        Self {
            name: row.name.clone(),
            amount: row.amount_text(),
            unit: row.unit.clone(),
            tag,
            date_iso: to_iso_date(&row.date),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Amount => &self.amount,
            FormField::Unit => &self.unit,
            FormField::Tag => &self.tag,
            FormField::Date => &self.date_iso,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Amount => self.amount = value,
            FormField::Unit => self.unit = value,
            FormField::Tag => self.tag = value,
            FormField::Date => self.date_iso = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub row: u32,
    pub kind: RowKind,
    pub mode: EditMode,
    pub original_name: String,
    pub draft: FormDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// The row is already open; nothing changed
    AlreadyOpen,
    /// A session is open on the row. `discard` is the key of a placeholder
    /// row whose add session was closed to make room.
    Opened { discard: Option<u32> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SavePayload {
    Ingredient(Ingredient),
    Cooked(CookedItem),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveMethod {
    Create,
    Update { original_name: String },
}

/// A validated save, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub row: u32,
    pub method: SaveMethod,
    pub payload: SavePayload,
}

impl SaveRequest {
    pub fn kind(&self) -> RowKind {
        match self.payload {
            SavePayload::Ingredient(_) => RowKind::Ingredient,
            SavePayload::Cooked(_) => RowKind::Cooked,
        }
    }

    pub fn http_method(&self) -> &'static str {
        match self.method {
            SaveMethod::Create => "POST",
            SaveMethod::Update { .. } => "PUT",
        }
    }

    pub fn url(&self) -> String {
        match (&self.method, self.kind()) {
            (SaveMethod::Create, RowKind::Ingredient) => crate::api::INGREDIENT_URL.to_string(),
            (SaveMethod::Create, RowKind::Cooked) => crate::api::COOKED_URL.to_string(),
            (SaveMethod::Update { original_name }, kind) => kind.item_url(original_name),
        }
    }

    /// Row as it should look once the server accepted the save.
    pub fn applied_to(&self, row: &PantryRow) -> PantryRow {
        let mut row = row.clone();
        match &self.payload {
            SavePayload::Ingredient(ing) => {
                row.name = ing.name.clone();
                row.amount = Some(ing.default_quantity);
                row.unit = ing.unit.clone();
                row.tag = ing.tag().to_string();
                row.date = ing.data_expirare.clone();
            }
            SavePayload::Cooked(item) => {
                row.name = item.name.clone();
                row.amount = Some(item.servings);
                row.unit = item.unit.clone();
                row.date = item.date_cooked.clone();
            }
        }
        row.persisted = true;
        row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteAction {
    /// Placeholder row: drop it, no request
    DiscardLocal { row: u32 },
    /// Ask `confirm`, then DELETE `url`
    Remote { row: u32, confirm: String, url: String },
}

pub fn delete_action(row: &PantryRow) -> DeleteAction {
    if !row.persisted {
        return DeleteAction::DiscardLocal { row: row.key };
    }
    DeleteAction::Remote {
        row: row.key,
        confirm: format!("Delete {} '{}'?", row.kind.label(), row.name),
        url: row.kind.item_url(&row.name),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Cancel,
    Save,
    Ignore,
}

/// Escape cancels; Enter saves only when focus is inside the form.
pub fn key_action(key: &str, focus_in_form: bool, session_open: bool) -> KeyAction {
    if !session_open {
        return KeyAction::Ignore;
    }
    match key {
        "Escape" => KeyAction::Cancel,
        "Enter" if focus_in_form => KeyAction::Save,
        _ => KeyAction::Ignore,
    }
}

/// Owner of the single edit session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditController {
    session: Option<EditSession>,
}

impl EditController {
    pub fn current(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_editing(&self, row: u32) -> bool {
        self.session.as_ref().is_some_and(|s| s.row == row)
    }

    pub fn start(&mut self, row: &PantryRow, mode: EditMode) -> StartOutcome {
        if self.is_editing(row.key) {
            return StartOutcome::AlreadyOpen;
        }
        let discard = self.close();
        self.session = Some(EditSession {
            row: row.key,
            kind: row.kind,
            mode,
            original_name: row.name.clone(),
            draft: FormDraft::from_row(row),
        });
        StartOutcome::Opened { discard }
    }

    /// Close without saving. Returns the placeholder row to drop, if the
    /// closed session was an add.
    pub fn close(&mut self) -> Option<u32> {
        self.session
            .take()
            .filter(|s| s.mode == EditMode::Add)
            .map(|s| s.row)
    }

    pub fn update_field(&mut self, field: FormField, value: String) {
        if let Some(session) = self.session.as_mut() {
            session.draft.set(field, value);
        }
    }

    /// Validate the draft. `None` when nothing is open.
    pub fn prepare_save(&self) -> Option<Result<SaveRequest, ValidationError>> {
        let session = self.session.as_ref()?;
        let draft = &session.draft;
        let date = to_display_date(draft.date_iso.trim());

        let payload = match session.kind {
            RowKind::Ingredient => validate_ingredient(&IngredientInput {
                name: &draft.name,
                quantity: &draft.amount,
                unit: &draft.unit,
                expiration: &date,
                tag: &draft.tag,
            })
            .map(SavePayload::Ingredient),
            RowKind::Cooked => validate_cooked(&CookedInput {
                name: &draft.name,
                date: &date,
                servings: &draft.amount,
                unit: &draft.unit,
            })
            .map(SavePayload::Cooked),
        };

        let method = match session.mode {
            EditMode::Add => SaveMethod::Create,
            EditMode::Edit => SaveMethod::Update {
                original_name: session.original_name.clone(),
            },
        };
        Some(payload.map(|payload| SaveRequest {
            row: session.row,
            method,
            payload,
        }))
    }

    /// The server accepted `request`: close its session if it is still open.
    pub fn complete_save(&mut self, request: &SaveRequest) {
        if self.is_editing(request.row) {
            self.session = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk(key: u32) -> PantryRow {
        PantryRow::from_ingredient(
            key,
            &Ingredient {
                name: "Milk".into(),
                default_quantity: 2.0,
                unit: "l".into(),
                tags: vec!["dairy".into()],
                data_expirare: "05-03-2025".into(),
            },
        )
    }

    #[test]
    fn one_session_at_a_time() {
        let mut ctl = EditController::default();
        let a = milk(1);
        let b = milk(2);
        assert_eq!(ctl.start(&a, EditMode::Edit), StartOutcome::Opened { discard: None });
        assert_eq!(ctl.start(&a, EditMode::Edit), StartOutcome::AlreadyOpen);
        assert_eq!(ctl.start(&b, EditMode::Edit), StartOutcome::Opened { discard: None });
        assert!(ctl.is_editing(2));
        assert!(!ctl.is_editing(1));
    }

    #[test]
    fn replacing_an_add_session_discards_its_placeholder() {
        let mut ctl = EditController::default();
        let blank = PantryRow::placeholder(7, RowKind::Cooked);
        ctl.start(&blank, EditMode::Add);
        assert_eq!(ctl.start(&milk(1), EditMode::Edit), StartOutcome::Opened { discard: Some(7) });
        assert_eq!(ctl.close(), None);
        assert!(ctl.current().is_none());
    }

    #[test]
    fn draft_opens_with_iso_date_and_empty_on_bad_date() {
        let mut row = milk(1);
        assert_eq!(FormDraft::from_row(&row).date_iso, "2025-03-05");
        row.date = "5-3-2025".into();
        assert_eq!(FormDraft::from_row(&row).date_iso, "");
    }

    #[test]
    fn edit_save_puts_to_original_name() {
        let mut ctl = EditController::default();
        ctl.start(&milk(1), EditMode::Edit);
        ctl.update_field(FormField::Name, "Oat milk".into());
        ctl.update_field(FormField::Tag, "Snacks".into());
        let req = ctl.prepare_save().unwrap().unwrap();
        assert_eq!(req.http_method(), "PUT");
        assert_eq!(req.url(), "/api/pantry/ingredient/Milk");
        match &req.payload {
            SavePayload::Ingredient(ing) => {
                assert_eq!(ing.name, "Oat milk");
                assert_eq!(ing.tags, vec!["other".to_string()]);
                assert_eq!(ing.data_expirare, "05-03-2025");
            }
            other => panic!("unexpected payload {other:?}"),
        }
        let updated = req.applied_to(&milk(1));
        assert_eq!(updated.name, "Oat milk");
        ctl.complete_save(&req);
        assert!(ctl.current().is_none());
    }

    #[test]
    fn invalid_quantity_never_builds_a_request() {
        let mut ctl = EditController::default();
        ctl.start(&milk(1), EditMode::Edit);
        ctl.update_field(FormField::Amount, "two".into());
        assert_eq!(ctl.prepare_save(), Some(Err(ValidationError::QuantityNotNumber)));
        assert!(ctl.is_editing(1));
    }

    #[test]
    fn add_save_posts_to_collection() {
        let mut ctl = EditController::default();
        let blank = PantryRow::placeholder(3, RowKind::Cooked);
        ctl.start(&blank, EditMode::Add);
        for (field, value) in [
            (FormField::Name, "Soup"),
            (FormField::Date, "2025-03-05"),
            (FormField::Amount, "4"),
            (FormField::Unit, "portion"),
        ] {
            ctl.update_field(field, value.into());
        }
        let req = ctl.prepare_save().unwrap().unwrap();
        assert_eq!((req.http_method(), req.url()), ("POST", "/api/pantry/cooked".to_string()));
        let row = req.applied_to(&blank);
        assert!(row.persisted);
        assert_eq!(row.date, "05-03-2025");
    }

    #[test]
    fn untagged_ingredients_save_as_other() {
        let mut ctl = EditController::default();
        let blank = PantryRow::placeholder(4, RowKind::Ingredient);
        ctl.start(&blank, EditMode::Add);
        assert_eq!(ctl.current().map(|s| s.draft.tag.as_str()), Some("other"));
        for (field, value) in [
            (FormField::Name, "Rice"),
            (FormField::Amount, "1"),
            (FormField::Unit, "kg"),
            (FormField::Date, "2025-03-05"),
        ] {
            ctl.update_field(field, value.into());
        }
        let req = ctl.prepare_save().unwrap().unwrap();
        match &req.payload {
            SavePayload::Ingredient(ing) => assert_eq!(ing.tags, vec!["other".to_string()]),
            other => panic!("unexpected payload {other:?}"),
        }

        let mut untagged = milk(2);
        untagged.tag = String::new();
        ctl.start(&untagged, EditMode::Edit);
        assert!(matches!(ctl.prepare_save(), Some(Ok(_))));

        let soup = PantryRow::placeholder(5, RowKind::Cooked);
        assert_eq!(FormDraft::from_row(&soup).tag, "");
    }

    #[test]
    fn deleting_placeholder_stays_local() {
        let blank = PantryRow::placeholder(9, RowKind::Ingredient);
        assert_eq!(delete_action(&blank), DeleteAction::DiscardLocal { row: 9 });
        match delete_action(&milk(1)) {
            DeleteAction::Remote { confirm, url, .. } => {
                assert_eq!(confirm, "Delete ingredient 'Milk'?");
                assert_eq!(url, "/api/pantry/ingredient/Milk");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn keys() {
        assert_eq!(key_action("Escape", false, true), KeyAction::Cancel);
        assert_eq!(key_action("Enter", true, true), KeyAction::Save);
        assert_eq!(key_action("Enter", false, true), KeyAction::Ignore);
        assert_eq!(key_action("Escape", true, false), KeyAction::Ignore);
    }
}
