//! UI Components
//!
//! Leptos components for the planner, pantry and side panels.

mod alerts_panel;
mod cook_panel;
mod edit_form_row;
mod meal_grid;
mod pantry_editor;
mod pantry_view;
mod recipe_picker;
mod stats_panel;
mod toast_stack;
mod week_controls;
mod week_picker;

pub use alerts_panel::AlertsPanel;
pub use cook_panel::CookPanel;
pub use edit_form_row::EditFormRow;
pub use meal_grid::MealGrid;
pub use pantry_editor::PantryEditor;
pub use pantry_view::PantryView;
pub use recipe_picker::RecipePicker;
pub use stats_panel::StatsPanel;
pub use toast_stack::ToastStack;
pub use week_controls::WeekControls;
pub use week_picker::WeekPicker;
