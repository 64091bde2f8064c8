//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod field;
mod sidebar;
mod tag_list_input;
mod toast_stack;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field::{NumberField, SelectField, TextAreaField, TextField, ToggleField};
pub use sidebar::Sidebar;
pub use tag_list_input::TagListInput;
pub use toast_stack::ToastStack;
