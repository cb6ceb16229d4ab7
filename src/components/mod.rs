//! UI Components
//!
//! Leptos components for the to-do list.

mod new_todo_form;
mod confirm_clear_dialog;
mod todo_list_view;
mod todo_row;

pub use new_todo_form::NewTodoForm;
pub use confirm_clear_dialog::ConfirmClearDialog;
pub use todo_list_view::TodoListView;
pub use todo_row::TodoRow;
