//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity over `TodoState`.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::todo_list::TodoState;

pub use crate::todo_list::TodoStateStoreFields;

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

// ========================
// Store Helper Functions
// ========================

/// Publish a controller snapshot, touching only the fields that changed
pub fn store_publish(store: &TodoStore, next: TodoState) {
    let TodoState {
        items,
        draft_text,
        editing,
        confirm_clear_visible,
    } = next;

    if store.items().get_untracked() != items {
        *store.items().write() = items;
    }
    if store.draft_text().get_untracked() != draft_text {
        *store.draft_text().write() = draft_text;
    }
    if store.editing().get_untracked() != editing {
        *store.editing().write() = editing;
    }
    if store.confirm_clear_visible().get_untracked() != confirm_clear_visible {
        *store.confirm_clear_visible().write() = confirm_clear_visible;
    }
}
