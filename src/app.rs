//! To-Do Frontend App
//!
//! Root component: builds the controller and lays out the page.

use leptos::prelude::*;

use crate::components::{ConfirmClearDialog, NewTodoForm, TodoListView};
use crate::config::TodoConfig;
use crate::context::{open_todo_list, AppContext};

#[component]
pub fn App(config: TodoConfig) -> impl IntoView {
    // Restore (or start) the list and provide context to all children
    let ctx = AppContext::new(open_todo_list(&config));
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <h1>"ToDo - App"</h1>
            <hr />

            <NewTodoForm />

            <ConfirmClearDialog />

            <TodoListView />
        </div>
    }
}
