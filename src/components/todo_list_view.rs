//! Todo List View Component
//!
//! Renders items in insertion order.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::context::AppContext;
use crate::store::TodoStateStoreFields;

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    view! {
        <div class=move || if store.confirm_clear_visible().get() { "todo-list inert" } else { "todo-list" }>
            <For
                each=move || store.items().get()
                // Key on every mutable field so edits and toggles re-render the row
                key=|item| (item.id, item.title.clone(), item.completed)
                children=move |item| view! { <TodoRow item=item /> }
            />
        </div>
    }
}
