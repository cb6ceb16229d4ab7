//! New Todo Form Component
//!
//! Text input with Add and "Clear all" buttons.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::TodoStateStoreFields;

/// Input row for creating items. Inert while the clear confirmation is showing.
#[component]
pub fn NewTodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    let inert = move || store.confirm_clear_visible().get();
    let has_items = move || !store.items().get().is_empty();

    view! {
        <div class=move || if inert() { "new-todo-row inert" } else { "new-todo-row" }>
            <input
                type="text"
                placeholder="Enter todo"
                disabled=inert
                prop:value=move || store.draft_text().get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    ctx.dispatch(move |list| list.set_draft_text(text));
                }
                on:keydown=move |ev| {
                    let key = ev.key();
                    ctx.dispatch(move |list| list.submit_on_enter_key(&key));
                }
            />
            <button class="add-btn" disabled=inert on:click=move |_| ctx.dispatch(|list| list.add_todo())>
                "Add"
            </button>
            <Show when=has_items>
                <button
                    class="clear-btn"
                    disabled=inert
                    on:click=move |_| ctx.dispatch(|list| list.request_clear_all())
                >
                    "Clear all"
                </button>
            </Show>
        </div>
    }
}
