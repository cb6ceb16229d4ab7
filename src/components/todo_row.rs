//! Todo Row Component
//!
//! A single item: checkbox, title, edit and delete, or the inline editor.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::models::TodoItem;
use crate::store::TodoStateStoreFields;

/// A single item row
#[component]
pub fn TodoRow(item: TodoItem) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    let id = item.id;
    let completed = item.completed;
    let title = item.title;
    let checkbox_id = format!("checkbox-{}", id);

    let is_editing = move || store.editing().get().is_some_and(|draft| draft.id == id);

    view! {
        <div class="todo-row">
            {move || if is_editing() {
                view! {
                    <input
                        type="text"
                        class="edit-input"
                        prop:value=move || store.editing().get().map(|draft| draft.title).unwrap_or_default()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            ctx.dispatch(move |list| list.set_edit_draft_title(text));
                        }
                    />
                    <button class="save-btn" on:click=move |_| ctx.dispatch(move |list| list.save_edit(id))>"✓"</button>
                    <button class="cancel-btn" on:click=move |_| ctx.dispatch(|list| list.cancel_edit())>"✗"</button>
                }.into_any()
            } else {
                let edit_title = title.clone();
                view! {
                    <input
                        type="checkbox"
                        id=checkbox_id.clone()
                        checked=completed
                        on:change=move |_| ctx.dispatch(move |list| list.toggle_completed(id))
                    />
                    <label
                        for=checkbox_id.clone()
                        class=if completed { "todo-title completed" } else { "todo-title" }
                    >
                        {title.clone()}
                    </label>
                    <button class="edit-btn" on:click=move |_| {
                        let current = edit_title.clone();
                        ctx.dispatch(move |list| list.start_edit(id, current));
                    }>"✎"</button>
                    <button class="delete-btn" on:click=move |_| ctx.dispatch(move |list| list.remove_todo(id))>"×"</button>
                }.into_any()
            }}
        </div>
    }
}
