//! Confirm Clear Dialog Component
//!
//! Yes/No modal guarding "clear all".

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::TodoStateStoreFields;

#[component]
pub fn ConfirmClearDialog() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    view! {
        <Show when=move || store.confirm_clear_visible().get()>
            <div class="confirm-dialog" role="dialog">
                <h2>"Are you sure you want to clear all todos?"</h2>
                <button class="cancel-btn" on:click=move |_| ctx.dispatch(|list| list.cancel_clear_all())>
                    "No"
                </button>
                <button class="confirm-btn" on:click=move |_| ctx.dispatch(|list| list.confirm_clear_all())>
                    "Yes"
                </button>
            </div>
        </Show>
    }
}
