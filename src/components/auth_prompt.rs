//! Login prompt shown when a status change needs a signed-in user.

use board_core::IdentityProvider;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn AuthPrompt() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let dismiss = move || *store.auth_prompt().write() = false;

    view! {
        <Show when=move || store.auth_prompt().get()>
            <div class="modal-overlay">
                <div class="auth-prompt">
                    <h3>"Login required"</h3>
                    <p>"Please log in to update task status."</p>
                    <div class="auth-prompt-actions">
                        <button class="primary" on:click=move |_| {
                            dismiss();
                            ctx.identity().begin_login();
                        }>"Log in"</button>
                        <button on:click=move |_| dismiss()>"Cancel"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
