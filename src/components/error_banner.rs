//! Dismissible error banner.

use leptos::prelude::*;

use crate::store::{store_dismiss_banner, use_ui_store, UiStateStoreFields};

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let store = use_ui_store();

    view! {
        {move || store.banner().get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span>{message}</span>
                <button class="close-btn" on:click=move |_| store_dismiss_banner(&store)>"×"</button>
            </div>
        })}
    }
}
