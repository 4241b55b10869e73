//! API Key Input Component
//!
//! Toolbar button showing the masked key; click to edit, Enter saves,
//! Escape cancels.

use board_core::api_key::{mask, validate_format};
use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn ApiKeyInput() -> impl IntoView {
    let ctx = use_app_context();

    let (saved, set_saved) = signal(ctx.prefs().api_key());
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let cancel = move || {
        set_editing.set(false);
        set_draft.set(String::new());
        set_error.set(None);
    };

    let save = move || {
        let key = draft.get_untracked();
        if !validate_format(&key) {
            set_error.set(Some("API key must be at least 20 characters of letters, digits, '.', '_' or '-'".to_string()));
            return;
        }
        match ctx.prefs().save_api_key(&key) {
            Ok(()) => {
                log::info!("[BOARD] API key saved");
                set_saved.set(Some(key.trim().to_string()));
                cancel();
            }
            Err(e) => set_error.set(Some(format!("Could not save API key: {}", e))),
        }
    };

    let clear = move |_| {
        if let Err(e) = ctx.prefs().clear_api_key() {
            log::warn!("[BOARD] Could not clear API key: {}", e);
            return;
        }
        set_saved.set(None);
        cancel();
    };

    let button_label = move || match saved.get().as_deref().and_then(mask) {
        Some(masked) => format!("API Key: {}", masked),
        None => "Set API Key".to_string(),
    };

    view! {
        <div class="api-key">
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <button class="api-key-btn" on:click=move |_| set_editing.set(true)>{button_label}</button>
                }
            >
                <input
                    type="password"
                    class="api-key-input"
                    placeholder="Paste API key, Enter to save"
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        match ev.key().as_str() {
                            "Enter" => save(),
                            "Escape" => cancel(),
                            _ => {}
                        }
                    }
                />
                <Show when=move || saved.get().is_some()>
                    <button class="api-key-clear" on:click=clear>"Clear"</button>
                </Show>
                {move || error.get().map(|msg| view! { <span class="api-key-error">{msg}</span> })}
            </Show>
        </div>
    }
}
