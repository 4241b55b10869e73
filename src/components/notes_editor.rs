//! Notes Editor Component
//!
//! Freeform markdown notes with side-by-side edit and preview, saved on
//! every edit.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::markdown::parse_markdown;

#[component]
pub fn NotesEditor() -> impl IntoView {
    let ctx = use_app_context();

    let (open, set_open) = signal(false);
    let (notes, set_notes) = signal(ctx.prefs().notes());

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        if let Err(e) = ctx.prefs().set_notes(&value) {
            log::warn!("[NOTES] Could not save notes: {}", e);
        }
        set_notes.set(value);
    };

    let rendered_html = move || parse_markdown(&notes.get());

    view! {
        <div class="notes-editor">
            <button class="notes-toggle" on:click=move |_| set_open.update(|v| *v = !*v)>
                {move || if open.get() { "Hide Notes" } else { "Notes" }}
            </button>
            <Show when=move || open.get()>
                <div class="notes-body">
                    <div class="notes-edit-pane">
                        <div class="pane-header">"Edit"</div>
                        <textarea
                            class="notes-textarea"
                            prop:value=move || notes.get()
                            on:input=on_input
                            placeholder="Markdown notes..."
                        ></textarea>
                    </div>
                    <div class="notes-preview-pane">
                        <div class="pane-header">"Preview"</div>
                        <div class="notes-preview-content" inner_html=rendered_html></div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
