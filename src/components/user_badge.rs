//! Header badge: signed-in user, or a login button.

use board_core::IdentityProvider;
use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn UserBadge() -> impl IntoView {
    let ctx = use_app_context();
    let (name, set_name) = signal(ctx.identity().session().map(|s| s.display_name));

    let sign_out = move |_| {
        ctx.identity().sign_out();
        set_name.set(None);
    };

    view! {
        <div class="user-badge">
            {move || match name.get() {
                Some(display_name) => view! {
                    <span class="user-name">{display_name}</span>
                    <button class="logout-btn" on:click=sign_out>"Log out"</button>
                }.into_any(),
                None => view! {
                    <button class="login-btn" on:click=move |_| ctx.identity().begin_login()>"Log in"</button>
                }.into_any(),
            }}
        </div>
    }
}
