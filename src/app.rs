//! Sprint Board Frontend App
//!
//! Header with the page toggle, then the board or the attendance page.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AttendancePage, AuthPrompt, ErrorBanner, KanbanBoard, UserBadge};
use crate::context::{AppContext, Page};
use crate::store::UiState;

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::default());

    // Provide context to all children
    let ctx = AppContext::new((page, set_page));
    provide_context(ctx);
    provide_context(Store::new(UiState::new(&ctx.prefs(), &ctx.config())));

    let tab_class = move |tab: Page| if ctx.page.get() == tab { "page-tab active" } else { "page-tab" };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Sprint Board"</h1>
                <nav class="page-tabs">
                    <button class=move || tab_class(Page::Board) on:click=move |_| ctx.show_page(Page::Board)>
                        "Kanban"
                    </button>
                    <button class=move || tab_class(Page::Attendance) on:click=move |_| ctx.show_page(Page::Attendance)>
                        "Attendance"
                    </button>
                </nav>
                <UserBadge />
            </header>

            <ErrorBanner />

            <main class="main-content">
                // Both pages stay mounted; the board binds document-level drag listeners once
                <div class="page" class:hidden=move || ctx.page.get() != Page::Board>
                    <KanbanBoard />
                </div>
                <div class="page" class:hidden=move || ctx.page.get() != Page::Attendance>
                    <AttendancePage />
                </div>
            </main>

            <AuthPrompt />
        </div>
    }
}
