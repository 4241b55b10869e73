//! Task Card Component
//!
//! Draggable card with bookmark, copy and next-status lookup buttons.

use board_core::domain::Task;
use board_core::ReportApi;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{make_on_mousedown, make_on_task_mouseenter, make_on_task_mouseleave, DndSignals, DropTarget};

use crate::clipboard;
use crate::context::use_app_context;
use crate::store::{store_apply_status_lookup, store_set_bookmark, use_ui_store, UiStateStoreFields};

const COPIED_FEEDBACK_MS: u32 = 2000;

fn issue_type_class(issue_type: &str) -> &'static str {
    match issue_type.to_lowercase().as_str() {
        "feature" => "issue-type feature",
        "improvement" => "issue-type improvement",
        "bug" => "issue-type bug",
        "task" => "issue-type task",
        _ => "issue-type other",
    }
}

#[component]
pub fn TaskCard(task: Task, column_id: String, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let id = task.id;
    let issue_id = task.row.issue_id.clone();
    let (copied, set_copied) = signal(false);
    let (checking, set_checking) = signal(false);

    let bookmark = {
        let issue_id = issue_id.clone();
        move || store.bookmarks().with(|b| b.get(&issue_id))
    };

    // Bookmark: none -> flagged -> starred -> none
    let on_bookmark = {
        let issue_id = issue_id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            match ctx.prefs().cycle_bookmark(&issue_id) {
                Ok(state) => store_set_bookmark(&store, &issue_id, state),
                Err(e) => log::error!("[BOARD] Could not save bookmark for {}: {}", issue_id, e),
            }
        }
    };

    let on_copy = {
        let text = task.clipboard_text();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            let text = text.clone();
            spawn_local(async move {
                match clipboard::write_text(&text).await {
                    Ok(()) => {
                        set_copied.set(true);
                        TimeoutFuture::new(COPIED_FEEDBACK_MS).await;
                        set_copied.set(false);
                    }
                    Err(e) => log::error!("[BOARD] {}", e),
                }
            });
        }
    };

    // Ask the workflow rules where this task may go next
    let on_status_check = {
        let issue_type = task.row.issue_type.clone();
        let current_status = task.column_id.clone();
        move |ev: web_sys::MouseEvent| {
            ev.stop_propagation();
            if issue_type.is_empty() || current_status.is_empty() {
                log::error!("[BOARD] Task {} lacks issue type or status for a status check", id);
                return;
            }
            let api = ctx.api();
            let project = store.board().with_untracked(|b| b.project.clone());
            let issue_type = issue_type.clone();
            let current_status = current_status.clone();
            set_checking.set(true);
            spawn_local(async move {
                match api.check_next_statuses(&issue_type, &current_status, &project).await {
                    Ok(statuses) => {
                        log::info!("[BOARD] Task {} may move to {:?}", id, statuses);
                        store_apply_status_lookup(&store, id, &statuses);
                    }
                    Err(e) => log::error!("[BOARD] Status check failed: {}", e),
                }
                set_checking.set(false);
            });
        }
    };

    let card_class = move || {
        let (highlighted, success, updating) = store
            .board()
            .with(|b| (b.highlighted_task == Some(id), b.success_task == Some(id), b.is_updating(id)));
        let mut c = String::from("task-card");
        if dnd.dragging_id_read.get() == Some(id.0) { c.push_str(" dragging"); }
        if matches!(dnd.drop_target_read.get(), Some(DropTarget::Task(t)) if t == id.0) { c.push_str(" drop-target"); }
        if highlighted { c.push_str(" highlighted"); }
        if success { c.push_str(" success"); }
        if updating { c.push_str(" updating"); }
        c
    };

    let row = task.row;

    view! {
        <div
            class=card_class
            on:mousedown=make_on_mousedown(dnd, id.0)
            on:mouseenter=make_on_task_mouseenter(dnd, id.0)
            on:mouseleave=make_on_task_mouseleave(dnd, column_id)
        >
            <div class="task-card-header">
                <span class=issue_type_class(&row.issue_type)>{row.issue_type.clone()}</span>
                <span class="task-issue-id">{row.issue_id.clone()}</span>
                <button
                    class=move || format!("task-btn bookmark {}", bookmark().css_class())
                    title="Bookmark"
                    on:click=on_bookmark
                >
                    "🔖"
                </button>
            </div>
            <div class="task-summary">{row.summary.clone()}</div>
            <div class="task-card-footer">
                <span class="task-assignee">{row.assignee.clone()}</span>
                <button class="task-btn copy" title="Copy issue id and summary" on:click=on_copy>
                    {move || if copied.get() { "✓" } else { "⧉" }}
                </button>
                <button
                    class="task-btn status-check"
                    title="Show next statuses"
                    disabled=move || checking.get()
                    on:click=on_status_check
                >
                    {move || if checking.get() { "…" } else { "⇄" }}
                </button>
                <Show when=move || store.board().with(|b| b.is_updating(id))>
                    <span class="task-updating">"Updating..."</span>
                </Show>
            </div>
        </div>
    }
}
