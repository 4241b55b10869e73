//! Kanban Board Component
//!
//! Loads the sprint, renders the columns and wires leptos-dragdrop to the
//! status transition workflow.

use board_core::domain::TaskId;
use board_core::{DropOutcome, ReportApi};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{KanbanColumn, KanbanFilters, NotesEditor};
use crate::context::use_app_context;
use crate::store::{
    store_begin_drag, store_clear_highlighting, store_hover, store_release, store_replace_tasks,
    store_settle, store_show_error, use_ui_store, UiStateStoreFields, LOAD_FAILED_MESSAGE,
};

use leptos_dragdrop::*;

fn workflow_target(target: DropTarget) -> board_core::DropTarget {
    match target {
        DropTarget::Task(id) => board_core::DropTarget::Task(TaskId(id)),
        DropTarget::Column(column) => board_core::DropTarget::Column(column),
    }
}

/// Board page: toolbar, columns, notes
#[component]
pub fn KanbanBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    // Fetch every task of `sprint`; a failure keeps the current board
    let load_tasks = move |sprint: String| {
        let api = ctx.api();
        *store.loading().write() = true;
        spawn_local(async move {
            log::info!("[BOARD] Loading sprint {}", sprint);
            match api.fetch_tasks(&sprint).await {
                Ok(batch) => store_replace_tasks(&store, batch),
                Err(e) => {
                    log::error!("[BOARD] Failed to load tasks: {}", e);
                    store_show_error(&store, LOAD_FAILED_MESSAGE);
                }
            }
            *store.loading().write() = false;
        });
    };

    // Initial load
    let initial_sprint = ctx.prefs().sprint_name();
    load_tasks(initial_sprint);

    // Create DnD signals
    let dnd = create_dnd_signals();

    let on_start = move |dragged: u32| {
        if !store_begin_drag(&store, TaskId(dragged)) {
            end_drag(&dnd);
        }
    };

    watch_hover(dnd, move |_dragged, target| {
        store_hover(&store, &workflow_target(target));
    });

    bind_global_mouseup(dnd, on_start, move |dragged, target| {
        let target = target.map(workflow_target);
        match store_release(&store, target.as_ref()) {
            DropOutcome::Discarded => log::debug!("[DND] Task {} dropped without change", dragged),
            DropOutcome::Rejected(reason) => store_show_error(&store, reason),
            DropOutcome::Commit(request) => {
                let api = ctx.api();
                let project = store.board().with_untracked(|b| b.project.clone());
                spawn_local(async move {
                    let result = api.update_task_status(&request.task, &request.target, &project).await;
                    store_settle(&store, &request, result);
                });
            }
        }
    });

    // Clicks on the board background itself clear the status-lookup highlighting
    let on_background_click = move |ev: web_sys::MouseEvent| {
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        if is_own_target(ev.target(), ev.current_target()) {
            store_clear_highlighting(&store);
        }
    };

    let columns = move || store.board().with(|b| b.columns.clone());

    view! {
        <div class="kanban-page">
            <KanbanFilters on_refresh=Callback::new(load_tasks) />

            <Show when=move || store.loading().get()>
                <div class="loading-indicator">"Loading tasks..."</div>
            </Show>

            <div class="kanban-board" on:click=on_background_click>
                <For
                    each=columns
                    key=|column| (column.id.clone(), column.highlighted)
                    children=move |column| view! { <KanbanColumn column=column dnd=dnd /> }
                />
            </div>

            <NotesEditor />
        </div>
    }
}

/// The event hit the element the listener sits on, not one of its children.
fn is_own_target<T: PartialEq>(target: Option<T>, current: Option<T>) -> bool {
    target.is_some() && target == current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_clicks_on_board_itself_count_as_background() {
        assert!(is_own_target(Some("board"), Some("board")));
        assert!(!is_own_target(Some("column-header"), Some("board")));
        assert!(!is_own_target(None::<&str>, None));
    }
}
